//! The explicit editor session: all panel state behind one owner.
//!
//! One session is constructed on panel entry and discarded on navigation
//! away. It owns the media store and slider cursors, the per-language text,
//! the frozen media baseline captured at load, and the block identity that
//! selects the create or edit synchronization path. There is no module-level
//! state anywhere in the crate.

use crate::error::StoreError;
use crate::indicator::Completeness;
use crate::media::{
    AddReport, MediaCategory, MediaEntry, MediaStore, SlideCursor, SlideDirection, StagedPart,
    StagedUpload,
};
use vitrina_api_models::{BlockDetail, BlockId, Language, LanguageMap, MediaListing, MetadataUpdate};

/// Editable text for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageContent {
    /// Title field text, unfiltered operator input.
    pub title: String,
    /// Body content text, unfiltered operator input.
    pub content: String,
}

impl LanguageContent {
    /// Completeness of this pair, re-evaluated on every read.
    #[must_use]
    pub fn completeness(&self) -> Completeness {
        Completeness::classify(&self.title, &self.content)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct LanguageSet {
    ru: LanguageContent,
    en: LanguageContent,
    zh: LanguageContent,
    ar: LanguageContent,
}

impl LanguageSet {
    const fn get(&self, language: Language) -> &LanguageContent {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
            Language::Zh => &self.zh,
            Language::Ar => &self.ar,
        }
    }

    const fn get_mut(&mut self, language: Language) -> &mut LanguageContent {
        match language {
            Language::Ru => &mut self.ru,
            Language::En => &mut self.en,
            Language::Zh => &mut self.zh,
            Language::Ar => &mut self.ar,
        }
    }
}

/// All panel state for editing or creating one block.
#[derive(Debug, Default)]
pub struct EditorSession {
    block_id: Option<BlockId>,
    store: MediaStore,
    image_cursor: SlideCursor,
    video_cursor: SlideCursor,
    baseline: MediaListing,
    languages: LanguageSet,
    in_flight: bool,
}

impl EditorSession {
    /// Fresh session in create mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of the block under edit; `None` while creating.
    #[must_use]
    pub const fn block_id(&self) -> Option<BlockId> {
        self.block_id
    }

    /// True when the session edits an existing block.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.block_id.is_some()
    }

    /// Replace the whole session state from a loaded block.
    ///
    /// The media collections are rebuilt 1:1 from the server listing, the
    /// listing becomes the frozen diff baseline, cursors reset, and every
    /// language's text is replaced.
    ///
    /// # Errors
    /// [`StoreError::HandleAlreadyReleased`] signals a defect tearing down
    /// handles staged before the load.
    pub fn load_block(&mut self, detail: BlockDetail) -> Result<(), StoreError> {
        self.store.load_from_listing(&detail.media)?;
        self.baseline = detail.media;
        self.image_cursor.reset();
        self.video_cursor.reset();
        for language in Language::all() {
            *self.languages.get_mut(language) = LanguageContent {
                title: detail.title.get(language).unwrap_or_default().to_string(),
                content: detail.content.get(language).unwrap_or_default().to_string(),
            };
        }
        self.block_id = Some(detail.id);
        self.in_flight = false;
        Ok(())
    }

    /// Return to pristine create mode, tearing down staged handles.
    ///
    /// # Errors
    /// [`StoreError::HandleAlreadyReleased`] signals a defect during
    /// teardown.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.baseline = MediaListing::default();
        self.image_cursor.reset();
        self.video_cursor.reset();
        self.languages = LanguageSet::default();
        self.block_id = None;
        self.in_flight = false;
        Ok(())
    }

    // ── Language text ────────────────────────────────────────────────────

    /// Title text for `language`.
    #[must_use]
    pub fn title(&self, language: Language) -> &str {
        &self.languages.get(language).title
    }

    /// Body content text for `language`.
    #[must_use]
    pub fn content(&self, language: Language) -> &str {
        &self.languages.get(language).content
    }

    /// Replace the title for `language`; the completeness indicator reflects
    /// the edit immediately.
    pub fn set_title(&mut self, language: Language, text: impl Into<String>) {
        self.languages.get_mut(language).title = text.into();
    }

    /// Replace the body content for `language`.
    pub fn set_content(&mut self, language: Language, text: impl Into<String>) {
        self.languages.get_mut(language).content = text.into();
    }

    /// Completeness state for `language`.
    #[must_use]
    pub fn indicator(&self, language: Language) -> Completeness {
        self.languages.get(language).completeness()
    }

    /// Structured metadata payload: every language that carries text.
    #[must_use]
    pub fn metadata(&self) -> MetadataUpdate {
        let mut title = LanguageMap::default();
        let mut content = LanguageMap::default();
        for language in Language::all() {
            let text = self.languages.get(language);
            if !text.title.trim().is_empty() {
                title.set(language, text.title.clone());
            }
            if !text.content.trim().is_empty() {
                content.set(language, text.content.clone());
            }
        }
        MetadataUpdate { title, content }
    }

    // ── Media ────────────────────────────────────────────────────────────

    /// Entries of `category` in display order.
    #[must_use]
    pub fn entries(&self, category: MediaCategory) -> &[MediaEntry] {
        self.store.entries(category)
    }

    /// Validate and append a selection of files to `category`.
    ///
    /// # Errors
    /// [`StoreError::HandleAlreadyReleased`] signals a handle-ownership
    /// defect; operator input alone cannot produce an error.
    pub fn add_files(
        &mut self,
        category: MediaCategory,
        uploads: Vec<StagedUpload>,
    ) -> Result<AddReport, StoreError> {
        self.store.add_files(category, uploads)
    }

    /// Remove the entry at `index`, clamping the slider cursor.
    ///
    /// # Errors
    /// [`StoreError::NothingToRemove`] when the category holds no entry at
    /// `index`.
    pub fn remove_at(
        &mut self,
        category: MediaCategory,
        index: usize,
    ) -> Result<String, StoreError> {
        let name = self.store.remove_at(category, index)?;
        let len = self.store.len(category);
        if let Some(cursor) = self.cursor_mut(category) {
            cursor.clamp_after_removal(len);
        }
        Ok(name)
    }

    /// Remove the slide the cursor currently shows.
    ///
    /// # Errors
    /// [`StoreError::NothingToRemove`] when the collection is empty.
    pub fn remove_current(&mut self, category: MediaCategory) -> Result<String, StoreError> {
        let index = self.position(category);
        self.remove_at(category, index)
    }

    /// Advance a slider circularly; `false` is the display no-op for an
    /// empty collection or a non-slider category.
    pub fn advance(&mut self, category: MediaCategory, direction: SlideDirection) -> bool {
        let len = self.store.len(category);
        match self.cursor_mut(category) {
            Some(cursor) => cursor.advance(direction, len),
            None => false,
        }
    }

    /// Current slider position; zero for non-slider categories.
    #[must_use]
    pub fn position(&self, category: MediaCategory) -> usize {
        self.cursor(category).map_or(0, SlideCursor::position)
    }

    /// Frozen server listing captured at load, the diff baseline.
    #[must_use]
    pub const fn baseline(&self) -> &MediaListing {
        &self.baseline
    }

    /// Baseline URLs for one category.
    #[must_use]
    pub fn baseline_urls(&self, category: MediaCategory) -> &[String] {
        match category {
            MediaCategory::Image => &self.baseline.images,
            MediaCategory::Video => &self.baseline.videos,
            MediaCategory::Other => &self.baseline.others,
        }
    }

    /// Upload parts for every entry staged in `category` this session.
    #[must_use]
    pub fn staged_parts(&self, category: MediaCategory) -> Vec<StagedPart> {
        self.store.staged_parts(category)
    }

    // ── Submission latch ─────────────────────────────────────────────────

    /// True while a staged submission has not completed.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) const fn start_submission(&mut self) {
        self.in_flight = true;
    }

    pub(crate) const fn finish_submission(&mut self) {
        self.in_flight = false;
    }

    const fn cursor(&self, category: MediaCategory) -> Option<&SlideCursor> {
        match category {
            MediaCategory::Image => Some(&self.image_cursor),
            MediaCategory::Video => Some(&self.video_cursor),
            MediaCategory::Other => None,
        }
    }

    const fn cursor_mut(&mut self, category: MediaCategory) -> Option<&mut SlideCursor> {
        match category {
            MediaCategory::Image => Some(&mut self.image_cursor),
            MediaCategory::Video => Some(&mut self.video_cursor),
            MediaCategory::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: &str) -> StagedUpload {
        StagedUpload::new(name, mime, format!("blob:panel/{name}"))
    }

    fn loaded_session() -> EditorSession {
        let mut session = EditorSession::new();
        let mut title = LanguageMap::default();
        title.set(Language::Ru, "Блок");
        session
            .load_block(BlockDetail {
                id: BlockId(5),
                title,
                content: LanguageMap::default(),
                media: MediaListing {
                    images: vec![
                        "/uploads/images/x.jpg".to_string(),
                        "/uploads/images/y.jpg".to_string(),
                    ],
                    ..MediaListing::default()
                },
            })
            .unwrap();
        session
    }

    #[test]
    fn loading_a_block_enters_edit_mode_with_reset_cursors() {
        let session = loaded_session();
        assert!(session.is_editing());
        assert_eq!(session.block_id(), Some(BlockId(5)));
        assert_eq!(session.position(MediaCategory::Image), 0);
        assert_eq!(session.entries(MediaCategory::Image).len(), 2);
        assert_eq!(session.title(Language::Ru), "Блок");
        assert_eq!(session.title(Language::En), "");
    }

    #[test]
    fn indicator_reflects_edits_synchronously() {
        let mut session = EditorSession::new();
        assert_eq!(session.indicator(Language::En), Completeness::Empty);

        session.set_title(Language::En, "Title");
        assert_eq!(session.indicator(Language::En), Completeness::Partial);

        session.set_content(Language::En, "Body");
        assert_eq!(session.indicator(Language::En), Completeness::Complete);

        session.set_title(Language::En, "   ");
        assert_eq!(session.indicator(Language::En), Completeness::Partial);
    }

    #[test]
    fn metadata_carries_only_filled_languages() {
        let mut session = EditorSession::new();
        session.set_title(Language::Ru, "Заголовок");
        session.set_content(Language::Ar, "نص");
        session.set_title(Language::Zh, "   ");

        let metadata = session.metadata();
        assert_eq!(metadata.title.get(Language::Ru), Some("Заголовок"));
        assert_eq!(metadata.title.get(Language::Zh), None);
        assert_eq!(metadata.content.get(Language::Ar), Some("نص"));
        assert!(metadata.content.get(Language::Ru).is_none());
    }

    #[test]
    fn removing_the_active_slide_clamps_the_cursor() {
        let mut session = loaded_session();
        session.advance(MediaCategory::Image, SlideDirection::Next);
        assert_eq!(session.position(MediaCategory::Image), 1);

        let removed = session.remove_current(MediaCategory::Image).unwrap();
        assert_eq!(removed, "y.jpg");
        // One entry left; the cursor wraps onto it.
        assert_eq!(session.position(MediaCategory::Image), 0);

        session.remove_current(MediaCategory::Image).unwrap();
        assert_eq!(session.position(MediaCategory::Image), 0);
        assert!(session.entries(MediaCategory::Image).is_empty());
    }

    #[test]
    fn advance_on_other_is_a_noop() {
        let mut session = EditorSession::new();
        session
            .add_files(
                MediaCategory::Other,
                vec![upload("doc.pdf", "application/pdf")],
            )
            .unwrap();
        assert!(!session.advance(MediaCategory::Other, SlideDirection::Next));
        assert_eq!(session.position(MediaCategory::Other), 0);
    }

    #[test]
    fn reset_returns_to_create_mode() {
        let mut session = loaded_session();
        session
            .add_files(MediaCategory::Image, vec![upload("z.jpg", "image/jpeg")])
            .unwrap();
        let probe = session.entries(MediaCategory::Image)[2].probe().unwrap();

        session.reset().unwrap();
        assert!(!session.is_editing());
        assert!(session.entries(MediaCategory::Image).is_empty());
        assert!(session.baseline_urls(MediaCategory::Image).is_empty());
        assert!(probe.is_released());
        assert_eq!(session.title(Language::Ru), "");
    }
}
