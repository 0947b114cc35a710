//! Per-category ordered collections of staged and server media.

use super::category::MediaCategory;
use super::entry::{MediaEntry, StagedPart};
use super::handle::StagedUpload;
use crate::error::StoreError;
use uuid::Uuid;
use vitrina_api_models::MediaListing;

/// Outcome of one add-files batch.
///
/// Valid files are appended even when others are rejected; the rejected
/// names are reported once, as a batch, never silently dropped.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Ids of the entries appended, in selection order.
    pub added: Vec<Uuid>,
    /// Names of the files rejected by the category policy.
    pub rejected: Vec<String>,
}

impl AddReport {
    /// True when at least one file entered the collection.
    #[must_use]
    pub fn accepted_any(&self) -> bool {
        !self.added.is_empty()
    }

    /// True when at least one file was rejected.
    #[must_use]
    pub fn rejected_any(&self) -> bool {
        !self.rejected.is_empty()
    }

    /// True when the selection contained no files at all.
    #[must_use]
    pub fn empty_selection(&self) -> bool {
        self.added.is_empty() && self.rejected.is_empty()
    }
}

/// Ordered media collections for the three categories.
///
/// The store is the sole owner of staged resource handles; every handle is
/// released exactly once, on removal of its entry or on teardown.
#[derive(Debug, Default)]
pub struct MediaStore {
    images: Vec<MediaEntry>,
    videos: Vec<MediaEntry>,
    others: Vec<MediaEntry>,
}

impl MediaStore {
    /// Empty store for a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of `category` in display order.
    #[must_use]
    pub fn entries(&self, category: MediaCategory) -> &[MediaEntry] {
        match category {
            MediaCategory::Image => &self.images,
            MediaCategory::Video => &self.videos,
            MediaCategory::Other => &self.others,
        }
    }

    fn entries_mut(&mut self, category: MediaCategory) -> &mut Vec<MediaEntry> {
        match category {
            MediaCategory::Image => &mut self.images,
            MediaCategory::Video => &mut self.videos,
            MediaCategory::Other => &mut self.others,
        }
    }

    /// Number of entries in `category`.
    #[must_use]
    pub fn len(&self, category: MediaCategory) -> usize {
        self.entries(category).len()
    }

    /// True when `category` holds no entries.
    #[must_use]
    pub fn is_empty(&self, category: MediaCategory) -> bool {
        self.entries(category).is_empty()
    }

    /// Validate and append a selection of files.
    ///
    /// Accepted uploads become staged entries in selection order; rejected
    /// uploads have their handles released immediately and are reported by
    /// name in the returned batch.
    ///
    /// # Errors
    /// [`StoreError::HandleAlreadyReleased`] signals a defect in handle
    /// ownership; it cannot arise from operator input.
    pub fn add_files(
        &mut self,
        category: MediaCategory,
        uploads: Vec<StagedUpload>,
    ) -> Result<AddReport, StoreError> {
        let mut report = AddReport::default();
        for mut upload in uploads {
            if category.accepts(&upload.mime) {
                let entry = MediaEntry::staged(upload);
                report.added.push(entry.id());
                self.entries_mut(category).push(entry);
            } else {
                upload.resource.release()?;
                report.rejected.push(upload.name);
            }
        }
        Ok(report)
    }

    /// Remove the entry at `index`, releasing its local resource.
    ///
    /// Returns the removed entry's name for the operator notice.
    ///
    /// # Errors
    /// [`StoreError::NothingToRemove`] when the category holds no entry at
    /// `index`; [`StoreError::HandleAlreadyReleased`] signals a defect.
    pub fn remove_at(
        &mut self,
        category: MediaCategory,
        index: usize,
    ) -> Result<String, StoreError> {
        let entries = self.entries_mut(category);
        if index >= entries.len() {
            return Err(StoreError::NothingToRemove { category });
        }
        let mut entry = entries.remove(index);
        entry.release_resource()?;
        Ok(entry.name().to_string())
    }

    /// Replace every collection 1:1 from the server listing.
    ///
    /// Staged handles held before the reload are torn down first; the new
    /// entries are resource-less server-origin entries.
    ///
    /// # Errors
    /// [`StoreError::HandleAlreadyReleased`] signals a defect during the
    /// teardown of previously staged handles.
    pub fn load_from_listing(&mut self, listing: &MediaListing) -> Result<(), StoreError> {
        self.clear()?;
        self.images = listing
            .images
            .iter()
            .map(|url| MediaEntry::server_origin(url.as_str()))
            .collect();
        self.videos = listing
            .videos
            .iter()
            .map(|url| MediaEntry::server_origin(url.as_str()))
            .collect();
        self.others = listing
            .others
            .iter()
            .map(|url| MediaEntry::server_origin(url.as_str()))
            .collect();
        Ok(())
    }

    /// Release every staged handle and drop all entries (teardown).
    ///
    /// # Errors
    /// [`StoreError::HandleAlreadyReleased`] signals a defect in handle
    /// ownership.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        for category in MediaCategory::all() {
            for entry in self.entries_mut(category).iter_mut() {
                entry.release_resource()?;
            }
            self.entries_mut(category).clear();
        }
        Ok(())
    }

    /// Upload parts for every staged entry of `category`, in display order.
    /// Server-origin entries contribute nothing.
    #[must_use]
    pub fn staged_parts(&self, category: MediaCategory) -> Vec<StagedPart> {
        self.entries(category)
            .iter()
            .filter_map(MediaEntry::staged_part)
            .collect()
    }
}

impl Drop for MediaStore {
    fn drop(&mut self) {
        // Teardown path for a session discarded without an explicit reset.
        let _ = self.clear();
    }
}
