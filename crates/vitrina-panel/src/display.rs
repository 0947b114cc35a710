//! Display-contract values exposed to the host page.
//!
//! The panel never touches the DOM; the host page reads these plain values
//! and applies them to its own markup.

use crate::media::MediaCategory;
use crate::session::EditorSession;
use vitrina_api_models::Language;

/// Whether the category's controls row should be visible: shown from the
/// first entry onward, hidden again when the collection empties.
#[must_use]
pub fn controls_visible(session: &EditorSession, category: MediaCategory) -> bool {
    !session.entries(category).is_empty()
}

/// `position / total` counter text for a slider; `0 / 0` when empty.
#[must_use]
pub fn counter_text(session: &EditorSession, category: MediaCategory) -> String {
    let total = session.entries(category).len();
    if total == 0 {
        "0 / 0".to_string()
    } else {
        format!("{} / {total}", session.position(category) + 1)
    }
}

/// CSS class for the slide at `index`: exactly the cursor's slide is
/// `active`, every other slide `inactive`.
#[must_use]
pub fn slide_class(session: &EditorSession, category: MediaCategory, index: usize) -> &'static str {
    let populated = index < session.entries(category).len();
    if category.is_slider() && populated && index == session.position(category) {
        "active"
    } else {
        "inactive"
    }
}

/// Indicator dot classes for one language, e.g. `indicator-empty pulse`.
#[must_use]
pub fn indicator_class(session: &EditorSession, language: Language) -> String {
    let state = session.indicator(language);
    format!("{} {}", state.css_class(), state.cue().css_class())
}

/// Placeholder prompt shown inside an empty slider.
#[must_use]
pub const fn empty_prompt(category: MediaCategory) -> &'static str {
    match category {
        MediaCategory::Image => "Add images to preview",
        MediaCategory::Video => "Add videos to preview",
        MediaCategory::Other => "Add files to attach",
    }
}

/// One batch warning naming every file rejected by the category policy.
#[must_use]
pub fn rejection_warning(category: MediaCategory, rejected: &[String]) -> String {
    format!(
        "Unsupported {} files: {}",
        category.label(),
        rejected.join(", ")
    )
}
