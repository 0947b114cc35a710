//! Save-time media delta: removals observed by absence.
//!
//! An identifier from the load-time baseline is removed iff no current
//! entry's preview locator equals that baseline URL. Locally staged entries
//! carry fresh local locators that never equal a server URL, and untouched
//! server-origin entries keep their URL unchanged, so identity survives the
//! edit session without a separate stable key. The emitted identifier is the
//! URL's trailing path segment, the filename contract the media-update
//! endpoint keys removals by.

use crate::media::MediaEntry;

/// Filenames from `baseline` with no surviving entry in `current`.
#[must_use]
pub fn compute_removals(baseline: &[String], current: &[MediaEntry]) -> Vec<String> {
    baseline
        .iter()
        .filter(|url| {
            !current
                .iter()
                .any(|entry| entry.preview_uri() == url.as_str())
        })
        .map(|url| trailing_segment(url).to_string())
        .collect()
}

/// Trailing path segment of a URL: the filename the server keys removals by.
#[must_use]
pub fn trailing_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
