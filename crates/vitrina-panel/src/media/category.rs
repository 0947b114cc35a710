//! Media categories and their acceptance/display policy.

use std::fmt::{self, Display, Formatter};

const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

const VIDEO_TYPES: &[&str] = &["video/mp4", "video/webm", "video/ogg", "video/quicktime"];

/// One of the three media kinds a block can carry.
///
/// The category's behavior is data: accepted MIME types, slider
/// participation, and the multipart field names the endpoints expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    /// Pictures shown in the image slider.
    Image,
    /// Clips shown in the video slider.
    Video,
    /// Generic attachments with no preview slider.
    Other,
}

impl MediaCategory {
    /// All categories in fixed submission order: images, videos, others.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Image, Self::Video, Self::Other]
    }

    /// Categories navigated with a slider.
    #[must_use]
    pub const fn sliders() -> [Self; 2] {
        [Self::Image, Self::Video]
    }

    /// Whether this category is navigated with a slider.
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }

    /// Accepted MIME types; `None` accepts anything.
    #[must_use]
    pub const fn accepted_types(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Image => Some(IMAGE_TYPES),
            Self::Video => Some(VIDEO_TYPES),
            Self::Other => None,
        }
    }

    /// Whether a file with `mime` may enter this category.
    #[must_use]
    pub fn accepts(self, mime: &str) -> bool {
        match self.accepted_types() {
            None => true,
            Some(types) => {
                let mime = mime.to_ascii_lowercase();
                types.contains(&mime.as_str())
            }
        }
    }

    /// Multipart field name for new files of this category.
    #[must_use]
    pub const fn upload_field(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
            Self::Other => "others",
        }
    }

    /// Multipart field name for removal identifiers of this category.
    #[must_use]
    pub const fn removal_field(self) -> &'static str {
        match self {
            Self::Image => "delete_images",
            Self::Video => "delete_videos",
            Self::Other => "delete_others",
        }
    }

    /// Singular display label for notices.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Other => "file",
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_policy_accepts_only_listed_types() {
        assert!(MediaCategory::Image.accepts("image/png"));
        assert!(MediaCategory::Image.accepts("IMAGE/PNG"));
        assert!(!MediaCategory::Image.accepts("video/mp4"));
        assert!(!MediaCategory::Image.accepts("application/pdf"));
    }

    #[test]
    fn video_policy_accepts_only_listed_types() {
        assert!(MediaCategory::Video.accepts("video/webm"));
        assert!(!MediaCategory::Video.accepts("image/png"));
    }

    #[test]
    fn other_accepts_anything() {
        assert!(MediaCategory::Other.accepts("application/zip"));
        assert!(MediaCategory::Other.accepts(""));
    }

    #[test]
    fn submission_order_is_fixed() {
        assert_eq!(
            MediaCategory::all().map(MediaCategory::upload_field),
            ["images", "videos", "others"]
        );
        assert_eq!(
            MediaCategory::sliders().map(|category| category.is_slider()),
            [true, true]
        );
        assert!(!MediaCategory::Other.is_slider());
    }

    #[test]
    fn removal_fields_are_namespaced_per_category() {
        assert_eq!(MediaCategory::Image.removal_field(), "delete_images");
        assert_eq!(MediaCategory::Video.removal_field(), "delete_videos");
        assert_eq!(MediaCategory::Other.removal_field(), "delete_others");
    }
}
