#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Vitrina block API.
//!
//! These types are the single source of truth for the wire contract between
//! the admin panel and the block endpoints: multilingual text maps, the media
//! listing returned by the read endpoint, the metadata-update payload, and
//! the hierarchy nodes the tree glue consumes as opaque CRUD.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Languages supported by the block editor.
///
/// The set is fixed; [`Language::Ru`] is the primary language whose title is
/// mandatory for a successful save.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian (primary).
    Ru,
    /// English.
    En,
    /// Chinese (Simplified).
    Zh,
    /// Arabic.
    Ar,
}

impl Language {
    /// All supported languages in display order, primary first.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Ru, Self::En, Self::Zh, Self::Ar]
    }

    /// The language whose title is mandatory for a save.
    #[must_use]
    pub const fn primary() -> Self {
        Self::Ru
    }

    /// RFC 5646 two-letter code for the language.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Zh => "zh",
            Self::Ar => "ar",
        }
    }

    /// English display name for language pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ru => "Russian",
            Self::En => "English",
            Self::Zh => "Chinese",
            Self::Ar => "Arabic",
        }
    }

    /// Whether the language renders right-to-left.
    #[must_use]
    pub const fn rtl(self) -> bool {
        matches!(self, Self::Ar)
    }
}

impl Display for Language {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Server-assigned block identifier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockId(pub i64);

impl Display for BlockId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, formatter)
    }
}

/// Per-language text values, serialized as a `{ "ru": … }` object.
///
/// Absent languages are omitted from the wire form entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageMap {
    /// Russian text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,
    /// English text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    /// Chinese text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<String>,
    /// Arabic text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl LanguageMap {
    /// Text stored for `language`, if any.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::Ru => self.ru.as_deref(),
            Language::En => self.en.as_deref(),
            Language::Zh => self.zh.as_deref(),
            Language::Ar => self.ar.as_deref(),
        }
    }

    /// Store `value` for `language`, replacing any previous text.
    pub fn set(&mut self, language: Language, value: impl Into<String>) {
        let slot = match language {
            Language::Ru => &mut self.ru,
            Language::En => &mut self.en,
            Language::Zh => &mut self.zh,
            Language::Ar => &mut self.ar,
        };
        *slot = Some(value.into());
    }

    /// Iterate the languages that carry text, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Language, &str)> {
        Language::all()
            .into_iter()
            .filter_map(|language| self.get(language).map(|text| (language, text)))
    }

    /// True when no language carries text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// Media URLs stored on the server for one block, listed per category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaListing {
    /// Stored image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Stored video URLs in display order.
    #[serde(default)]
    pub videos: Vec<String>,
    /// Stored generic file URLs.
    #[serde(default)]
    pub others: Vec<String>,
}

/// Full block payload returned by the read endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDetail {
    /// Block identifier.
    #[serde(default)]
    pub id: BlockId,
    /// Per-language titles.
    #[serde(default)]
    pub title: LanguageMap,
    /// Per-language body content.
    #[serde(default)]
    pub content: LanguageMap,
    /// Server-resident media listing, the diff baseline for edits.
    #[serde(default)]
    pub media: MediaListing,
}

/// Structured payload accepted by the metadata-update endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    /// Per-language titles.
    #[serde(default)]
    pub title: LanguageMap,
    /// Per-language body content.
    #[serde(default)]
    pub content: LanguageMap,
}

/// Hierarchy node returned by the block-listing endpoint.
///
/// Consumed as opaque CRUD by the tree glue; the editor core never walks it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Block identifier.
    #[serde(default)]
    pub id: BlockId,
    /// Per-language titles for tree display.
    #[serde(default)]
    pub title: LanguageMap,
    /// Child nodes, recursively.
    #[serde(default)]
    pub children: Vec<BlockNode>,
}

/// Body for creating a hierarchy node without media.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlock {
    /// Per-language titles.
    #[serde(default)]
    pub title: LanguageMap,
    /// Per-language body content.
    #[serde(default)]
    pub content: LanguageMap,
    /// Parent node to attach under, if not a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BlockId>,
}

/// Generic success body returned by the write endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Human-readable confirmation text.
    #[serde(default)]
    pub message: String,
}

/// Error body returned by the server on failed requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    #[serde(default)]
    pub detail: String,
}
