//! Error types for panel operations.
//!
//! Three families, per the panel's failure model: validation failures abort a
//! save before any request is issued, transport failures preserve staged
//! state for retry, and store no-ops resolve to a user-facing notice. Every
//! variant's `Display` text is the operator-facing message.

use crate::media::MediaCategory;
use thiserror::Error;
use vitrina_api_models::Language;

/// Validation failures that abort a submission before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The primary-language title was blank after trimming.
    #[error("primary language title is required")]
    MissingPrimaryTitle {
        /// Language designated as primary for the panel.
        language: Language,
    },
}

/// Store operations that resolve to a user-facing no-op notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Removal was requested where the category holds no matching entry.
    #[error("nothing to remove")]
    NothingToRemove {
        /// Category the removal targeted.
        category: MediaCategory,
    },
    /// A staged resource handle was released twice; a defect, surfaced so
    /// tests can catch it rather than a silent double free.
    #[error("media resource was already released")]
    HandleAlreadyReleased,
}

/// Failures at the request/response boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be constructed or never reached the server.
    #[error("request failed: {detail}")]
    Request {
        /// Human-readable description of the wire failure.
        detail: String,
    },
    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided failure detail, when the body carried one.
        detail: Option<String>,
    },
}

/// Failures staging a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SaveError {
    /// The submission was rejected by a precondition.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A previous submission has not completed yet.
    #[error("a save is already in progress")]
    SubmissionInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_operator_facing() {
        let missing = ValidationError::MissingPrimaryTitle {
            language: Language::primary(),
        };
        assert_eq!(missing.to_string(), "primary language title is required");

        let empty = StoreError::NothingToRemove {
            category: MediaCategory::Video,
        };
        assert_eq!(empty.to_string(), "nothing to remove");

        let status = TransportError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(status.to_string(), "server returned status 502");
    }

    #[test]
    fn save_error_wraps_validation() {
        let err: SaveError = ValidationError::MissingPrimaryTitle {
            language: Language::Ru,
        }
        .into();
        assert_eq!(err.to_string(), "primary language title is required");
    }
}
