//! Save orchestration: single-phase create, two-phase edit.
//!
//! A save goes through three explicit steps. [`stage_submission`] validates
//! preconditions, snapshots the session into a dispatchable value, and sets
//! the in-flight latch; no request is issued. [`run_save`] dispatches the
//! snapshot over the [`BlockTransport`] boundary. [`complete_submission`]
//! applies the outcome back to the session and clears the latch. Staging and
//! completion are pure and synchronous; only the dispatch suspends.

use crate::diff;
use crate::error::{SaveError, StoreError, TransportError, ValidationError};
use crate::media::{MediaCategory, StagedPart};
use crate::session::EditorSession;
use async_trait::async_trait;
use vitrina_api_models::{BlockId, Language, MetadataUpdate};

/// Sequencing policy for the media write when an edit's metadata write
/// fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SavePolicy {
    /// Skip the media write after a failed metadata write.
    #[default]
    AbortOnMetadataFailure,
    /// Issue the media write regardless of the metadata outcome, matching
    /// the legacy panel's observed behavior.
    ProceedAfterMetadataFailure,
}

/// Staged uploads for one category of a create submission.
#[derive(Clone, Debug)]
pub struct CategoryUploads {
    /// Category the parts belong to.
    pub category: MediaCategory,
    /// Upload parts in display order.
    pub parts: Vec<StagedPart>,
}

/// Removals and new uploads for one category of an edit submission.
#[derive(Clone, Debug)]
pub struct CategoryDelta {
    /// Category the delta applies to.
    pub category: MediaCategory,
    /// Removal identifiers (baseline filenames) for the category.
    pub removed: Vec<String>,
    /// Newly staged upload parts for the category.
    pub added: Vec<StagedPart>,
}

/// Per-category media delta against the load-time baseline.
#[derive(Clone, Debug)]
pub struct MediaDelta {
    /// One delta per category, in fixed submission order.
    pub categories: Vec<CategoryDelta>,
}

impl MediaDelta {
    /// Removal filenames recorded for `category`.
    #[must_use]
    pub fn removed_for(&self, category: MediaCategory) -> &[String] {
        self.categories
            .iter()
            .find(|delta| delta.category == category)
            .map_or(&[], |delta| delta.removed.as_slice())
    }

    /// Names of the upload parts recorded for `category`.
    #[must_use]
    pub fn added_names_for(&self, category: MediaCategory) -> Vec<&str> {
        self.categories
            .iter()
            .find(|delta| delta.category == category)
            .map_or_else(Vec::new, |delta| {
                delta.added.iter().map(|part| part.name.as_str()).collect()
            })
    }

    /// True when no category records a removal or an upload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories
            .iter()
            .all(|delta| delta.removed.is_empty() && delta.added.is_empty())
    }
}

/// Multipart body for the create endpoint.
#[derive(Clone, Debug)]
pub struct CreateSubmission {
    /// Language fields to send as multipart text parts.
    pub metadata: MetadataUpdate,
    /// Staged uploads per category, in fixed order: images, videos, others.
    pub uploads: Vec<CategoryUploads>,
}

/// Request pair for the two-phase edit save.
#[derive(Clone, Debug)]
pub struct EditSubmission {
    /// Identity of the block under edit.
    pub block_id: BlockId,
    /// Structured payload for the metadata endpoint.
    pub metadata: MetadataUpdate,
    /// Multipart delta for the media endpoint.
    pub media: MediaDelta,
}

/// A staged save, ready for dispatch.
#[derive(Clone, Debug)]
pub enum PendingSave {
    /// Single-phase create submission.
    Create(CreateSubmission),
    /// Two-phase edit submission.
    Edit(EditSubmission),
}

/// Boundary to the block write endpoints.
#[async_trait(?Send)]
pub trait BlockTransport {
    /// Issue the multipart create submission.
    async fn create_block(&self, submission: &CreateSubmission) -> Result<(), TransportError>;

    /// Issue the structured metadata payload for `block_id`.
    async fn update_metadata(
        &self,
        block_id: BlockId,
        payload: &MetadataUpdate,
    ) -> Result<(), TransportError>;

    /// Issue the multipart media delta for `block_id`.
    async fn update_media(
        &self,
        block_id: BlockId,
        delta: &MediaDelta,
    ) -> Result<(), TransportError>;
}

/// Validate preconditions and snapshot the session into a dispatchable
/// submission, setting the in-flight latch. No request is issued here.
///
/// # Errors
/// [`SaveError::SubmissionInFlight`] while a previous save has not
/// completed; [`SaveError::Validation`] when the primary-language title is
/// blank after trimming.
pub fn stage_submission(session: &mut EditorSession) -> Result<PendingSave, SaveError> {
    if session.in_flight() {
        return Err(SaveError::SubmissionInFlight);
    }
    let primary = Language::primary();
    if session.title(primary).trim().is_empty() {
        return Err(ValidationError::MissingPrimaryTitle { language: primary }.into());
    }

    let metadata = session.metadata();
    let pending = match session.block_id() {
        None => PendingSave::Create(CreateSubmission {
            metadata,
            uploads: MediaCategory::all()
                .into_iter()
                .map(|category| CategoryUploads {
                    category,
                    parts: session.staged_parts(category),
                })
                .collect(),
        }),
        Some(block_id) => PendingSave::Edit(EditSubmission {
            block_id,
            metadata,
            media: MediaDelta {
                categories: MediaCategory::all()
                    .into_iter()
                    .map(|category| CategoryDelta {
                        category,
                        removed: diff::compute_removals(
                            session.baseline_urls(category),
                            session.entries(category),
                        ),
                        added: session.staged_parts(category),
                    })
                    .collect(),
            },
        }),
    };
    session.start_submission();
    Ok(pending)
}

/// Dispatch a staged save over `transport`.
///
/// Create issues one request. Edit issues the metadata request first and
/// then the media request, unless `policy` aborts after a metadata failure.
pub async fn run_save<T: BlockTransport>(
    pending: &PendingSave,
    transport: &T,
    policy: SavePolicy,
) -> SaveOutcome {
    match pending {
        PendingSave::Create(submission) => SaveOutcome::Created {
            result: transport.create_block(submission).await,
        },
        PendingSave::Edit(submission) => {
            let metadata = transport
                .update_metadata(submission.block_id, &submission.metadata)
                .await;
            let media = if metadata.is_err() && policy == SavePolicy::AbortOnMetadataFailure {
                None
            } else {
                Some(
                    transport
                        .update_media(submission.block_id, &submission.media)
                        .await,
                )
            };
            SaveOutcome::Edited { metadata, media }
        }
    }
}

/// Result of a dispatched save.
#[derive(Clone, Debug)]
pub enum SaveOutcome {
    /// Outcome of the single create request.
    Created {
        /// Transport result of the create request.
        result: Result<(), TransportError>,
    },
    /// Outcomes of the edit request pair.
    Edited {
        /// Transport result of the metadata request.
        metadata: Result<(), TransportError>,
        /// Transport result of the media request; `None` when the policy
        /// skipped it.
        media: Option<Result<(), TransportError>>,
    },
}

impl SaveOutcome {
    /// True when every issued request succeeded and none was skipped.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Created { result } => result.is_ok(),
            Self::Edited { metadata, media } => {
                metadata.is_ok() && media.as_ref().is_some_and(|result| result.is_ok())
            }
        }
    }

    /// Operator-facing notice for this outcome.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Created { result: Ok(()) } => "Block saved".to_string(),
            Self::Created { result: Err(err) } => format!("Failed to save block: {err}"),
            Self::Edited {
                metadata: Err(err), ..
            } => format!("Failed to update block: {err}"),
            Self::Edited {
                media: Some(Err(err)),
                ..
            } => format!("Failed to update media: {err}"),
            Self::Edited { .. } => "Block updated".to_string(),
        }
    }
}

/// What the host view should do after a completed save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveDisposition {
    /// Create succeeded: present the fresh listing view.
    ResetToListing,
    /// Edit succeeded: reload the block from the server.
    ReloadBlock,
    /// The save failed: staged state was kept for retry.
    Retained,
}

/// Apply a dispatch outcome back to the session, clearing the latch.
///
/// A successful create resets the session to pristine create mode (staged
/// handles torn down); a successful edit leaves state for the host to reload
/// from the server; a failure keeps everything staged for retry.
///
/// # Errors
/// [`StoreError::HandleAlreadyReleased`] signals a defect during the reset
/// teardown.
pub fn complete_submission(
    session: &mut EditorSession,
    outcome: &SaveOutcome,
) -> Result<SaveDisposition, StoreError> {
    session.finish_submission();
    if !outcome.succeeded() {
        return Ok(SaveDisposition::Retained);
    }
    match outcome {
        SaveOutcome::Created { .. } => {
            session.reset()?;
            Ok(SaveDisposition::ResetToListing)
        }
        SaveOutcome::Edited { .. } => Ok(SaveDisposition::ReloadBlock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::StagedUpload;

    fn upload(name: &str, mime: &str) -> StagedUpload {
        StagedUpload::new(name, mime, format!("blob:panel/{name}"))
    }

    #[test]
    fn create_submissions_keep_the_fixed_category_order() {
        let mut session = EditorSession::new();
        session.set_title(Language::Ru, "Блок");
        session
            .add_files(MediaCategory::Video, vec![upload("v.mp4", "video/mp4")])
            .unwrap();

        let pending = stage_submission(&mut session).unwrap();
        let PendingSave::Create(submission) = pending else {
            panic!("expected a create submission");
        };
        let order: Vec<MediaCategory> = submission
            .uploads
            .iter()
            .map(|uploads| uploads.category)
            .collect();
        assert_eq!(order, MediaCategory::all());
        assert_eq!(submission.uploads[1].parts[0].name, "v.mp4");
        assert!(session.in_flight());
    }

    #[test]
    fn blank_primary_title_fails_validation_without_latching() {
        let mut session = EditorSession::new();
        session.set_title(Language::Ru, "   ");
        session.set_title(Language::En, "English only");

        let err = stage_submission(&mut session).unwrap_err();
        assert_eq!(
            err,
            SaveError::Validation(ValidationError::MissingPrimaryTitle {
                language: Language::Ru
            })
        );
        assert!(!session.in_flight());
    }

    #[test]
    fn second_staging_is_refused_while_in_flight() {
        let mut session = EditorSession::new();
        session.set_title(Language::Ru, "Блок");

        stage_submission(&mut session).unwrap();
        assert_eq!(
            stage_submission(&mut session).unwrap_err(),
            SaveError::SubmissionInFlight
        );
    }

    #[test]
    fn unmodified_edit_stages_an_empty_delta() {
        let mut session = EditorSession::new();
        let mut title = vitrina_api_models::LanguageMap::default();
        title.set(Language::Ru, "Блок");
        session
            .load_block(vitrina_api_models::BlockDetail {
                id: BlockId(2),
                title,
                content: vitrina_api_models::LanguageMap::default(),
                media: vitrina_api_models::MediaListing {
                    images: vec!["/uploads/images/a.png".to_string()],
                    ..vitrina_api_models::MediaListing::default()
                },
            })
            .unwrap();

        let pending = stage_submission(&mut session).unwrap();
        let PendingSave::Edit(submission) = pending else {
            panic!("expected an edit submission");
        };
        assert!(submission.media.is_empty());
    }

    #[test]
    fn outcome_notices_name_the_failed_phase() {
        let failed = SaveOutcome::Edited {
            metadata: Ok(()),
            media: Some(Err(TransportError::Status {
                status: 500,
                detail: None,
            })),
        };
        assert!(failed.notice().contains("media"));
        assert!(!failed.succeeded());

        let skipped = SaveOutcome::Edited {
            metadata: Err(TransportError::Request {
                detail: "offline".to_string(),
            }),
            media: None,
        };
        assert!(!skipped.succeeded());
    }
}
