//! End-to-end editor flows over a recording transport.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use vitrina_api_models::{BlockDetail, BlockId, Language, LanguageMap, MediaListing, MetadataUpdate};
use vitrina_panel::error::TransportError;
use vitrina_panel::media::{MediaCategory, StagedUpload};
use vitrina_panel::session::EditorSession;
use vitrina_panel::sync::{
    self, BlockTransport, CreateSubmission, MediaDelta, PendingSave, SaveDisposition, SavePolicy,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Call {
    Create,
    Metadata,
    Media,
}

#[derive(Default)]
struct RecordingTransport {
    calls: RefCell<Vec<Call>>,
    last_create: RefCell<Option<CreateSubmission>>,
    last_metadata: RefCell<Option<(BlockId, MetadataUpdate)>>,
    last_media: RefCell<Option<(BlockId, MediaDelta)>>,
    fail_create: Cell<bool>,
    fail_metadata: Cell<bool>,
    fail_media: Cell<bool>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self::default()
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn failure() -> TransportError {
        TransportError::Status {
            status: 500,
            detail: Some("boom".to_string()),
        }
    }
}

#[async_trait(?Send)]
impl BlockTransport for RecordingTransport {
    async fn create_block(&self, submission: &CreateSubmission) -> Result<(), TransportError> {
        self.calls.borrow_mut().push(Call::Create);
        *self.last_create.borrow_mut() = Some(submission.clone());
        if self.fail_create.get() {
            return Err(Self::failure());
        }
        Ok(())
    }

    async fn update_metadata(
        &self,
        block_id: BlockId,
        payload: &MetadataUpdate,
    ) -> Result<(), TransportError> {
        self.calls.borrow_mut().push(Call::Metadata);
        *self.last_metadata.borrow_mut() = Some((block_id, payload.clone()));
        if self.fail_metadata.get() {
            return Err(Self::failure());
        }
        Ok(())
    }

    async fn update_media(
        &self,
        block_id: BlockId,
        delta: &MediaDelta,
    ) -> Result<(), TransportError> {
        self.calls.borrow_mut().push(Call::Media);
        *self.last_media.borrow_mut() = Some((block_id, delta.clone()));
        if self.fail_media.get() {
            return Err(Self::failure());
        }
        Ok(())
    }
}

fn upload(name: &str, mime: &str) -> StagedUpload {
    StagedUpload::new(name, mime, format!("blob:panel/{name}"))
}

fn loaded_session() -> EditorSession {
    let mut session = EditorSession::new();
    let mut title = LanguageMap::default();
    title.set(Language::Ru, "Блок");
    session
        .load_block(BlockDetail {
            id: BlockId(9),
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

#[tokio::test]
async fn edit_save_sends_removals_and_new_files_only() {
    let mut session = loaded_session();

    // Remove the first server image, then stage a fresh local file.
    session.remove_at(MediaCategory::Image, 0).unwrap();
    let report = session
        .add_files(MediaCategory::Image, vec![upload("z.jpg", "image/jpeg")])
        .unwrap();
    assert!(!report.rejected_any());

    let pending = sync::stage_submission(&mut session).unwrap();
    let transport = RecordingTransport::new();
    let outcome = sync::run_save(&pending, &transport, SavePolicy::default()).await;

    assert!(outcome.succeeded());
    assert_eq!(transport.calls(), vec![Call::Metadata, Call::Media]);

    let (block_id, delta) = transport.last_media.borrow().clone().unwrap();
    assert_eq!(block_id, BlockId(9));
    assert_eq!(delta.removed_for(MediaCategory::Image), ["x.jpg".to_string()]);
    assert_eq!(delta.added_names_for(MediaCategory::Image), vec!["z.jpg"]);

    // The untouched server entry is neither removed nor re-uploaded.
    for category in MediaCategory::all() {
        assert!(!delta
            .removed_for(category)
            .iter()
            .any(|name| name == "y.jpg"));
        assert!(!delta
            .added_names_for(category)
            .iter()
            .any(|name| *name == "y.jpg"));
    }

    let disposition = sync::complete_submission(&mut session, &outcome).unwrap();
    assert_eq!(disposition, SaveDisposition::ReloadBlock);
    assert!(!session.in_flight());
}

#[tokio::test]
async fn create_save_resets_the_session_and_releases_handles() {
    let mut session = EditorSession::new();
    session.set_title(Language::Ru, "Новый блок");
    session
        .add_files(MediaCategory::Image, vec![upload("a.png", "image/png")])
        .unwrap();
    let probe = session.entries(MediaCategory::Image)[0].probe().unwrap();

    let pending = sync::stage_submission(&mut session).unwrap();
    let transport = RecordingTransport::new();
    let outcome = sync::run_save(&pending, &transport, SavePolicy::default()).await;

    assert!(outcome.succeeded());
    assert_eq!(transport.calls(), vec![Call::Create]);
    let submission = transport.last_create.borrow().clone().unwrap();
    assert_eq!(
        submission.metadata.title.get(Language::Ru),
        Some("Новый блок")
    );

    let disposition = sync::complete_submission(&mut session, &outcome).unwrap();
    assert_eq!(disposition, SaveDisposition::ResetToListing);
    assert!(probe.is_released());
    assert!(session.entries(MediaCategory::Image).is_empty());
    assert!(!session.is_editing());
}

#[tokio::test]
async fn metadata_failure_skips_media_under_the_default_policy() {
    let mut session = loaded_session();
    session.remove_at(MediaCategory::Image, 0).unwrap();

    let pending = sync::stage_submission(&mut session).unwrap();
    let transport = RecordingTransport::new();
    transport.fail_metadata.set(true);

    let outcome = sync::run_save(&pending, &transport, SavePolicy::AbortOnMetadataFailure).await;
    assert!(!outcome.succeeded());
    assert_eq!(transport.calls(), vec![Call::Metadata]);

    let disposition = sync::complete_submission(&mut session, &outcome).unwrap();
    assert_eq!(disposition, SaveDisposition::Retained);
    // Staged state is preserved for retry.
    assert_eq!(session.entries(MediaCategory::Image).len(), 1);
}

#[tokio::test]
async fn legacy_policy_issues_media_after_metadata_failure() {
    let mut session = loaded_session();

    let pending = sync::stage_submission(&mut session).unwrap();
    let transport = RecordingTransport::new();
    transport.fail_metadata.set(true);

    let outcome = sync::run_save(
        &pending,
        &transport,
        SavePolicy::ProceedAfterMetadataFailure,
    )
    .await;
    assert!(!outcome.succeeded());
    assert_eq!(transport.calls(), vec![Call::Metadata, Call::Media]);
    sync::complete_submission(&mut session, &outcome).unwrap();
}

#[tokio::test]
async fn transport_failure_keeps_staged_state_for_retry() {
    let mut session = EditorSession::new();
    session.set_title(Language::Ru, "Блок");
    session
        .add_files(MediaCategory::Other, vec![upload("doc.pdf", "application/pdf")])
        .unwrap();
    let probe = session.entries(MediaCategory::Other)[0].probe().unwrap();

    let pending = sync::stage_submission(&mut session).unwrap();
    let transport = RecordingTransport::new();
    transport.fail_create.set(true);

    let outcome = sync::run_save(&pending, &transport, SavePolicy::default()).await;
    assert!(!outcome.succeeded());
    assert!(outcome.notice().contains("Failed to save block"));

    let disposition = sync::complete_submission(&mut session, &outcome).unwrap();
    assert_eq!(disposition, SaveDisposition::Retained);
    assert!(!probe.is_released());
    assert_eq!(session.entries(MediaCategory::Other).len(), 1);

    // The latch is clear again; a retry can be staged.
    assert!(!session.in_flight());
    sync::stage_submission(&mut session).unwrap();
}

#[tokio::test]
async fn in_flight_latch_refuses_a_second_submission() {
    let mut session = loaded_session();

    let pending = sync::stage_submission(&mut session).unwrap();
    assert!(sync::stage_submission(&mut session).is_err());

    let transport = RecordingTransport::new();
    let outcome = sync::run_save(&pending, &transport, SavePolicy::default()).await;
    sync::complete_submission(&mut session, &outcome).unwrap();

    // Completion releases the latch even on the success path.
    let PendingSave::Edit(_) = sync::stage_submission(&mut session).unwrap() else {
        panic!("expected an edit submission after reload");
    };
}

#[tokio::test]
async fn media_failure_is_reported_and_retained() {
    let mut session = loaded_session();
    session.remove_at(MediaCategory::Image, 1).unwrap();

    let pending = sync::stage_submission(&mut session).unwrap();
    let transport = RecordingTransport::new();
    transport.fail_media.set(true);

    let outcome = sync::run_save(&pending, &transport, SavePolicy::default()).await;
    assert!(!outcome.succeeded());
    assert!(outcome.notice().contains("Failed to update media"));

    let disposition = sync::complete_submission(&mut session, &outcome).unwrap();
    assert_eq!(disposition, SaveDisposition::Retained);
}
