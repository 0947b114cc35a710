//! Media entries staged locally or loaded from the server.

use super::handle::{ReleaseProbe, ResourceHandle, StagedUpload};
use crate::diff;
use crate::error::StoreError;
use uuid::Uuid;

/// One media item in a category collection.
///
/// Entries staged this session own a [`ResourceHandle`]; entries loaded from
/// the server carry their stored URL and no local resource. The preview
/// locator is valid for display for the entry's whole lifetime.
#[derive(Debug)]
pub struct MediaEntry {
    id: Uuid,
    name: String,
    preview_uri: String,
    resource: Option<ResourceHandle>,
}

impl MediaEntry {
    /// Wrap a validated upload as a staged entry.
    #[must_use]
    pub fn staged(upload: StagedUpload) -> Self {
        let preview_uri = upload.resource.preview_uri().to_string();
        Self {
            id: Uuid::new_v4(),
            name: upload.name,
            preview_uri,
            resource: Some(upload.resource),
        }
    }

    /// Wrap a server-stored URL as a resource-less entry.
    #[must_use]
    pub fn server_origin(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: Uuid::new_v4(),
            name: diff::trailing_segment(&url).to_string(),
            preview_uri: url,
            resource: None,
        }
    }

    /// Stable identifier for display bookkeeping.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// File name shown to the operator and sent as the multipart filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display locator: local object URL for staged entries, the stored
    /// server URL otherwise.
    #[must_use]
    pub fn preview_uri(&self) -> &str {
        &self.preview_uri
    }

    /// True when the entry was staged this session and owns a resource.
    #[must_use]
    pub const fn is_staged(&self) -> bool {
        self.resource.is_some()
    }

    /// Release-state observer for the owned resource, if any.
    #[must_use]
    pub fn probe(&self) -> Option<ReleaseProbe> {
        self.resource.as_ref().map(ResourceHandle::probe)
    }

    /// Upload part for a submission body; `None` for server-origin entries,
    /// which are never re-uploaded.
    #[must_use]
    pub fn staged_part(&self) -> Option<StagedPart> {
        self.resource
            .as_ref()
            .map(|resource| self.part_from(resource))
    }

    #[cfg(target_arch = "wasm32")]
    fn part_from(&self, resource: &ResourceHandle) -> StagedPart {
        StagedPart {
            name: self.name.clone(),
            file: resource.file().clone(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn part_from(&self, resource: &ResourceHandle) -> StagedPart {
        let _ = resource;
        StagedPart {
            name: self.name.clone(),
        }
    }

    /// Release the owned resource through the store.
    pub(crate) fn release_resource(&mut self) -> Result<(), StoreError> {
        match self.resource.as_mut() {
            Some(handle) => handle.release(),
            None => Ok(()),
        }
    }
}

/// Upload part extracted from a staged entry for a submission body.
#[derive(Clone, Debug)]
pub struct StagedPart {
    /// Multipart filename for the part.
    pub name: String,
    /// Browser file payload appended to the form.
    #[cfg(target_arch = "wasm32")]
    pub file: web_sys::File,
}
