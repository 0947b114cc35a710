//! Owned, revocable handles for locally staged media.

use crate::error::StoreError;
use std::cell::Cell;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo::file::ObjectUrl;

/// Lifecycle state of a staged resource handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseState {
    /// The backing resource is live and referenced by a preview.
    Live,
    /// The resource was released exactly once through the store.
    Released,
    /// The handle was dropped without an explicit release; a defect.
    Leaked,
}

/// Observer for a handle's release state, usable after the entry is gone.
#[derive(Clone, Debug)]
pub struct ReleaseProbe(Rc<Cell<ReleaseState>>);

impl ReleaseProbe {
    /// Current lifecycle state of the observed handle.
    #[must_use]
    pub fn state(&self) -> ReleaseState {
        self.0.get()
    }

    /// True once the handle was released exactly once.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.state() == ReleaseState::Released
    }

    /// True when the handle was dropped without an explicit release.
    #[must_use]
    pub fn is_leaked(&self) -> bool {
        self.state() == ReleaseState::Leaked
    }
}

/// Revocable local reference to binary content pending upload.
///
/// The store is the sole owner: it releases the handle exactly once, on
/// removal of the entry or on teardown. On wasm the handle owns the object
/// URL backing the preview and the browser `File` to upload; releasing
/// revokes the URL and frees the backing allocation.
pub struct ResourceHandle {
    preview_uri: String,
    state: Rc<Cell<ReleaseState>>,
    #[cfg(target_arch = "wasm32")]
    file: web_sys::File,
    #[cfg(target_arch = "wasm32")]
    object_url: Option<ObjectUrl>,
}

impl ResourceHandle {
    /// Stage a handle around an externally supplied preview locator.
    ///
    /// Browser callers go through [`ResourceHandle::from_file`] instead,
    /// which creates the object URL itself.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn staged(preview_uri: impl Into<String>) -> Self {
        Self {
            preview_uri: preview_uri.into(),
            state: Rc::new(Cell::new(ReleaseState::Live)),
        }
    }

    /// Stage a handle from a selected browser file, creating the revocable
    /// object URL that backs its preview.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_file(file: web_sys::File) -> Self {
        let object_url = ObjectUrl::from(gloo::file::File::from(file.clone()));
        Self {
            preview_uri: object_url.to_string(),
            state: Rc::new(Cell::new(ReleaseState::Live)),
            file,
            object_url: Some(object_url),
        }
    }

    /// Display locator for the staged preview.
    #[must_use]
    pub fn preview_uri(&self) -> &str {
        &self.preview_uri
    }

    /// Observer handle for release-state assertions.
    #[must_use]
    pub fn probe(&self) -> ReleaseProbe {
        ReleaseProbe(Rc::clone(&self.state))
    }

    /// Browser file backing the upload part.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn file(&self) -> &web_sys::File {
        &self.file
    }

    /// Release the backing resource, revoking the preview locator.
    ///
    /// # Errors
    /// Returns [`StoreError::HandleAlreadyReleased`] on a second call; the
    /// repeat is a defect and leaves the handle untouched.
    pub fn release(&mut self) -> Result<(), StoreError> {
        if self.state.get() != ReleaseState::Live {
            return Err(StoreError::HandleAlreadyReleased);
        }
        self.state.set(ReleaseState::Released);
        #[cfg(target_arch = "wasm32")]
        drop(self.object_url.take());
        Ok(())
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        if self.state.get() == ReleaseState::Live {
            self.state.set(ReleaseState::Leaked);
        }
    }
}

impl Debug for ResourceHandle {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ResourceHandle")
            .field("preview_uri", &self.preview_uri)
            .field("state", &self.state.get())
            .finish()
    }
}

/// File selection captured from the operator, pending category validation.
#[derive(Debug)]
pub struct StagedUpload {
    /// Original file name.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Owned resource backing the preview and the upload payload.
    pub resource: ResourceHandle,
}

#[cfg(not(target_arch = "wasm32"))]
impl StagedUpload {
    /// Build an upload with an externally supplied preview locator.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        preview_uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            resource: ResourceHandle::staged(preview_uri),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<web_sys::File> for StagedUpload {
    fn from(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            resource: ResourceHandle::from_file(file),
        }
    }
}
