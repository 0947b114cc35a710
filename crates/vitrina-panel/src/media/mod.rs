//! Staged and server-resident media for one editing session.
//!
//! Each category owns an ordered collection of [`MediaEntry`] values; order
//! is the display and slider-navigation order. Entries staged locally own a
//! revocable [`ResourceHandle`]; entries loaded from the server carry their
//! stored URL and no local resource. The store is the sole owner of staged
//! handles and releases each exactly once.

mod category;
mod cursor;
mod entry;
mod handle;
mod store;

pub use category::MediaCategory;
pub use cursor::{SlideCursor, SlideDirection};
pub use entry::{MediaEntry, StagedPart};
pub use handle::{ReleaseProbe, ReleaseState, ResourceHandle, StagedUpload};
pub use store::{AddReport, MediaStore};
