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
#![allow(clippy::multiple_crate_versions)]
//! Browser-side editor session for Vitrina content blocks.
//!
//! The panel stages multilingual text and attached media for one block at a
//! time, navigates image/video sliders, and synchronizes edits with the
//! server by diffing the staged collections against the media baseline
//! captured at load. State modules are pure and testable outside wasm; the
//! gloo-backed HTTP transport lives behind [`services`] on wasm32.

pub mod diff;
pub mod display;
pub mod error;
pub mod indicator;
pub mod media;
pub mod session;
pub mod sync;

#[cfg(target_arch = "wasm32")]
pub mod services;

pub use vitrina_api_models as api_models;
