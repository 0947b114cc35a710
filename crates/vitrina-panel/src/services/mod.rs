//! Browser-side service layer (wasm32 only).

pub mod api;

use gloo::dialogs::alert;

/// Surface an operator notice as a blocking browser dialog.
pub fn notify(message: &str) {
    alert(message);
}
