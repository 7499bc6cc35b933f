//! Error Types
//!
//! Failures of the ballot layer. None of them are fatal to the page.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("Server returned {0}")]
    Status(u16),
    #[error("CSRF token is missing")]
    MissingCsrf,
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Page structure error: {0}")]
    Dom(String),
    #[error("Invalid ballot configuration: {0}")]
    Config(String),
}

impl SyncError {
    /// Wrap a rejected browser promise or failed web-sys call
    pub fn network(err: JsValue) -> Self {
        SyncError::Network(js_message(&err))
    }

    pub fn dom(err: JsValue) -> Self {
        SyncError::Dom(js_message(&err))
    }
}

/// Best-effort readable text for a thrown JS value
fn js_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => format!("{:?}", err),
    }
}
