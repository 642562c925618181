//! Frontend Errors
//!
//! Every handler fails on its own; these are logged and never abort the page.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    /// Server answered with a non-2xx status
    #[error("server responded with status {0}")]
    Status(u16),

    /// Response body was not the JSON we expected
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// An element id the page should have rendered is absent
    #[error("missing element #{0}")]
    MissingElement(String),

    /// The browser rejected a DOM operation
    #[error("dom error: {0}")]
    Dom(String),

    /// fetch rejected (offline, CORS, aborted by the browser)
    #[error("network error: {0}")]
    Transport(String),

    /// Injected configuration could not be read
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for UiError {
    fn from(e: serde_json::Error) -> Self {
        UiError::Parse(e.to_string())
    }
}
