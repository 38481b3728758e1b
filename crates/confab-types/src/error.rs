use thiserror::Error;

/// Errors from session store operations (used by trait definitions in
/// confab-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the external generation capability.
///
/// Every variant is treated identically by the response engine: the
/// failure is swallowed and the rule-based path takes over. The taxonomy
/// exists for logging, not for control flow.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation disabled")]
    Disabled,

    #[error("http request failed: {0}")]
    Http(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}
