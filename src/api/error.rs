//! Fetch Error Types
//!
//! Everything that can go wrong between issuing a GET to the backend and
//! holding a decoded response body.

use thiserror::Error;

/// Longest slice of an error body kept for diagnostics
const MAX_ERROR_BODY: usize = 200;

/// Errors that can occur while fetching from the backend
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Build a status error, keeping only the start of the body
    pub fn status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_ERROR_BODY) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        FetchError::Status { status, body }
    }

    /// True when the backend answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
