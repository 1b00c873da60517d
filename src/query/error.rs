//! Query string error types
//!
//! Defines the conditions under which a page's query string cannot be
//! turned into request parameters.

use thiserror::Error;

/// Errors that can occur while parsing a page query string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A required parameter was absent or empty
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter was present but its value is not acceptable
    #[error("Invalid value '{value}' for parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A key or value was not valid percent-encoded UTF-8
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for query string operations
pub type QueryResult<T> = Result<T, QueryError>;
