//! Render error types

use thiserror::Error;

/// Errors that can occur while applying a view to a page shell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The page shell has no element with this id
    #[error("Missing container: #{0}")]
    MissingContainer(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
