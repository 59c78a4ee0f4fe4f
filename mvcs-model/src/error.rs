//! Error types for model operations.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors a model can raise while an association is applied to it.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An association option has the wrong shape (e.g. a non-string `as`).
    #[error("invalid association options: {0}")]
    InvalidOptions(String),

    /// An attribute with the same name is already defined.
    #[error("duplicate attribute: {0}")]
    DuplicateAttribute(String),
}
