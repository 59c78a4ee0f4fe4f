//! Error types for the loader.

use mvcs_db::DbError;
use mvcs_model::{AssociationKind, ModelError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors that abort a load. No partially wired registry is ever returned.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// IO error while listing or reading model files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A model file is not valid TOML or does not match the expected layout.
    #[error("invalid model file {}: {source}", .path.display())]
    InvalidModelFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Loader configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An association names a model that was never discovered.
    #[error("{model}.{kind} references unknown model `{target}`")]
    UnknownModel {
        model: String,
        target: String,
        kind: AssociationKind,
    },

    /// The wiring order lists the same kind twice.
    #[error("association kind `{0}` appears more than once in the wiring order")]
    DuplicateKind(AssociationKind),

    /// Associations of this kind were declared but the wiring order omits it.
    #[error("association kind `{0}` was declared but is missing from the wiring order")]
    UnorderedKind(AssociationKind),

    /// A model definition was rejected while being built from a file.
    #[error("invalid model `{model}`: {source}")]
    Model { model: String, source: ModelError },

    /// The model refused an association while it was being applied.
    #[error("failed to apply {model}.{kind}({target}): {source}")]
    Association {
        model: String,
        target: String,
        kind: AssociationKind,
        source: ModelError,
    },

    /// Transaction manager failure surfaced through `with_transaction`.
    #[error("transaction error: {0}")]
    Transaction(#[from] DbError),
}
