//! Verifier error types

use std::path::PathBuf;

use contracts::ContractError;
use thiserror::Error;

/// Verifier-specific errors
///
/// A failing tool is not an error: it is reported through `TargetReport`.
/// These cover the pipeline's own machinery.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Source discovery failed
    #[error("failed to walk '{path}': {message}")]
    Discovery { path: PathBuf, message: String },

    /// Filesystem error on a pipeline artifact
    #[error("io error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl VerifyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, VerifyError>;
