//! Error types for CLI operations.

use std::path::PathBuf;

use contracts::ContractError;
use thiserror::Error;
use verifier::VerifyError;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Project root missing or not a directory
    #[error("Project root not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// Explicitly requested configuration file is missing
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ContractError),

    /// Pipeline infrastructure error
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

impl CliError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
