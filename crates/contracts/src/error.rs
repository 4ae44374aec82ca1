//! Layered error definitions
//!
//! Categorized by source: config / tool / coverage

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Tool Errors =====
    /// Tool could not be started at all (missing binary, permissions)
    #[error("failed to launch '{program}': {message}")]
    ToolLaunch { program: String, message: String },

    /// Placeholder in tool arguments has no value in this context
    #[error("unresolved placeholder '{placeholder}' in arguments of '{program}'")]
    UnresolvedPlaceholder { program: String, placeholder: String },

    // ===== Coverage Errors =====
    /// Coverage artifact could not be parsed
    #[error("coverage artifact '{path}' is malformed: {message}")]
    CoverageArtifact { path: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create tool launch error
    pub fn tool_launch(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolLaunch {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create coverage artifact error
    pub fn coverage_artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CoverageArtifact {
            path: path.into(),
            message: message.into(),
        }
    }
}
