//! Configuration parsing
//!
//! Supports TOML (primary) and JSON.

use contracts::{ContractError, PipelineBlueprint};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<PipelineBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<PipelineBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<PipelineBlueprint, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_toml_python_layout() {
        let content = r#"
[layout]
source_dir = "pieces"
tests_dir = "tests"
extensions = ["py"]

[tools.import_sort]
program = "isort"
args = ["{source}", "{tests}"]

[tools.formatter]
program = "black"
args = ["{source}", "{tests}"]

[tools.test_runner]
program = "pytest"
args = ["--doctest-modules", "{source}", "{tests}"]
"#;
        let bp = parse_toml(content).unwrap();
        assert_eq!(bp.layout.extensions, vec!["py".to_string()]);
        assert_eq!(bp.tools.import_sort.program, "isort");
        assert!(!bp.tools.formatter.is_per_file());
        assert_eq!(bp.tools.test_runner.args[0], "--doctest-modules");
        // Untouched sections keep their defaults
        assert_eq!(bp.tools.docs_clean.program, "make");
        assert_eq!(bp.layout.docs_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "layout": { "source_dir": "crates/pieces" },
            "tools": { "docs_clean": { "program": "cargo", "args": ["clean", "--doc"] } }
        }"#;
        let bp = parse_json(content).unwrap();
        assert_eq!(bp.layout.source_dir, PathBuf::from("crates/pieces"));
        assert_eq!(bp.tools.docs_clean.command_line(), "cargo clean --doc");
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_tool_without_program_is_rejected() {
        let content = r#"
[tools.formatter]
args = ["{file}"]
"#;
        assert!(parse_toml(content).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        let format = ConfigFormat::from_extension;
        assert_eq!(format("toml"), Some(ConfigFormat::Toml));
        assert_eq!(format("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(format("json"), Some(ConfigFormat::Json));
        assert_eq!(format("yaml"), None);
    }
}
