//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::PipelineBlueprint;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cli::{Cli, ValidateArgs};

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    /// False when built-in defaults were validated
    config_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    source_dir: String,
    tests_dir: String,
    docs_dir: String,
    extensions: Vec<String>,
    per_file_tools: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(cli: &Cli, args: &ValidateArgs) -> Result<()> {
    let config = cli.config_path();
    info!(config = %config.display(), "Validating configuration");

    let result = validate_config(&config, &cli.root);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{json}");
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(config: &Path, root: &Path) -> ValidationResult {
    let config_path = config.display().to_string();
    let config_found = config.exists();

    match config_loader::ConfigLoader::load_or_default(config) {
        Ok(blueprint) => {
            let mut warnings = collect_warnings(&blueprint, root);
            if !config_found {
                warnings.insert(0, "File not found - built-in defaults apply".to_string());
            }
            ValidationResult {
                valid: true,
                config_path,
                config_found,
                error: None,
                warnings,
                summary: Some(summarize(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            config_found,
            error: Some(e.to_string()),
            warnings: Vec::new(),
            summary: None,
        },
    }
}

fn summarize(blueprint: &PipelineBlueprint) -> ConfigSummary {
    let tools = &blueprint.tools;
    let per_file_tools = [
        ("import_sort", &tools.import_sort),
        ("formatter", &tools.formatter),
    ]
    .into_iter()
    .filter(|(_, spec)| spec.is_per_file())
    .map(|(name, _)| name.to_string())
    .collect();

    ConfigSummary {
        version: format!("{:?}", blueprint.version),
        source_dir: blueprint.layout.source_dir.display().to_string(),
        tests_dir: blueprint.layout.tests_dir.display().to_string(),
        docs_dir: blueprint.layout.docs_dir.display().to_string(),
        extensions: blueprint.layout.extensions.clone(),
        per_file_tools,
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &PipelineBlueprint, root: &Path) -> Vec<String> {
    let layout = &blueprint.layout;
    [
        ("source_dir", &layout.source_dir),
        ("tests_dir", &layout.tests_dir),
        ("docs_dir", &layout.docs_dir),
    ]
    .into_iter()
    .filter(|(_, dir)| !root.join(dir).is_dir())
    .map(|(name, dir)| {
        format!(
            "layout.{name} '{}' does not exist under the root",
            dir.display()
        )
    })
    .collect()
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Sources: {}", summary.source_dir);
            println!("  Tests: {}", summary.tests_dir);
            println!("  Docs: {}", summary.docs_dir);
            println!("  Extensions: {}", summary.extensions.join(", "));
            if !summary.per_file_tools.is_empty() {
                println!("  Per-file tools: {}", summary.per_file_tools.join(", "));
            }
        }

        if !result.warnings.is_empty() {
            println!("\n⚠ Warnings:");
            for warning in &result.warnings {
                println!("  - {warning}");
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {error}");
        }
    }
}
