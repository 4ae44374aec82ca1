//! Configuration validation
//!
//! Rules:
//! - Field rules declared on the contract types (non-empty program, extensions)
//! - source_dir and tests_dir differ
//! - extensions are bare (no leading dot, no separators)
//! - `{file}` only appears in the rewriting tools
//! - coverage lcov_path and report_path differ

use contracts::{ContractError, PipelineBlueprint, ToolSpec, PLACEHOLDER_FILE};
use ::validator::Validate;

/// Validate a PipelineBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    validate_fields(blueprint)?;
    validate_layout(blueprint)?;
    validate_per_file_usage(blueprint)?;
    validate_coverage_paths(blueprint)?;
    Ok(())
}

/// Declarative field rules
fn validate_fields(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    blueprint
        .validate()
        .map_err(|e| ContractError::config_validation("blueprint", e.to_string()))
}

fn validate_layout(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let layout = &blueprint.layout;

    if layout.source_dir == layout.tests_dir {
        return Err(ContractError::config_validation(
            "layout.source_dir / layout.tests_dir",
            format!(
                "source_dir and tests_dir must differ, both are '{}'",
                layout.source_dir.display()
            ),
        ));
    }

    for (idx, ext) in layout.extensions.iter().enumerate() {
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(ContractError::config_validation(
                format!("layout.extensions[{idx}]"),
                format!("extension must be bare like \"rs\", got \"{ext}\""),
            ));
        }
    }

    Ok(())
}

/// Only the rewriting steps walk source files
fn validate_per_file_usage(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let tools = &blueprint.tools;
    let single_shot: [(&str, &ToolSpec); 3] = [
        ("tools.test_runner", &tools.test_runner),
        ("tools.coverage", &tools.coverage),
        ("tools.docs_clean", &tools.docs_clean),
    ];

    for (field, spec) in single_shot {
        if spec.is_per_file() {
            return Err(ContractError::config_validation(
                format!("{field}.args"),
                format!("{PLACEHOLDER_FILE} is only supported for import_sort and formatter"),
            ));
        }
    }
    Ok(())
}

fn validate_coverage_paths(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let coverage = &blueprint.coverage;
    if coverage.lcov_path == coverage.report_path {
        return Err(ContractError::config_validation(
            "coverage.report_path",
            "report_path must differ from lcov_path",
        ));
    }
    Ok(())
}
