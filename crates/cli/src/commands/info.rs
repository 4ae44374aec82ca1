//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{PipelineBlueprint, ToolSpec};
use runner::ProcessRunner;
use serde::Serialize;
use tracing::info;
use verifier::VerificationPipeline;

use super::{load_blueprint, project_root};
use crate::cli::{Cli, InfoArgs};

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    root: String,
    config: String,
    layout: LayoutInfo,
    tools: Vec<ToolInfo>,
    coverage: CoverageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<String>>,
}

#[derive(Serialize)]
struct LayoutInfo {
    source_dir: String,
    tests_dir: String,
    docs_dir: String,
    extensions: Vec<String>,
}

#[derive(Serialize)]
struct ToolInfo {
    step: String,
    command: String,
    per_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    working_dir: Option<String>,
}

#[derive(Serialize)]
struct CoverageInfo {
    lcov_path: String,
    report_path: String,
}

/// Execute the `info` command
pub fn run_info(cli: &Cli, args: &InfoArgs) -> Result<()> {
    let root = project_root(&cli.root)?;
    let config = cli.config_path();
    info!(config = %config.display(), "Loading configuration info");

    let blueprint = load_blueprint(&config)
        .with_context(|| format!("Failed to load config from {}", config.display()))?;

    let files = if args.files {
        let pipeline = VerificationPipeline::new(blueprint.clone(), &root, ProcessRunner::new());
        let files = pipeline
            .source_files()
            .context("Failed to discover source files")?;
        Some(
            files
                .iter()
                .map(|f| f.strip_prefix(&root).unwrap_or(f).display().to_string())
                .collect(),
        )
    } else {
        None
    };

    let info = build_config_info(&blueprint, cli, files);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{json}");
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn tool_info(step: &str, spec: &ToolSpec) -> ToolInfo {
    ToolInfo {
        step: step.to_string(),
        command: spec.command_line(),
        per_file: spec.is_per_file(),
        working_dir: spec.working_dir.as_ref().map(|d| d.display().to_string()),
    }
}

fn build_config_info(
    blueprint: &PipelineBlueprint,
    cli: &Cli,
    files: Option<Vec<String>>,
) -> ConfigInfo {
    let tools = &blueprint.tools;
    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        root: cli.root.display().to_string(),
        config: cli.config_path().display().to_string(),
        layout: LayoutInfo {
            source_dir: blueprint.layout.source_dir.display().to_string(),
            tests_dir: blueprint.layout.tests_dir.display().to_string(),
            docs_dir: blueprint.layout.docs_dir.display().to_string(),
            extensions: blueprint.layout.extensions.clone(),
        },
        tools: vec![
            tool_info("import_sort", &tools.import_sort),
            tool_info("formatter", &tools.formatter),
            tool_info("test_runner", &tools.test_runner),
            tool_info("coverage", &tools.coverage),
            tool_info("docs_clean", &tools.docs_clean),
        ],
        coverage: CoverageInfo {
            lcov_path: blueprint.coverage.lcov_path.display().to_string(),
            report_path: blueprint.coverage.report_path.display().to_string(),
        },
        files,
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               pieces-verify Configuration                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📁 Layout");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ Root: {}", info.root);
    println!("   ├─ Config: {}", info.config);
    println!("   ├─ Sources: {}", info.layout.source_dir);
    println!("   ├─ Tests: {}", info.layout.tests_dir);
    println!("   ├─ Docs: {}", info.layout.docs_dir);
    println!("   └─ Extensions: {}", info.layout.extensions.join(", "));

    println!("\n🔧 Tools ({})", info.tools.len());
    for (i, tool) in info.tools.iter().enumerate() {
        let is_last = i == info.tools.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { " " } else { "│" };
        let scope = if tool.per_file { " [per file]" } else { "" };
        println!("   {} {}: {}{}", prefix, tool.step, tool.command, scope);
        if let Some(ref dir) = tool.working_dir {
            println!("   {}    in {}", child_prefix, dir);
        }
    }

    println!("\n📊 Coverage");
    println!("   ├─ Artifact: {}", info.coverage.lcov_path);
    println!("   └─ Scoped report: {}", info.coverage.report_path);

    if let Some(ref files) = info.files {
        println!("\n📄 Files ({})", files.len());
        for (i, file) in files.iter().enumerate() {
            let is_last = i == files.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            println!("   {prefix} {file}");
        }
    }

    println!();
}
