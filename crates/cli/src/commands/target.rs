//! Target commands: `all`, `format`, `tests`, `coverage`, `clean`.

use anyhow::{Context, Result};
use contracts::Target;
use runner::ProcessRunner;
use tracing::{error, info};
use verifier::VerificationPipeline;

use super::{load_blueprint, project_root};
use crate::cli::{Cli, TargetArgs};
use crate::report::print_report;

/// Execute a target, returning the process exit code
pub async fn run_target(cli: &Cli, target: Target, args: &TargetArgs) -> Result<i32> {
    let root = project_root(&cli.root)?;
    let config = cli.config_path();
    let blueprint = load_blueprint(&config)
        .with_context(|| format!("Failed to load config from {}", config.display()))?;

    let pipeline = VerificationPipeline::new(blueprint, root, ProcessRunner::new());
    let report = pipeline
        .run(target)
        .await
        .with_context(|| format!("Target '{target}' could not run"))?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    let code = report.exit_code();
    if code == 0 {
        info!(target = %target, "Target passed");
    } else {
        error!(
            target = %target,
            exit_code = code,
            outcome = ?report.outcome(),
            "Target failed"
        );
    }
    Ok(code)
}
