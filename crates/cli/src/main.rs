//! # pieces-verify
//!
//! Command-line entry point for the verification pipeline.
//!
//! Provides:
//! - the quality targets (`all`, `format`, `tests`, `coverage`, `clean`)
//! - configuration validation and inspection
//!
//! The process exit code of a target is the exit code of its first failing
//! tool, so callers can tell a test failure from a formatter failure.

mod cli;
mod commands;
mod error;
mod report;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_target, run_validate};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(ObservabilityConfig::from_verbosity(
        cli.verbose,
        cli.quiet,
        cli.log_format.into(),
    ))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "pieces-verify starting"
    );

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(&cli, args).map(|()| 0),
        Commands::Info(args) => run_info(&cli, args).map(|()| 0),
        command => match command.target() {
            Some((target, args)) => run_target(&cli, target, args).await,
            None => Ok(0),
        },
    };

    match result {
        Ok(code) => Ok(ExitCode::from(exit_status(code))),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Err(e)
        }
    }
}

/// Tool exit codes outside `0..=255` collapse to 1
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
