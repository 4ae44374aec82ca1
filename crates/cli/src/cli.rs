//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use contracts::Target;
use std::path::PathBuf;

/// pieces-verify - formatting, tests, coverage and docs cleanup for `pieces`
#[derive(Parser, Debug)]
#[command(
    name = "pieces-verify",
    author,
    version,
    about = "Quality pipeline for the pieces number theory package",
    long_about = "Runs the project's quality targets: source formatting, the test suite \n\
                  with embedded examples, scoped coverage and documentation cleanup.\n\n\
                  The exit status of a target is the exit status of its first failing tool."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        env = "PIECES_VERIFY_VERBOSE"
    )]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "PIECES_VERIFY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Path to configuration file (TOML or JSON), relative to the root.
    /// Built-in defaults apply when it does not exist.
    #[arg(
        short,
        long,
        default_value = "verify.toml",
        global = true,
        env = "PIECES_VERIFY_CONFIG"
    )]
    pub config: PathBuf,

    /// Project root every configured path is resolved against
    #[arg(long, default_value = ".", global = true, env = "PIECES_VERIFY_ROOT")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration path with relative paths taken from `--root`
    pub fn config_path(&self) -> PathBuf {
        if self.config.is_absolute() {
            self.config.clone()
        } else {
            self.root.join(&self.config)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Default target, same as `format`
    All(TargetArgs),

    /// Sort imports, then reformat sources and tests in place
    Format(TargetArgs),

    /// Run the test suite and embedded examples
    Tests(TargetArgs),

    /// Run the tests under coverage and write the scoped report
    Coverage(TargetArgs),

    /// Clean built documentation
    Clean(TargetArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display resolved layout and tool commands
    Info(InfoArgs),
}

impl Commands {
    /// Pipeline target for target commands
    pub fn target(&self) -> Option<(Target, &TargetArgs)> {
        match self {
            Commands::All(args) => Some((Target::All, args)),
            Commands::Format(args) => Some((Target::Format, args)),
            Commands::Tests(args) => Some((Target::Tests, args)),
            Commands::Coverage(args) => Some((Target::Coverage, args)),
            Commands::Clean(args) => Some((Target::Clean, args)),
            Commands::Validate(_) | Commands::Info(_) => None,
        }
    }
}

/// Arguments shared by target commands
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also list the files per-file tools would receive
    #[arg(long)]
    pub files: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_target_commands() {
        let cli = Cli::try_parse_from(["pieces-verify", "coverage", "--json"]).unwrap();
        let (target, args) = cli.command.target().unwrap();
        assert_eq!(target, Target::Coverage);
        assert!(args.json);

        let cli = Cli::try_parse_from(["pieces-verify", "validate"]).unwrap();
        assert!(cli.command.target().is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pieces-verify",
            "clean",
            "--root",
            "/work",
            "--config",
            "ci.toml",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config_path(), PathBuf::from("/work/ci.toml"));
    }

    #[test]
    fn test_absolute_config_ignores_root() {
        let cli = Cli::try_parse_from([
            "pieces-verify",
            "--root",
            "/work",
            "--config",
            "/etc/verify.toml",
            "all",
        ])
        .unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/etc/verify.toml"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let parsed = Cli::try_parse_from(["pieces-verify", "-q", "-v", "tests"]);
        assert!(parsed.is_err());
    }
}
