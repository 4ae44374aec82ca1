//! PipelineBlueprint - Config Loader output
//!
//! Describes the directory layout under verification and the external tool
//! behind every pipeline step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use validator::Validate;

/// Placeholder expanded to the source directory
pub const PLACEHOLDER_SOURCE: &str = "{source}";
/// Placeholder expanded to the tests directory
pub const PLACEHOLDER_TESTS: &str = "{tests}";
/// Placeholder expanded to the docs directory
pub const PLACEHOLDER_DOCS: &str = "{docs}";
/// Placeholder expanded to the raw coverage artifact path
pub const PLACEHOLDER_LCOV: &str = "{lcov}";
/// Placeholder expanded to a single source file; makes a tool per-file
pub const PLACEHOLDER_FILE: &str = "{file}";

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PipelineBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Directories the pipeline works on
    #[serde(default)]
    #[validate(nested)]
    pub layout: LayoutConfig,

    /// External tools, one per step
    #[serde(default)]
    #[validate(nested)]
    pub tools: ToolsConfig,

    /// Coverage artifact locations
    #[serde(default)]
    pub coverage: CoverageConfig,
}

/// Directory layout. Paths are relative to the project root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LayoutConfig {
    /// Package under verification
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Test suite directory
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,

    /// Documentation subproject
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Extensions of source files handed to per-file tools
    #[serde(default = "default_extensions")]
    #[validate(length(min = 1, message = "at least one source extension is required"))]
    pub extensions: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            tests_dir: default_tests_dir(),
            docs_dir: default_docs_dir(),
            extensions: default_extensions(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("pieces")
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("tests")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_extensions() -> Vec<String> {
    vec!["rs".to_string()]
}

/// Tool table
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToolsConfig {
    /// Import-statement ordering, runs before `formatter`
    #[serde(default = "default_import_sort")]
    #[validate(nested)]
    pub import_sort: ToolSpec,

    /// Code-style reformatting
    #[serde(default = "default_formatter")]
    #[validate(nested)]
    pub formatter: ToolSpec,

    /// Test runner that also executes doc examples
    #[serde(default = "default_test_runner")]
    #[validate(nested)]
    pub test_runner: ToolSpec,

    /// Coverage-instrumented test runner
    #[serde(default = "default_coverage_tool")]
    #[validate(nested)]
    pub coverage: ToolSpec,

    /// Docs subproject clean
    #[serde(default = "default_docs_clean")]
    #[validate(nested)]
    pub docs_clean: ToolSpec,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            import_sort: default_import_sort(),
            formatter: default_formatter(),
            test_runner: default_test_runner(),
            coverage: default_coverage_tool(),
            docs_clean: default_docs_clean(),
        }
    }
}

fn default_import_sort() -> ToolSpec {
    ToolSpec::new(
        "rustfmt",
        [
            "--edition",
            "2021",
            "--config",
            "reorder_imports=true,reorder_modules=true",
            PLACEHOLDER_FILE,
        ],
    )
}

fn default_formatter() -> ToolSpec {
    ToolSpec::new("rustfmt", ["--edition", "2021", PLACEHOLDER_FILE])
}

fn default_test_runner() -> ToolSpec {
    ToolSpec::new("cargo", ["test", "--workspace", "--no-fail-fast"])
}

fn default_coverage_tool() -> ToolSpec {
    ToolSpec::new(
        "cargo",
        [
            "llvm-cov",
            "--workspace",
            "--no-fail-fast",
            "--lcov",
            "--output-path",
            PLACEHOLDER_LCOV,
        ],
    )
}

fn default_docs_clean() -> ToolSpec {
    ToolSpec::new("make", ["-C", PLACEHOLDER_DOCS, "clean"])
}

/// One external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ToolSpec {
    /// Executable name or path
    #[validate(length(min = 1, message = "program cannot be empty"))]
    pub program: String,

    /// Arguments, may contain placeholders
    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment variables
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Working directory override, relative to the project root
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl ToolSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
            working_dir: None,
        }
    }

    /// A per-file tool is invoked once for every discovered source file.
    pub fn is_per_file(&self) -> bool {
        self.args.iter().any(|a| a.contains(PLACEHOLDER_FILE))
    }

    /// Human-readable command line, placeholders left as-is.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Coverage artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Where the coverage tool writes its raw LCOV data (`{lcov}`)
    #[serde(default = "default_lcov_path")]
    pub lcov_path: PathBuf,

    /// Where the report scoped to the source directory is written
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            lcov_path: default_lcov_path(),
            report_path: default_report_path(),
        }
    }
}

fn default_lcov_path() -> PathBuf {
    PathBuf::from("target/coverage/lcov.info")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("target/coverage/source.lcov")
}
