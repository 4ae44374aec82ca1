//! Reports produced by a pipeline run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::{Target, ToolExit};

/// Pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    ImportSort,
    Format,
    Test,
    Coverage,
    DocsClean,
}

impl StepKind {
    /// Failure category a nonzero exit in this step belongs to
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            StepKind::ImportSort | StepKind::Format => FailureKind::Rewrite,
            StepKind::Test | StepKind::Coverage => FailureKind::Verification,
            StepKind::DocsClean => FailureKind::Delegation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::ImportSort => "import_sort",
            StepKind::Format => "format",
            StepKind::Test => "test",
            StepKind::Coverage => "coverage",
            StepKind::DocsClean => "docs_clean",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A source file could not be parsed or rewritten
    Rewrite,
    /// A test or embedded example failed
    Verification,
    /// The delegated docs clean failed
    Delegation,
}

/// Result of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: StepKind,
    /// Number of tool invocations made
    pub invocations: usize,
    /// Exit of the last invocation made
    pub exit: ToolExit,
    /// File being processed when a per-file tool failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_file: Option<PathBuf>,
    pub duration_ms: u64,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.exit.success()
    }
}

/// Final outcome of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { kind: FailureKind, exit_code: i32 },
}

/// Line coverage of one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub path: PathBuf,
    pub lines_found: u32,
    pub lines_hit: u32,
}

impl FileCoverage {
    pub fn percent(&self) -> f64 {
        percent(self.lines_hit, self.lines_found)
    }
}

/// Coverage scoped to the source directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub files: Vec<FileCoverage>,
    /// Records dropped because they lie outside the source directory
    pub excluded_files: usize,
}

impl CoverageSummary {
    pub fn lines_found(&self) -> u32 {
        self.files.iter().map(|f| f.lines_found).sum()
    }

    pub fn lines_hit(&self) -> u32 {
        self.files.iter().map(|f| f.lines_hit).sum()
    }

    pub fn percent(&self) -> f64 {
        percent(self.lines_hit(), self.lines_found())
    }
}

fn percent(hit: u32, found: u32) -> f64 {
    if found == 0 {
        100.0
    } else {
        hit as f64 / found as f64 * 100.0
    }
}

/// Result of running a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReport {
    /// Target as requested (may be an alias)
    pub requested: Target,
    /// Target that actually ran
    pub target: Target,
    pub steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageSummary>,
}

impl TargetReport {
    pub fn new(requested: Target) -> Self {
        Self {
            requested,
            target: requested.resolve(),
            steps: Vec::new(),
            coverage: None,
        }
    }

    /// The first failing step decides the outcome
    pub fn outcome(&self) -> Outcome {
        self.steps
            .iter()
            .find(|s| !s.passed())
            .map(|s| Outcome::Failed {
                kind: s.step.failure_kind(),
                exit_code: s.exit.code,
            })
            .unwrap_or(Outcome::Passed)
    }

    /// Process exit code for this target
    pub fn exit_code(&self) -> i32 {
        match self.outcome() {
            Outcome::Passed => 0,
            Outcome::Failed { exit_code, .. } => exit_code,
        }
    }
}
