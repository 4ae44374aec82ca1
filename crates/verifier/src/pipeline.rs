//! Verification pipeline - runs a target's steps through a `ToolRunner`.
//!
//! Steps run strictly one after another. A step's tool output goes straight
//! to the terminal; the pipeline only records exit codes.

use std::path::{Path, PathBuf};
use std::time::Instant;

use contracts::{
    Invocation, PipelineBlueprint, Placeholders, StepKind, StepReport, Target, TargetReport,
    ToolExit, ToolRunner, ToolSpec,
};
use tracing::{debug, info, instrument, warn};

use crate::coverage::scope_lcov;
use crate::discovery::discover_sources;
use crate::error::{Result, VerifyError};

/// The verification pipeline
///
/// Stateless between calls: every target can be re-run any number of times.
pub struct VerificationPipeline<R> {
    blueprint: PipelineBlueprint,
    root: PathBuf,
    runner: R,
}

impl<R: ToolRunner> VerificationPipeline<R> {
    /// Create a pipeline over the project at `root`
    pub fn new(blueprint: PipelineBlueprint, root: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            blueprint,
            root: root.into(),
            runner,
        }
    }

    pub fn blueprint(&self) -> &PipelineBlueprint {
        &self.blueprint
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Files handed to per-file tools: source directory first, then tests
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let layout = &self.blueprint.layout;
        let roots = [
            self.resolve(&layout.source_dir),
            self.resolve(&layout.tests_dir),
        ];
        discover_sources(&roots, &layout.extensions)
    }

    /// Run a target; `all` runs `format`.
    ///
    /// # Errors
    /// Pipeline machinery failures only (tool launch, discovery, artifacts).
    /// A tool exiting nonzero is reported in the returned `TargetReport`.
    #[instrument(skip(self), fields(runner = self.runner.name()))]
    pub async fn run(&self, target: Target) -> Result<TargetReport> {
        let mut report = TargetReport::new(target);
        info!(requested = %target, target = %report.target, "Running target");
        let started = Instant::now();

        match report.target {
            Target::All | Target::Format => self.run_format(&mut report).await?,
            Target::Tests => self.run_tests(&mut report).await?,
            Target::Coverage => self.run_coverage(&mut report).await?,
            Target::Clean => self.run_clean(&mut report).await?,
        }

        info!(
            target = %report.target,
            exit_code = report.exit_code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Target finished"
        );
        Ok(report)
    }

    /// Alias of [`VerificationPipeline::format`]
    pub async fn all(&self) -> Result<TargetReport> {
        self.run(Target::All).await
    }

    /// Sort imports, then reformat, over the source and tests directories
    pub async fn format(&self) -> Result<TargetReport> {
        self.run(Target::Format).await
    }

    /// Run the test suite including doc examples
    pub async fn tests(&self) -> Result<TargetReport> {
        self.run(Target::Tests).await
    }

    /// Run the test suite under coverage, scoped to the source directory
    pub async fn coverage(&self) -> Result<TargetReport> {
        self.run(Target::Coverage).await
    }

    /// Delegate to the docs subproject's clean
    pub async fn clean(&self) -> Result<TargetReport> {
        self.run(Target::Clean).await
    }
}

impl<R: ToolRunner> VerificationPipeline<R> {
    async fn run_format(&self, report: &mut TargetReport) -> Result<()> {
        let tools = &self.blueprint.tools;

        let import_sort = self.run_step(StepKind::ImportSort, &tools.import_sort).await?;
        let sorted = import_sort.passed();
        report.steps.push(import_sort);
        if !sorted {
            warn!("Import sorting failed, formatter not run");
            return Ok(());
        }

        let format = self.run_step(StepKind::Format, &tools.formatter).await?;
        report.steps.push(format);
        Ok(())
    }

    async fn run_tests(&self, report: &mut TargetReport) -> Result<()> {
        let step = self
            .run_step(StepKind::Test, &self.blueprint.tools.test_runner)
            .await?;
        report.steps.push(step);
        Ok(())
    }

    async fn run_coverage(&self, report: &mut TargetReport) -> Result<()> {
        let lcov_path = self.resolve(&self.blueprint.coverage.lcov_path);
        prepare_artifact(&lcov_path)?;

        let step = self
            .run_step(StepKind::Coverage, &self.blueprint.tools.coverage)
            .await?;
        let passed = step.passed();
        report.steps.push(step);
        if !passed {
            return Ok(());
        }

        if !lcov_path.exists() {
            warn!(
                path = %lcov_path.display(),
                "Coverage tool produced no LCOV artifact, skipping scoped report"
            );
            return Ok(());
        }

        let scoped = scope_lcov(&lcov_path, &self.blueprint.layout.source_dir, &self.root)?;
        scoped.write(&self.resolve(&self.blueprint.coverage.report_path))?;

        let summary = scoped.summary();
        info!(
            files = summary.files.len(),
            excluded = summary.excluded_files,
            lines_found = summary.lines_found(),
            lines_hit = summary.lines_hit(),
            percent = format!("{:.2}", summary.percent()),
            "Coverage scoped to source directory"
        );
        report.coverage = Some(summary);
        Ok(())
    }

    async fn run_clean(&self, report: &mut TargetReport) -> Result<()> {
        let step = self
            .run_step(StepKind::DocsClean, &self.blueprint.tools.docs_clean)
            .await?;
        report.steps.push(step);
        Ok(())
    }

    /// Run one step. Per-file tools stop at the first failing file; files
    /// already rewritten stay rewritten.
    async fn run_step(&self, step: StepKind, spec: &ToolSpec) -> Result<StepReport> {
        let started = Instant::now();
        let placeholders = self.placeholders();

        let mut invocations = 0usize;
        let mut exit = ToolExit::SUCCESS;
        let mut failed_file = None;

        if spec.is_per_file() {
            let files = self.source_files()?;
            if files.is_empty() {
                warn!(step = %step, "No source files found");
            }

            for file in files {
                let values = placeholders.with_file(&file);
                let invocation = Invocation::expand(spec, &values, &self.root)?;
                invocations += 1;
                exit = self.runner.run(&invocation).await?;
                if !exit.success() {
                    warn!(step = %step, file = %file.display(), code = exit.code, "Rewrite failed");
                    failed_file = Some(file);
                    break;
                }
            }
        } else {
            let invocation = Invocation::expand(spec, &placeholders, &self.root)?;
            debug!(step = %step, command = %invocation, "Invoking tool");
            invocations = 1;
            exit = self.runner.run(&invocation).await?;
        }

        let report = StepReport {
            step,
            invocations,
            exit,
            failed_file,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            step = %step,
            invocations = report.invocations,
            exit_code = report.exit.code,
            "Step finished"
        );
        Ok(report)
    }

    fn placeholders(&self) -> Placeholders {
        let layout = &self.blueprint.layout;
        Placeholders {
            source: Some(self.resolve(&layout.source_dir)),
            tests: Some(self.resolve(&layout.tests_dir)),
            docs: Some(self.resolve(&layout.docs_dir)),
            lcov: Some(self.resolve(&self.blueprint.coverage.lcov_path)),
            file: None,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Make room for a fresh artifact: parent exists, stale file removed
fn prepare_artifact(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| VerifyError::io(parent, e))?;
    }
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed stale coverage artifact");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(VerifyError::io(path, e)),
    }
}
