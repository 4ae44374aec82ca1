//! # Verifier
//!
//! The verification pipeline over a source package and its test suite.
//!
//! Targets:
//! - `format`: import sorting, then code formatting (`all` is an alias)
//! - `tests`: test suite plus doc examples
//! - `coverage`: same as `tests` under instrumentation, report scoped to the source directory
//! - `clean`: delegated to the docs subproject
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo() -> verifier::Result<()> {
//! use contracts::{PipelineBlueprint, Target};
//! use runner::ProcessRunner;
//! use verifier::VerificationPipeline;
//!
//! let blueprint = PipelineBlueprint::default();
//! let pipeline = VerificationPipeline::new(blueprint, ".", ProcessRunner::new());
//! let report = pipeline.run(Target::Tests).await?;
//! std::process::exit(report.exit_code());
//! # }
//! ```

pub mod coverage;
pub mod discovery;
pub mod error;
pub mod pipeline;

pub use coverage::{scope_lcov, ScopedCoverage};
pub use discovery::discover_sources;
pub use error::{Result, VerifyError};
pub use pipeline::VerificationPipeline;
