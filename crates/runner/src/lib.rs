//! # Runner
//!
//! External tool execution.
//!
//! Responsibilities:
//! - Spawn tools as child processes and wait for their exit
//! - Fold process termination into a single exit code
//! - Provide a scriptable mock for pipeline tests
//!
//! Both implementations satisfy `contracts::ToolRunner`, so the pipeline
//! never knows whether a real process ran.

pub mod mock;
pub mod process;

pub use contracts::{Invocation, ToolExit, ToolRunner};
pub use mock::{MockConfig, MockToolRunner};
pub use process::ProcessRunner;
