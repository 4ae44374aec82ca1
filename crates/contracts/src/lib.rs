//! # Contracts
//!
//! Shared interface contracts for the verification workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Execution Model
//! - One tool invocation at a time, awaited to completion
//! - Tool diagnostics go straight to the terminal; this layer only sees exit codes

mod blueprint;
mod error;
mod invocation;
mod report;
mod target;
mod tool_runner;

pub use blueprint::*;
pub use error::*;
pub use invocation::*;
pub use report::*;
pub use target::*;
pub use tool_runner::{LocalToolRunner, ToolRunner};
