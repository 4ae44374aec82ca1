//! ToolRunner trait - how the pipeline reaches external tools
//!
//! Implemented by the real process runner and by the mock used in tests.

use crate::{ContractError, Invocation, ToolExit};

/// External tool executor
///
/// Runs one invocation to completion. A nonzero exit is a normal result,
/// not an error; errors are reserved for tools that cannot be started.
#[trait_variant::make(ToolRunner: Send)]
pub trait LocalToolRunner {
    /// Runner name (used for logging)
    fn name(&self) -> &str;

    /// Run the invocation and wait for it to exit
    ///
    /// # Errors
    /// Launch failure (should include context)
    async fn run(&self, invocation: &Invocation) -> Result<ToolExit, ContractError>;
}
