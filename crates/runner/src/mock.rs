//! Mock tool runner
//!
//! Records every invocation and answers with scripted exit codes, so pipeline
//! tests can inject failures without real tools.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use contracts::{ContractError, Invocation, ToolExit, ToolRunner};
use tracing::trace;

/// Scripted behavior
#[derive(Debug, Default, Clone)]
pub struct MockConfig {
    /// Exit code for every call of a program
    pub exit_codes: HashMap<String, i32>,
    /// Exit code for any call carrying this exact argument; checked before `exit_codes`
    pub fail_on_arg: HashMap<String, i32>,
    /// Programs that fail to launch
    pub missing_programs: Vec<String>,
}

impl MockConfig {
    pub fn exit_code(mut self, program: impl Into<String>, code: i32) -> Self {
        self.exit_codes.insert(program.into(), code);
        self
    }

    pub fn fail_on_arg(mut self, arg: impl Into<String>, code: i32) -> Self {
        self.fail_on_arg.insert(arg.into(), code);
        self
    }

    pub fn missing(mut self, program: impl Into<String>) -> Self {
        self.missing_programs.push(program.into());
        self
    }
}

/// Mock runner
#[derive(Debug, Default)]
pub struct MockToolRunner {
    config: MockConfig,
    calls: Mutex<Vec<Invocation>>,
}

impl MockToolRunner {
    /// Runner where every tool succeeds
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Invocations received so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Programs called so far, in order
    pub fn programs(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.program).collect()
    }

    fn scripted_exit(&self, invocation: &Invocation) -> ToolExit {
        let by_arg = invocation
            .args
            .iter()
            .find_map(|a| self.config.fail_on_arg.get(a).copied());
        let code = by_arg
            .or_else(|| self.config.exit_codes.get(&invocation.program).copied())
            .unwrap_or(0);
        ToolExit::new(code)
    }
}

impl ToolRunner for MockToolRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run(&self, invocation: &Invocation) -> Result<ToolExit, ContractError> {
        trace!(command = %invocation, "Mock invocation");
        if self.config.missing_programs.contains(&invocation.program) {
            return Err(ContractError::tool_launch(
                &invocation.program,
                "No such file or directory (mock)",
            ));
        }

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());
        Ok(self.scripted_exit(invocation))
    }
}
