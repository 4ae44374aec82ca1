//! Child-process runner
//!
//! Stdio is inherited: tools report their own diagnostics, this layer only
//! reads the exit status.

use std::process::ExitStatus;
use std::time::Instant;

use contracts::{ContractError, Invocation, ToolExit, ToolRunner};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn name(&self) -> &str {
        "process"
    }

    #[instrument(skip(self, invocation), fields(program = %invocation.program))]
    async fn run(&self, invocation: &Invocation) -> Result<ToolExit, ContractError> {
        debug!(
            command = %invocation,
            cwd = %invocation.working_dir.display(),
            "Spawning tool"
        );
        let started = Instant::now();

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(&invocation.env)
            .current_dir(&invocation.working_dir)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| ContractError::tool_launch(&invocation.program, e.to_string()))?;

        let exit = exit_from_status(status);
        if exit.success() {
            debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Tool finished"
            );
        } else {
            warn!(
                code = exit.code,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Tool exited with failure"
            );
        }
        Ok(exit)
    }
}

/// Exit code, or `128 + signo` when the process was killed by a signal
pub fn exit_from_status(status: ExitStatus) -> ToolExit {
    if let Some(code) = status.code() {
        return ToolExit::new(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ToolExit::new(128 + signal);
        }
    }

    ToolExit::new(1)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sh(script: &str) -> Invocation {
        Invocation {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            env: BTreeMap::new(),
            working_dir: std::env::temp_dir(),
        }
    }

    #[tokio::test]
    async fn test_success() {
        let exit = ProcessRunner::new().run(&sh("exit 0")).await.unwrap();
        assert!(exit.success());
    }

    #[tokio::test]
    async fn test_exit_code_passthrough() {
        let exit = ProcessRunner::new().run(&sh("exit 3")).await.unwrap();
        assert_eq!(exit.code, 3);
    }

    #[tokio::test]
    async fn test_signal_folded_into_code() {
        let exit = ProcessRunner::new().run(&sh("kill -9 $$")).await.unwrap();
        assert_eq!(exit.code, 128 + 9);
    }

    #[tokio::test]
    async fn test_env_and_cwd_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let mut inv = sh("test \"$MARKER\" = yes && test \"$(pwd -P)\" = \"$EXPECTED\"");
        inv.env.insert("MARKER".into(), "yes".into());
        let canonical = std::fs::canonicalize(dir.path()).unwrap();
        inv.env
            .insert("EXPECTED".into(), canonical.to_string_lossy().into_owned());
        inv.working_dir = dir.path().to_path_buf();
        let exit = ProcessRunner::new().run(&inv).await.unwrap();
        assert!(exit.success());
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let inv = Invocation {
            program: "definitely-not-a-real-tool-4242".into(),
            args: vec![],
            env: BTreeMap::new(),
            working_dir: std::env::temp_dir(),
        };
        let err = ProcessRunner::new().run(&inv).await.unwrap_err();
        assert!(matches!(err, ContractError::ToolLaunch { .. }));
    }
}
