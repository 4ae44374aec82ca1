//! Invocation - a concrete command line ready to run, and its exit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{
    ContractError, ToolSpec, PLACEHOLDER_DOCS, PLACEHOLDER_FILE, PLACEHOLDER_LCOV,
    PLACEHOLDER_SOURCE, PLACEHOLDER_TESTS,
};

/// Values available for placeholder expansion
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pub source: Option<PathBuf>,
    pub tests: Option<PathBuf>,
    pub docs: Option<PathBuf>,
    pub lcov: Option<PathBuf>,
    pub file: Option<PathBuf>,
}

impl Placeholders {
    /// Same values with `{file}` bound to `file`
    pub fn with_file(&self, file: &Path) -> Self {
        Self {
            file: Some(file.to_path_buf()),
            ..self.clone()
        }
    }

    fn lookup(&self, name: &str) -> Option<&Path> {
        match name {
            PLACEHOLDER_SOURCE => self.source.as_deref(),
            PLACEHOLDER_TESTS => self.tests.as_deref(),
            PLACEHOLDER_DOCS => self.docs.as_deref(),
            PLACEHOLDER_LCOV => self.lcov.as_deref(),
            PLACEHOLDER_FILE => self.file.as_deref(),
            _ => None,
        }
    }
}

const ALL_PLACEHOLDERS: [&str; 5] = [
    PLACEHOLDER_SOURCE,
    PLACEHOLDER_TESTS,
    PLACEHOLDER_DOCS,
    PLACEHOLDER_LCOV,
    PLACEHOLDER_FILE,
];

/// A fully expanded tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Expand `spec` against `values`, running in `root` unless `spec.working_dir` overrides it.
    ///
    /// # Errors
    /// A placeholder that appears in the arguments but has no value.
    pub fn expand(
        spec: &ToolSpec,
        values: &Placeholders,
        root: &Path,
    ) -> Result<Self, ContractError> {
        let args = spec
            .args
            .iter()
            .map(|arg| expand_arg(&spec.program, arg, values))
            .collect::<Result<Vec<_>, _>>()?;

        let working_dir = match &spec.working_dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        };

        Ok(Self {
            program: spec.program.clone(),
            args,
            env: spec.env.clone(),
            working_dir,
        })
    }
}

fn expand_arg(program: &str, arg: &str, values: &Placeholders) -> Result<String, ContractError> {
    let mut out = arg.to_string();
    for name in ALL_PLACEHOLDERS {
        if !out.contains(name) {
            continue;
        }
        let value = values
            .lookup(name)
            .ok_or_else(|| ContractError::UnresolvedPlaceholder {
                program: program.to_string(),
                placeholder: name.to_string(),
            })?;
        out = out.replace(name, &value.to_string_lossy());
    }
    Ok(out)
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a tool finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolExit {
    /// Process exit code; signals are folded in as `128 + signo`
    pub code: i32,
}

impl ToolExit {
    pub const SUCCESS: ToolExit = ToolExit { code: 0 };

    pub fn new(code: i32) -> Self {
        Self { code }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}
