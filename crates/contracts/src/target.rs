//! Maintenance targets exposed by the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A maintenance target.
///
/// `All` is a pure alias: it resolves to `Format` before anything runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    All,
    Format,
    Tests,
    Coverage,
    Clean,
}

impl Target {
    /// Resolve aliases to the target that actually runs.
    pub fn resolve(self) -> Target {
        match self {
            Target::All => Target::Format,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::All => "all",
            Target::Format => "format",
            Target::Tests => "tests",
            Target::Coverage => "coverage",
            Target::Clean => "clean",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_resolves_to_format() {
        assert_eq!(Target::All.resolve(), Target::Format);
        assert_eq!(Target::Format.resolve(), Target::Format);
        assert_eq!(Target::Clean.resolve(), Target::Clean);
    }

    #[test]
    fn test_display_matches_serde_name() {
        let json = serde_json::to_string(&Target::All).unwrap();
        assert_eq!(json, format!("\"{}\"", Target::All));
        assert_eq!(Target::Clean.to_string(), "clean");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Target::Coverage).unwrap();
        assert_eq!(json, "\"coverage\"");
    }
}
