//! # Integration Tests
//!
//! End-to-end and cross-crate tests.
//!
//! Covers:
//! - the verification pipeline over real child processes (unix shells
//!   stand in for the formatter, test runner, coverage tool and docs clean)
//! - the `pieces` number theory test suite

#[cfg(test)]
mod contract_tests {
    use contracts::{PipelineBlueprint, Target};

    #[test]
    fn test_default_blueprint_validates() {
        let blueprint = PipelineBlueprint::default();
        config_loader::ConfigLoader::validate(&blueprint).unwrap();
        assert!(blueprint.tools.formatter.is_per_file());
        assert!(!blueprint.tools.docs_clean.is_per_file());
    }

    #[test]
    fn test_blueprint_survives_toml() {
        let blueprint = PipelineBlueprint::default();
        let toml = config_loader::ConfigLoader::to_toml(&blueprint).unwrap();
        let parsed =
            config_loader::ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
                .unwrap();
        assert_eq!(
            parsed.tools.coverage.command_line(),
            blueprint.tools.coverage.command_line()
        );
        assert_eq!(Target::All.resolve(), Target::Format);
    }

    #[test]
    fn test_workspace_config_loads() {
        let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        let path = manifest_dir.join("../../verify.toml");
        let blueprint = config_loader::ConfigLoader::load_from_path(&path).unwrap();
        let layout = &blueprint.layout;
        assert_eq!(layout.source_dir, std::path::Path::new("crates/pieces"));
        let docs_clean = blueprint.tools.docs_clean.command_line();
        assert_eq!(docs_clean, "cargo clean --doc");
    }
}

#[cfg(all(test, unix))]
mod pipeline_e2e;

#[cfg(test)]
mod pieces_suite;
