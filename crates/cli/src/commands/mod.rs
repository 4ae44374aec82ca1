//! Command implementations.

mod info;
mod target;
mod validate;

pub use info::run_info;
pub use target::run_target;
pub use validate::run_validate;

use std::path::{Path, PathBuf};

use contracts::PipelineBlueprint;
use tracing::info;

use crate::error::{CliError, Result};

/// Project root, checked to be a directory
fn project_root(root: &Path) -> Result<PathBuf> {
    if root.is_dir() {
        Ok(root.to_path_buf())
    } else {
        Err(CliError::root_not_found(root))
    }
}

/// Configuration from `path`, or built-in defaults when it does not exist
fn load_blueprint(path: &Path) -> Result<PipelineBlueprint> {
    let blueprint = config_loader::ConfigLoader::load_or_default(path)?;
    info!(
        config = %path.display(),
        source_dir = %blueprint.layout.source_dir.display(),
        tests_dir = %blueprint.layout.tests_dir.display(),
        "Configuration loaded"
    );
    Ok(blueprint)
}
