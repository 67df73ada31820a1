//! Configuration resolution for CLI commands.

use std::path::{Path, PathBuf};

use repro_core::SeedConfig;
use tracing::debug;

use crate::{CliError, Result};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "repro.toml";

/// Load the configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if it
/// exists, falling back to built-in defaults. Environment overrides are
/// applied and the result is validated.
pub fn resolve(path: Option<&Path>) -> Result<SeedConfig> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        debug!("Loading configuration from {}", path.display());
        return Ok(SeedConfig::load_with_env_and_validate(path)?);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
        return Ok(SeedConfig::load_with_env_and_validate(&default_path)?);
    }

    let config = SeedConfig::default().with_env_override()?;
    config.validate()?;
    Ok(config)
}
