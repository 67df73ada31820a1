//! CLI error types.

use repro_core::{ConfigError, SeedError};
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A backend rejected the seed
    #[error("Seeding failed: {0}")]
    Seed(#[from] SeedError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
