//! Experiment seeding configuration.
//!
//! Loads the seed, the enabled built-in backends and the accelerator layout
//! from a TOML file, with `REPRO_*` environment variable overrides.
//!
//! ```toml
//! seed = 42
//! log_level = "info"
//!
//! [backends]
//! random = true
//! numeric = true
//! tensor = true
//! scientific = false
//!
//! [accelerators]
//! cuda_devices = 2
//! mps = false
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::backend::{
    AcceleratorConfig, BackendKind, Backends, GlobalRandom, NumericRandom, ScientificRandom,
    TensorRuntime,
};

/// Seed used when none is configured.
pub const DEFAULT_SEED: i64 = 42;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Environment variable error: {0}")]
    Env(String),

    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Which built-in backends take part in seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendSelection {
    pub random: bool,
    pub numeric: bool,
    pub tensor: bool,
    pub scientific: bool,
}

impl Default for BackendSelection {
    fn default() -> Self {
        Self {
            random: true,
            numeric: true,
            tensor: true,
            scientific: true,
        }
    }
}

impl BackendSelection {
    /// Only the listed kinds.
    pub fn only(kinds: &[BackendKind]) -> Self {
        Self {
            random: kinds.contains(&BackendKind::Random),
            numeric: kinds.contains(&BackendKind::Numeric),
            tensor: kinds.contains(&BackendKind::Tensor),
            scientific: kinds.contains(&BackendKind::Scientific),
        }
    }

    pub fn is_enabled(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::Random => self.random,
            BackendKind::Numeric => self.numeric,
            BackendKind::Tensor => self.tensor,
            BackendKind::Scientific => self.scientific,
        }
    }

    /// Register the enabled built-in backends.
    pub fn build(&self, accelerators: AcceleratorConfig) -> Backends {
        let mut backends = Backends::none();
        if self.random {
            backends = backends.with_random(GlobalRandom);
        }
        if self.numeric {
            backends = backends.with_numeric(NumericRandom);
        }
        if self.tensor {
            backends = backends.with_tensor(TensorRuntime::new(accelerators));
        }
        if self.scientific {
            backends = backends.with_scientific(ScientificRandom);
        }
        backends
    }
}

/// Seeding configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed forwarded to every backend
    pub seed: i64,

    /// Log level
    pub log_level: String,

    /// Enabled built-in backends
    pub backends: BackendSelection,

    /// Accelerators reported by the tensor runtime
    pub accelerators: AcceleratorConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            log_level: "info".to_string(),
            backends: BackendSelection::default(),
            accelerators: AcceleratorConfig::default(),
        }
    }
}

impl SeedConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Apply environment variable overrides
    ///
    /// Recognised variables: `REPRO_SEED`, `REPRO_LOG_LEVEL`,
    /// `REPRO_CUDA_DEVICES`, `REPRO_MPS`.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(seed) = lookup("REPRO_SEED") {
            self.seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env(format!("REPRO_SEED is not an integer: {}", seed)))?;
        }

        if let Some(log_level) = lookup("REPRO_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(devices) = lookup("REPRO_CUDA_DEVICES") {
            self.accelerators.cuda_devices = devices.trim().parse().map_err(|_| {
                ConfigError::Env(format!(
                    "REPRO_CUDA_DEVICES is not a device count: {}",
                    devices
                ))
            })?;
        }

        if let Some(mps) = lookup("REPRO_MPS") {
            self.accelerators.mps = match mps.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Env(format!(
                        "REPRO_MPS is not a boolean: {}",
                        mps
                    )))
                }
            };
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.accelerators.cuda_devices > 0 && !self.backends.tensor {
            errors.push(
                "accelerators.cuda_devices is set but the tensor backend is disabled".to_string(),
            );
        }

        if self.accelerators.mps && !self.backends.tensor {
            errors.push("accelerators.mps is set but the tensor backend is disabled".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// The enabled built-in backends
    pub fn backends(&self) -> Backends {
        self.backends.build(self.accelerators)
    }
}
