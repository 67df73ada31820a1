//! # Repro Core
//!
//! Reproducible seeding of the optional random number backends an experiment
//! links against.
//!
//! ## Overview
//!
//! An experiment run typically draws random numbers from several places: a
//! general-purpose generator, an array-oriented numeric generator, a tensor
//! runtime with its own per-device state, and a scientific sampling library.
//! [`set_random_seeds`] forwards one seed to every backend the program has
//! registered in a [`Backends`] structure and prints a notice for every backend
//! that is absent.
//!
//! ## Module Structure
//!
//! - [`backend`]: backend traits, the [`Backends`] registry and the built-in
//!   process-wide generators
//! - [`seed`]: the seed setter
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: error types
//!
//! ## Usage Example
//!
//! ```rust
//! use repro_core::backend::{numeric, AcceleratorConfig, Backends};
//! use repro_core::set_random_seeds;
//!
//! let backends = Backends::builtin(AcceleratorConfig::default());
//! set_random_seeds(42, &backends).unwrap();
//! let first = numeric::rand(4).unwrap();
//!
//! set_random_seeds(42, &backends).unwrap();
//! assert_eq!(first, numeric::rand(4).unwrap());
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod seed;

pub use backend::{
    Accelerator, AcceleratorConfig, BackendKind, Backends, Device, SeedBackend, TensorBackend,
};
pub use config::{BackendSelection, ConfigError, SeedConfig};
pub use error::SeedError;
pub use seed::{set_random_seeds, set_random_seeds_to};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backend::{
        Accelerator, AcceleratorConfig, BackendKind, Backends, Device, GlobalRandom,
        NumericRandom, ScientificRandom, SeedBackend, TensorBackend, TensorRuntime,
    };
    pub use crate::config::SeedConfig;
    pub use crate::error::SeedError;
    pub use crate::seed::{set_random_seeds, set_random_seeds_to};
}
