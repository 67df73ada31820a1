//! Error types for seeding operations.
//!
//! This module provides:
//! - `SeedError`: failures raised by a backend's own seeding entry point or
//!   by access to its generator state

use crate::backend::Accelerator;
use thiserror::Error;

/// Seeding errors.
///
/// The seed setter never produces these itself; it only propagates what an
/// available backend returns.
///
/// # Examples
/// ```
/// use repro_core::SeedError;
///
/// let err = SeedError::SeedOutOfRange {
///     backend: "numeric",
///     seed: -1,
///     min: 0,
///     max: 4_294_967_295,
/// };
/// assert!(err.to_string().contains("numeric"));
/// ```
#[derive(Debug, Error)]
pub enum SeedError {
    /// The backend only accepts seeds within a fixed range.
    #[error("Seed {seed} out of range for '{backend}' backend: must be between {min} and {max}")]
    SeedOutOfRange {
        /// Backend that rejected the seed
        backend: &'static str,
        /// The rejected seed
        seed: i64,
        /// Smallest accepted seed
        min: i64,
        /// Largest accepted seed
        max: i64,
    },

    /// An accelerator entry point was used without the accelerator present.
    #[error("Accelerator not available: {accelerator}")]
    AcceleratorUnavailable {
        /// The missing accelerator
        accelerator: Accelerator,
    },

    /// A thread panicked while holding the backend's generator state.
    #[error("Generator state for '{backend}' backend is poisoned")]
    StatePoisoned {
        /// Backend whose state is unusable
        backend: &'static str,
    },

    /// Writing a skip notice failed.
    #[error("Failed to write notice: {0}")]
    Notice(#[from] std::io::Error),

    /// Failure reported by a caller-provided backend.
    #[error("Backend '{backend}' failed to seed: {message}")]
    Backend {
        /// Backend name
        backend: String,
        /// Description of the failure
        message: String,
    },
}

impl SeedError {
    /// Create a failure for a caller-provided backend
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }
}
