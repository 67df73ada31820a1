//! # Random Number Backends
//!
//! This module defines the seeding interface shared by every backend and the
//! [`Backends`] registry handed to the seed setter.
//!
//! ## Design Rationale
//!
//! - **Explicit availability**: a backend takes part in seeding if and only if
//!   it is registered in [`Backends`]. Nothing is discovered at runtime.
//! - **Process-wide state**: the built-in backends keep one generator per
//!   process (per device for the tensor runtime), mirroring the global seeding
//!   entry points of numeric libraries.
//! - **Irreversible**: seeding replaces the generator; the previous state is
//!   not kept.
//!
//! ## Module Structure
//!
//! - [`random`]: general-purpose generator
//! - [`numeric`]: array-oriented generator with 32-bit seeding
//! - [`tensor`]: tensor runtime with CPU, CUDA and MPS generators
//! - [`scientific`]: distribution sampling generator

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::SeedError;

pub mod numeric;
pub mod random;
pub mod scientific;
mod state;
pub mod tensor;

pub use numeric::NumericRandom;
pub use random::GlobalRandom;
pub use scientific::ScientificRandom;
pub use tensor::{AcceleratorConfig, Device, TensorRuntime};

/// The fixed set of optional backends, in seeding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    /// General-purpose generator
    Random,
    /// Numeric array generator
    Numeric,
    /// Deep-learning tensor runtime
    Tensor,
    /// Scientific-computing sampler
    Scientific,
}

impl BackendKind {
    /// All backend kinds in seeding order.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Random,
        BackendKind::Numeric,
        BackendKind::Tensor,
        BackendKind::Scientific,
    ];

    /// Stable lowercase name used in notices, logs and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Random => "random",
            BackendKind::Numeric => "numeric",
            BackendKind::Tensor => "tensor",
            BackendKind::Scientific => "scientific",
        }
    }

    /// The informational line printed when this backend is skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repro_core::BackendKind;
    ///
    /// assert_eq!(
    ///     BackendKind::Numeric.skip_notice(),
    ///     "The 'numeric' backend is not available, skipping numeric seed."
    /// );
    /// ```
    pub fn skip_notice(&self) -> String {
        let name = self.name();
        format!("The '{name}' backend is not available, skipping {name} seed.")
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown backend name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown backend: {0}. Must be one of: random, numeric, tensor, scientific")]
pub struct UnknownBackend(pub String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(BackendKind::Random),
            "numeric" => Ok(BackendKind::Numeric),
            "tensor" => Ok(BackendKind::Tensor),
            "scientific" => Ok(BackendKind::Scientific),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// Hardware accelerators with their own random state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accelerator {
    /// NVIDIA GPUs
    Cuda,
    /// Apple-silicon Metal Performance Shaders
    Mps,
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accelerator::Cuda => f.write_str("cuda"),
            Accelerator::Mps => f.write_str("mps"),
        }
    }
}

/// A backend with a global seeding entry point.
///
/// Implementations mutate process-wide state and keep no record of the
/// previous generator.
pub trait SeedBackend {
    /// Name used in log events.
    fn name(&self) -> &str;

    /// Replace the backend's generator state with one derived from `seed`.
    fn manual_seed(&self, seed: i64) -> Result<(), SeedError>;
}

/// A tensor runtime whose accelerators keep separate generator state.
pub trait TensorBackend: SeedBackend {
    /// Whether at least one CUDA device is present.
    fn cuda_is_available(&self) -> bool;

    /// Seed the generator of every CUDA device.
    fn cuda_manual_seed_all(&self, seed: i64) -> Result<(), SeedError>;

    /// Whether the MPS device is present.
    fn mps_is_available(&self) -> bool;

    /// Seed the MPS generator.
    fn mps_manual_seed(&self, seed: i64) -> Result<(), SeedError>;
}

/// The backends available to the seed setter.
///
/// Each slot is either filled with a registered backend or empty. Empty slots
/// are reported by [`set_random_seeds`](crate::set_random_seeds) and skipped.
///
/// # Examples
///
/// ```rust
/// use repro_core::backend::{AcceleratorConfig, BackendKind, Backends, TensorRuntime};
///
/// let backends = Backends::none().with_tensor(TensorRuntime::new(AcceleratorConfig::default()));
/// assert!(backends.is_available(BackendKind::Tensor));
/// assert!(!backends.is_available(BackendKind::Numeric));
/// ```
#[derive(Default)]
pub struct Backends {
    random: Option<Box<dyn SeedBackend>>,
    numeric: Option<Box<dyn SeedBackend>>,
    tensor: Option<Box<dyn TensorBackend>>,
    scientific: Option<Box<dyn SeedBackend>>,
}

impl Backends {
    /// No backend available.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every built-in backend, with the tensor runtime reporting `accelerators`.
    pub fn builtin(accelerators: AcceleratorConfig) -> Self {
        Self::none()
            .with_random(GlobalRandom)
            .with_numeric(NumericRandom)
            .with_tensor(TensorRuntime::new(accelerators))
            .with_scientific(ScientificRandom)
    }

    /// Register the general-purpose backend.
    pub fn with_random(mut self, backend: impl SeedBackend + 'static) -> Self {
        self.random = Some(Box::new(backend));
        self
    }

    /// Register the numeric array backend.
    pub fn with_numeric(mut self, backend: impl SeedBackend + 'static) -> Self {
        self.numeric = Some(Box::new(backend));
        self
    }

    /// Register the tensor runtime.
    pub fn with_tensor(mut self, backend: impl TensorBackend + 'static) -> Self {
        self.tensor = Some(Box::new(backend));
        self
    }

    /// Register the scientific backend.
    pub fn with_scientific(mut self, backend: impl SeedBackend + 'static) -> Self {
        self.scientific = Some(Box::new(backend));
        self
    }

    pub fn random(&self) -> Option<&dyn SeedBackend> {
        self.random.as_deref()
    }

    pub fn numeric(&self) -> Option<&dyn SeedBackend> {
        self.numeric.as_deref()
    }

    pub fn tensor(&self) -> Option<&dyn TensorBackend> {
        self.tensor.as_deref()
    }

    pub fn scientific(&self) -> Option<&dyn SeedBackend> {
        self.scientific.as_deref()
    }

    /// Whether the slot for `kind` is filled.
    pub fn is_available(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::Random => self.random.is_some(),
            BackendKind::Numeric => self.numeric.is_some(),
            BackendKind::Tensor => self.tensor.is_some(),
            BackendKind::Scientific => self.scientific.is_some(),
        }
    }

    /// Registered backend kinds in seeding order.
    pub fn available(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|kind| self.is_available(*kind))
            .collect()
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends")
            .field("random", &self.random.as_ref().map(|b| b.name().to_string()))
            .field("numeric", &self.numeric.as_ref().map(|b| b.name().to_string()))
            .field("tensor", &self.tensor.as_ref().map(|b| b.name().to_string()))
            .field(
                "scientific",
                &self.scientific.as_ref().map(|b| b.name().to_string()),
            )
            .finish()
    }
}

/// Serialises unit tests that touch process-wide generator state.
#[cfg(test)]
pub(crate) fn state_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());
    GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
