//! Array-oriented process-wide generator.
//!
//! Seeding follows legacy 32-bit semantics: only seeds in `0..=u32::MAX` are
//! accepted. Anything else is rejected with [`SeedError::SeedOutOfRange`] and
//! leaves the current state untouched.
//!
//! Batch operations fill caller-provided buffers with no allocation; the
//! `rand`/`randn` helpers allocate a fresh `Vec`.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::state::{legacy_seed, GlobalGenerator};
use super::{BackendKind, SeedBackend};
use crate::error::SeedError;

static GENERATOR: GlobalGenerator = GlobalGenerator::new(BackendKind::Numeric);

/// Seeding handle for the numeric array generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericRandom;

impl SeedBackend for NumericRandom {
    fn name(&self) -> &str {
        BackendKind::Numeric.name()
    }

    fn manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        GENERATOR.reseed(legacy_seed(BackendKind::Numeric, seed)?)
    }
}

/// `len` uniform values in [0, 1).
pub fn rand(len: usize) -> Result<Vec<f64>, SeedError> {
    let mut buffer = vec![0.0; len];
    fill_uniform(&mut buffer)?;
    Ok(buffer)
}

/// `len` standard normal variates.
pub fn randn(len: usize) -> Result<Vec<f64>, SeedError> {
    let mut buffer = vec![0.0; len];
    fill_normal(&mut buffer)?;
    Ok(buffer)
}

/// Fill `buffer` with uniform values in [0, 1).
pub fn fill_uniform(buffer: &mut [f64]) -> Result<(), SeedError> {
    GENERATOR.with(|rng| {
        for value in buffer.iter_mut() {
            *value = rng.gen();
        }
    })
}

/// Fill `buffer` with standard normal (mean=0, std=1) variates.
///
/// Uses the Ziggurat sampler behind `rand_distr::StandardNormal`.
pub fn fill_normal(buffer: &mut [f64]) -> Result<(), SeedError> {
    GENERATOR.with(|rng| {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(rng);
        }
    })
}
