//! Process-wide generator for distribution sampling.
//!
//! Shares the numeric backend's 32-bit seeding rules but keeps its own state.

use rand_distr::Distribution;

use super::state::{legacy_seed, GlobalGenerator};
use super::{BackendKind, SeedBackend};
use crate::error::SeedError;

static GENERATOR: GlobalGenerator = GlobalGenerator::new(BackendKind::Scientific);

/// Seeding handle for the scientific sampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScientificRandom;

impl SeedBackend for ScientificRandom {
    fn name(&self) -> &str {
        BackendKind::Scientific.name()
    }

    fn manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        GENERATOR.reseed(legacy_seed(BackendKind::Scientific, seed)?)
    }
}

/// Draw `len` values from `distribution`.
///
/// # Examples
///
/// ```rust
/// use rand_distr::Exp1;
/// use repro_core::backend::{scientific, ScientificRandom, SeedBackend};
///
/// ScientificRandom.manual_seed(3).unwrap();
/// let draws = scientific::sample(&Exp1, 5).unwrap();
/// assert!(draws.iter().all(|x| *x >= 0.0));
/// ```
pub fn sample<D: Distribution<f64>>(distribution: &D, len: usize) -> Result<Vec<f64>, SeedError> {
    GENERATOR.with(|rng| distribution.sample_iter(rng).take(len).collect())
}
