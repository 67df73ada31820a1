//! General-purpose process-wide generator.
//!
//! Accepts any `i64` seed. Negative seeds are reinterpreted as their
//! two's-complement `u64`, so `-1` and `u64::MAX` select the same stream.

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{wrap_seed, GlobalGenerator};
use super::{BackendKind, SeedBackend};
use crate::error::SeedError;

static GENERATOR: GlobalGenerator = GlobalGenerator::new(BackendKind::Random);

/// Seeding handle for the general-purpose generator.
///
/// # Examples
///
/// ```rust
/// use repro_core::backend::{random, GlobalRandom, SeedBackend};
///
/// GlobalRandom.manual_seed(7).unwrap();
/// let a = random::random().unwrap();
/// GlobalRandom.manual_seed(7).unwrap();
/// assert_eq!(a, random::random().unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRandom;

impl SeedBackend for GlobalRandom {
    fn name(&self) -> &str {
        BackendKind::Random.name()
    }

    fn manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        GENERATOR.reseed(wrap_seed(seed))
    }
}

/// Uniform value in [0, 1).
pub fn random() -> Result<f64, SeedError> {
    GENERATOR.with(|rng| rng.gen())
}

/// Uniform integer in the closed interval [low, high].
///
/// # Panics
/// Panics if `low > high`
pub fn randint(low: i64, high: i64) -> Result<i64, SeedError> {
    assert!(low <= high, "low must not exceed high");
    GENERATOR.with(|rng| rng.gen_range(low..=high))
}

/// Shuffle `items` in place.
pub fn shuffle<T>(items: &mut [T]) -> Result<(), SeedError> {
    GENERATOR.with(|rng| items.shuffle(rng))
}

/// Pick one element, or `None` for an empty slice.
pub fn choice<T: Clone>(items: &[T]) -> Result<Option<T>, SeedError> {
    GENERATOR.with(|rng| items.choose(rng).cloned())
}
