//! Process-wide generator slot shared by the single-generator backends.

use std::sync::{Mutex, MutexGuard, OnceLock};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::BackendKind;
use crate::error::SeedError;

/// One lazily created `StdRng` per process.
///
/// Until the first seeding call the generator is initialised from OS entropy.
pub(crate) struct GlobalGenerator {
    kind: BackendKind,
    cell: OnceLock<Mutex<StdRng>>,
}

impl GlobalGenerator {
    pub(crate) const fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            cell: OnceLock::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StdRng>, SeedError> {
        self.cell
            .get_or_init(|| Mutex::new(StdRng::from_entropy()))
            .lock()
            .map_err(|_| SeedError::StatePoisoned {
                backend: self.kind.name(),
            })
    }

    /// Replace the generator with one seeded from `seed`.
    pub(crate) fn reseed(&self, seed: u64) -> Result<(), SeedError> {
        *self.lock()? = StdRng::seed_from_u64(seed);
        Ok(())
    }

    /// Run `f` with exclusive access to the generator.
    pub(crate) fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, SeedError> {
        let mut rng = self.lock()?;
        Ok(f(&mut rng))
    }
}

/// Reinterpret a signed seed as its two's-complement `u64`.
#[inline]
pub(crate) fn wrap_seed(seed: i64) -> u64 {
    seed as u64
}

/// Accept only seeds representable as `u32`.
pub(crate) fn legacy_seed(kind: BackendKind, seed: i64) -> Result<u64, SeedError> {
    u32::try_from(seed)
        .map(u64::from)
        .map_err(|_| SeedError::SeedOutOfRange {
            backend: kind.name(),
            seed,
            min: 0,
            max: i64::from(u32::MAX),
        })
}
