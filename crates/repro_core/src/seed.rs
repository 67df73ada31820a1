//! The seed setter.
//!
//! Forwards one seed to every registered backend in a fixed order: random,
//! numeric, tensor (then its CUDA and MPS generators when present),
//! scientific. Each missing backend produces one notice line.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::backend::{BackendKind, Backends, SeedBackend};
use crate::error::SeedError;

/// Seed every available backend, printing a notice to stdout for each
/// backend that is not available.
///
/// The seed is forwarded unchanged. A backend rejecting it aborts the pass
/// and the error is returned as-is; backends later in the order keep their
/// previous state.
///
/// # Examples
///
/// ```rust
/// use repro_core::{set_random_seeds, Backends};
///
/// // Prints four notices, seeds nothing.
/// set_random_seeds(0, &Backends::none()).unwrap();
/// ```
pub fn set_random_seeds(seed: i64, backends: &Backends) -> Result<(), SeedError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    set_random_seeds_to(seed, backends, &mut out)
}

/// Like [`set_random_seeds`], writing notices to `out`.
pub fn set_random_seeds_to<W: Write>(
    seed: i64,
    backends: &Backends,
    out: &mut W,
) -> Result<(), SeedError> {
    match backends.random() {
        Some(backend) => seed_backend(backend, seed)?,
        None => skip(BackendKind::Random, out)?,
    }

    match backends.numeric() {
        Some(backend) => seed_backend(backend, seed)?,
        None => skip(BackendKind::Numeric, out)?,
    }

    match backends.tensor() {
        Some(backend) => {
            seed_backend(backend, seed)?;
            if backend.cuda_is_available() {
                backend.cuda_manual_seed_all(seed)?;
                debug!(backend = backend.name(), seed, "seeded cuda devices");
            }
            if backend.mps_is_available() {
                backend.mps_manual_seed(seed)?;
                debug!(backend = backend.name(), seed, "seeded mps device");
            }
        }
        None => skip(BackendKind::Tensor, out)?,
    }

    match backends.scientific() {
        Some(backend) => seed_backend(backend, seed)?,
        None => skip(BackendKind::Scientific, out)?,
    }

    Ok(())
}

fn seed_backend<B: SeedBackend + ?Sized>(backend: &B, seed: i64) -> Result<(), SeedError> {
    backend.manual_seed(seed)?;
    debug!(backend = backend.name(), seed, "seeded backend");
    Ok(())
}

fn skip<W: Write>(kind: BackendKind, out: &mut W) -> Result<(), SeedError> {
    info!(backend = kind.name(), "backend not available, skipping");
    writeln!(out, "{}", kind.skip_notice())?;
    Ok(())
}
