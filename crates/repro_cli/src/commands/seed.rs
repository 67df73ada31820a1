//! Seed command implementation
//!
//! Applies one seed to the configured backends.

use repro_core::{set_random_seeds, BackendKind, BackendSelection, SeedConfig};
use tracing::info;

use crate::Result;

/// Run the seed command
pub fn run(config: &SeedConfig, seed: Option<i64>, only: &[BackendKind]) -> Result<()> {
    let seed = seed.unwrap_or(config.seed);
    let selection = if only.is_empty() {
        config.backends
    } else {
        BackendSelection::only(only)
    };
    let backends = selection.build(config.accelerators);

    info!("Seeding backends...");
    info!("  Seed: {}", seed);
    info!("  Backends: {:?}", backends.available());

    set_random_seeds(seed, &backends)?;

    let seeded: Vec<&str> = backends.available().iter().map(|k| k.name()).collect();
    if seeded.is_empty() {
        println!("No backend seeded");
    } else {
        println!("Seeded {} with {}", seeded.join(", "), seed);
    }

    info!("Seeding complete");
    Ok(())
}
