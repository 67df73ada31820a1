//! Check command implementation
//!
//! Reports which backends would take part in seeding.

use repro_core::backend::TensorRuntime;
use repro_core::{BackendKind, SeedConfig};

use crate::Result;

/// Run the check command
pub fn run(config: &SeedConfig) -> Result<()> {
    println!("Seed: {}", config.seed);
    println!();
    println!("Backends:");
    for kind in BackendKind::ALL {
        let status = if config.backends.is_enabled(kind) {
            "enabled"
        } else {
            "not available"
        };
        println!("  {:<12} {}", kind.name(), status);
    }

    println!();
    if config.backends.tensor {
        println!("Tensor devices:");
        for device in TensorRuntime::new(config.accelerators).devices() {
            println!("  {}", device);
        }
    } else {
        println!("Tensor devices: none (tensor backend disabled)");
    }

    Ok(())
}
