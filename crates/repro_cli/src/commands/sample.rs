//! Sample command implementation
//!
//! Seeds the configured backends, then prints draws from each of them.
//! Running it twice with the same seed prints identical output.

use rand_distr::Exp1;
use repro_core::backend::{numeric, random, scientific, TensorRuntime};
use repro_core::{set_random_seeds, SeedConfig};
use tracing::info;

use crate::{CliError, Result};

/// Run the sample command
pub fn run(config: &SeedConfig, seed: Option<i64>, count: usize) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "count must be greater than 0".to_string(),
        ));
    }

    let seed = seed.unwrap_or(config.seed);
    info!("Sampling with seed {}", seed);
    set_random_seeds(seed, &config.backends())?;

    let selection = config.backends;
    if selection.random {
        let draws = (0..count)
            .map(|_| random::random())
            .collect::<std::result::Result<Vec<f64>, _>>()?;
        print_row("random", &draws);
    }

    if selection.numeric {
        print_row("numeric", &numeric::rand(count)?);
    }

    if selection.tensor {
        let runtime = TensorRuntime::new(config.accelerators);
        for device in runtime.devices() {
            let label = format!("tensor[{}]", device);
            print_row(&label, &runtime.uniform(device, count)?);
        }
    }

    if selection.scientific {
        print_row("scientific", &scientific::sample(&Exp1, count)?);
    }

    Ok(())
}

fn print_row(label: &str, draws: &[f64]) {
    let values: Vec<String> = draws.iter().map(|v| format!("{:.6}", v)).collect();
    println!("{:<14} {}", label, values.join(" "));
}
