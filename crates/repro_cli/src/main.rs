//! Repro CLI - Reproducible Experiment Seeding
//!
//! Operational entry point for seeding the random number backends of an
//! experiment run.
//!
//! # Commands
//!
//! - `repro seed [--seed N]` - Seed every configured backend
//! - `repro check` - Show configured backends and accelerators
//! - `repro sample [--seed N]` - Seed, then print draws from every backend
//!
//! # Configuration
//!
//! Settings are read from `--config`, else `repro.toml` when present, else
//! defaults. `REPRO_*` environment variables override file values.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use repro_core::{BackendKind, SeedConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Reproducible experiment seeding CLI
#[derive(Parser)]
#[command(name = "repro")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed every configured backend
    Seed {
        /// Seed value (overrides the configured seed)
        #[arg(short, long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Restrict seeding to these backends (random, numeric, tensor, scientific)
        #[arg(short, long, value_delimiter = ',')]
        only: Vec<BackendKind>,
    },

    /// Show configured backends and accelerators
    Check,

    /// Seed, then print draws from every configured backend
    Sample {
        /// Seed value (overrides the configured seed)
        #[arg(short, long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Number of draws per backend
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },
}

fn init_tracing(config: &SeedConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(config.log_level.to_lowercase())
        }
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::resolve(cli.config.as_deref())?;
    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Seed { seed, only } => commands::seed::run(&config, seed, &only),
        Commands::Check => commands::check::run(&config),
        Commands::Sample { seed, count } => commands::sample::run(&config, seed, count),
    }
}
