use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cistern rainwater-harvesting tank sizing tool.
#[derive(Parser)]
#[command(
    name = "cistern",
    version,
    about = "Synthetic rainfall and water-balance tank sizing for school rainwater harvesting"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Synthesize daily rainfall from calibration tables.
    Generate(GenerateArgs),
    /// Run the harvest and water-balance scan over an existing rainfall table.
    Size(SizeArgs),
    /// Synthesize rainfall and size the tank in one pass.
    Run(GenerateArgs),
}

/// Arguments for the `generate` and `run` subcommands.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cistern.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of synthetic years from config.
    #[arg(short = 'n', long)]
    pub years: Option<usize>,
}

/// Arguments for the `size` subcommand.
#[derive(clap::Args)]
pub struct SizeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cistern.toml")]
    pub config: PathBuf,

    /// Override the rainfall CSV path from config.
    #[arg(short, long)]
    pub rainfall: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
