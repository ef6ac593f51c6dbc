//! Command-line interface definitions.
//!
//! Defines the CLI structure for the allocator using `clap`. Handlers live
//! in one module per subcommand.

pub mod check;
pub mod output;
pub mod positions;
pub mod rankings;
pub mod risk;
pub mod run;
pub mod strategies;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::adapter::outbound::snapshot::SnapshotDataSource;
use crate::app::Config;
use crate::error::Result;

/// Capital allocation and risk monitoring for GM liquidity pools
#[derive(Parser, Debug)]
#[command(name = "gmx-allocator")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a strategy cycle, or keep running with --loop
    Run(RunArgs),

    /// Score and rank the eligible pools
    Rankings(SnapshotArg),

    /// Run a risk check against current positions
    Risk(SnapshotArg),

    /// Show the wallet's positions with value and PnL
    Positions(SnapshotArg),

    /// Validate the configuration file
    CheckConfig,

    /// List available strategies
    Strategies,
}

/// Market data input shared by data-reading commands.
#[derive(Parser, Debug)]
pub struct SnapshotArg {
    /// JSON snapshot of markets, pool stats and positions
    #[arg(long, default_value = "data/snapshot.json")]
    pub snapshot: PathBuf,
}

impl SnapshotArg {
    pub fn load(&self) -> Result<SnapshotDataSource> {
        SnapshotDataSource::from_path(&self.snapshot)
    }
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// New capital available for deposits, in USD
    #[arg(long, default_value = "0")]
    pub capital: Decimal,

    /// Keep running strategy and risk cycles at the configured cadences
    #[arg(long = "loop")]
    pub run_loop: bool,

    /// Generate signals without handing them to the executor
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub data: SnapshotArg,
}

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json));

    match cli.command {
        Commands::Strategies => strategies::list(),
        Commands::CheckConfig => check::execute_config(&cli.config),
        Commands::Run(args) => {
            let config = load_config(&cli.config)?;
            run::execute(config, &args).await
        }
        Commands::Rankings(args) => {
            let config = load_config(&cli.config)?;
            rankings::execute(&config, &args).await
        }
        Commands::Risk(args) => {
            let config = load_config(&cli.config)?;
            risk::execute(&config, &args).await
        }
        Commands::Positions(args) => {
            let config = load_config(&cli.config)?;
            positions::execute(&config, &args).await
        }
    }
}

fn load_config(path: &std::path::Path) -> Result<Config> {
    let config = Config::load(path)?;
    config.init_logging();
    Ok(config)
}
