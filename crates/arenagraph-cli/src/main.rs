//! arenagraph CLI - inspect, check and convert graph files
//!
//! # Usage
//!
//! ```bash
//! # Summarise a graph file
//! arenagraph stats roads.gra
//!
//! # Rewrite a file in German with annotations
//! arenagraph convert roads.gra --language german --annotate --output out/
//!
//! # List the nodes reachable from one node
//! arenagraph neighbours roads.gra Start
//! ```

use std::path::PathBuf;

use anyhow::Result;
use arenagraph_config::ConfigOverrides;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

/// arenagraph - index-addressed graphs stored as plain text
#[derive(Parser, Debug)]
#[command(name = "arenagraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Path to configuration file (skips global and local config)
    #[arg(long, short = 'c', global = true, env = "ARENAGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show node and edge counts of a graph file
    Stats(commands::stats::StatsArgs),

    /// Read a graph file and write it back out
    Convert(commands::convert::ConvertArgs),

    /// List the neighbours of a node
    Neighbours(commands::neighbours::NeighboursArgs),

    /// Validate a graph file
    Check(commands::check::CheckArgs),

    /// View and manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl GlobalOptions {
    /// Convert global options to config overrides
    fn to_config_overrides(&self) -> ConfigOverrides {
        let log_level = if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        };
        ConfigOverrides {
            log_level: log_level.map(str::to_string),
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::load_config(&cli.global)?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.logging.level.parse().unwrap_or(Level::INFO))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Stats(args) => commands::stats::execute(args, &cli.global),
        Commands::Convert(args) => commands::convert::execute(args, config, &cli.global),
        Commands::Neighbours(args) => commands::neighbours::execute(args, &cli.global),
        Commands::Check(args) => commands::check::execute(args, &cli.global),
        Commands::Config(cmd) => commands::config::execute(cmd, config, &cli.global),
    }
}
