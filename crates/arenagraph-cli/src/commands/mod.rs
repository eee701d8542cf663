//! CLI command implementations

pub mod check;
pub mod config;
pub mod convert;
pub mod neighbours;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use arenagraph_config::{ArenaConfig, ConfigLoader};
use arenagraph_core::{read_file, Decoded};

use crate::GlobalOptions;

/// Load configuration with optional config file override.
///
/// `--verbose`/`--quiet` are applied as a log level override.
pub fn load_config(global: &GlobalOptions) -> Result<ArenaConfig> {
    let mut loader = ConfigLoader::new();
    let overrides = global.to_config_overrides();

    if let Some(ref config_path) = global.config {
        return loader
            .load_file(config_path, Some(&overrides))
            .with_context(|| format!("Failed to load config file {}", config_path.display()));
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    loader
        .load(&cwd, Some(&overrides))
        .context("Failed to load configuration")
}

/// Read a graph file, attaching the path to any error.
pub fn read_graph(path: &Path) -> Result<Decoded> {
    read_file(path).with_context(|| format!("Failed to read graph {}", path.display()))
}

/// Print an info message (respects quiet flag).
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}
