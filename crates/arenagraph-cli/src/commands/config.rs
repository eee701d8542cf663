//! Config command - View and manage configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use arenagraph_config::{ArenaConfig, ConfigLoader};
use clap::Subcommand;
use serde::Serialize;

use crate::GlobalOptions;

/// Config management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Create `.arenagraph/config.toml` in the current directory
    Init,

    /// Print the effective (merged) configuration
    Show(ShowArgs),

    /// Show configuration file paths
    Path(PathArgs),
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the path command
#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Configuration paths
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPaths {
    /// Global config file path
    pub global: Option<PathBuf>,
    /// Local config file path
    pub local: PathBuf,
    pub global_exists: bool,
    pub local_exists: bool,
}

pub fn execute(cmd: ConfigCommand, config: ArenaConfig, global: &GlobalOptions) -> Result<()> {
    match cmd {
        ConfigCommand::Init => execute_init(global),
        ConfigCommand::Show(args) => execute_show(args, &config),
        ConfigCommand::Path(args) => execute_path(args),
    }
}

fn execute_init(global: &GlobalOptions) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let path = ConfigLoader::new()
        .init_local(&cwd)
        .context("Failed to initialize local config")?;
    if !global.quiet {
        println!("{}", path.display());
    }
    Ok(())
}

fn execute_show(args: ShowArgs, config: &ArenaConfig) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

fn execute_path(args: PathArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let loader = ConfigLoader::new();
    let global = loader.global_config_path();
    let local = loader.local_config_path(&cwd);

    let paths = ConfigPaths {
        global_exists: global.as_ref().is_some_and(|p| p.exists()),
        local_exists: local.exists(),
        global,
        local,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    let mark = |exists: bool| if exists { "" } else { " (not found)" };
    match paths.global {
        Some(ref p) => println!("global: {}{}", p.display(), mark(paths.global_exists)),
        None => println!("global: <no home directory>"),
    }
    println!("local:  {}{}", paths.local.display(), mark(paths.local_exists));
    Ok(())
}
