//! Convert command - read a graph file and write it back out
//!
//! Writing drops tombstones and comments, so converting also normalises a
//! file. The output language comes from `--language`, else from config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use arenagraph_config::{ArenaConfig, ConfigOverrides};
use arenagraph_core::{write_file, Language};

use super::{print_info, read_graph};
use crate::GlobalOptions;

/// Arguments for the convert command
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Graph file to read
    file: PathBuf,

    /// Output file (`.gra`) or directory; defaults to the generated name
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output language (english, german)
    #[arg(long, short = 'l', value_parser = parse_language)]
    language: Option<Language>,

    /// Write count labels and section comments
    #[arg(long)]
    annotate: bool,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse()
}

impl ConvertArgs {
    fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            language: self.language,
            annotate: self.annotate.then_some(true),
            log_level: None,
        }
    }
}

pub fn execute(args: ConvertArgs, mut config: ArenaConfig, global: &GlobalOptions) -> Result<()> {
    config.apply_overrides(&args.to_config_overrides());
    let options = config.codec.write_options();

    let decoded = read_graph(&args.file)?;
    if decoded.language != options.language {
        print_info(
            &format!(
                "Translating {} -> {}",
                decoded.language, options.language
            ),
            global.quiet,
        );
    }

    let written = write_file(&decoded.graph, args.output.as_deref(), options)
        .context("Failed to write graph")?;
    println!("{}", written.display());
    Ok(())
}
