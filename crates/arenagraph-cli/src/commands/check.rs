//! Check command - validate a graph file

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use super::read_graph;
use crate::GlobalOptions;

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Graph file to validate
    file: PathBuf,
}

pub fn execute(args: CheckArgs, global: &GlobalOptions) -> Result<()> {
    let decoded = read_graph(&args.file)?;
    let graph = &decoded.graph;
    debug!(language = %decoded.language, "Parsed {:?}", args.file);

    if !global.quiet {
        println!(
            "ok: {} ({}, {} nodes, {} edges)",
            args.file.display(),
            decoded.language.directedness_token(graph.is_directed()),
            graph.node_count(),
            graph.edge_count()
        );
    }
    Ok(())
}
