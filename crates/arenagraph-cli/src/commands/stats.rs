//! Stats command - summarise a graph file

use std::path::PathBuf;

use anyhow::Result;
use arenagraph_core::{GraphStats, Language};
use serde::Serialize;

use super::read_graph;
use crate::GlobalOptions;

/// Arguments for the stats command
#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Graph file to read
    file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    name: String,
    language: Language,
    #[serde(flatten)]
    stats: GraphStats,
}

pub fn execute(args: StatsArgs, _global: &GlobalOptions) -> Result<()> {
    let decoded = read_graph(&args.file)?;
    let report = StatsReport {
        name: decoded.graph.auto_name(),
        language: decoded.language,
        stats: decoded.graph.stats(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("name:     {}", report.name);
    println!("language: {}", report.language);
    println!("directed: {}", report.stats.directed);
    println!(
        "nodes:    {} ({} slots)",
        report.stats.node_count, report.stats.node_slots
    );
    println!(
        "edges:    {} ({} slots)",
        report.stats.edge_count, report.stats.edge_slots
    );
    Ok(())
}
