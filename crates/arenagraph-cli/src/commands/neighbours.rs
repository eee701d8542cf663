//! Neighbours command - list the adjacency of one node

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use super::read_graph;
use crate::GlobalOptions;

/// Arguments for the neighbours command
#[derive(clap::Args, Debug)]
pub struct NeighboursArgs {
    /// Graph file to read
    file: PathBuf,

    /// Name of the node to start from
    node: String,

    /// Which adjacency list to follow
    #[arg(long, short = 'd', value_enum, default_value_t = Direction::Forward)]
    direction: Direction,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Along edges leaving the node
    Forward,
    /// Against edges entering the node
    Backward,
}

#[derive(Debug, Serialize)]
struct NeighbourEntry<'a> {
    node: &'a str,
    edge: &'a str,
}

pub fn execute(args: NeighboursArgs, _global: &GlobalOptions) -> Result<()> {
    let decoded = read_graph(&args.file)?;
    let graph = &decoded.graph;

    let start = graph
        .node_index(&args.node)
        .with_context(|| format!("No node named '{}' in {}", args.node, args.file.display()))?;
    let list = match args.direction {
        Direction::Forward => graph.forward_neighbours(start)?,
        Direction::Backward => graph.backward_neighbours(start)?,
    };

    let entries = list
        .iter()
        .map(|n| -> Result<NeighbourEntry<'_>> {
            Ok(NeighbourEntry {
                node: graph.node(n.node)?.name.as_str(),
                edge: graph.edge(n.edge)?.name.as_str(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}\t{}", entry.node, entry.edge);
        }
    }
    Ok(())
}
