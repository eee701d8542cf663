//! File-level wrappers around the text codec.
//!
//! Input is read whole before parsing and output is rendered whole before it
//! is written, so a failed parse or render never touches the target file.

use crate::codec::{decode, CodecError, Decoded, GraphWriter, Result, WriteOptions};
use crate::graph::Graph;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension used for graph files.
pub const GRAPH_FILE_EXTENSION: &str = "gra";

/// Read and decode a graph file.
pub fn read_file(path: &Path) -> Result<Decoded> {
    debug!("Reading graph from {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|source| CodecError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&text)
}

/// Work out where a graph should be written.
///
/// - a path ending in `.gra` is used as given
/// - an existing directory gets `<auto_name>.gra` appended
/// - no path means `<auto_name>.gra` in the current directory
pub fn resolve_output_path(target: Option<&Path>, graph: &Graph) -> Result<PathBuf> {
    let file_name = format!("{}.{}", graph.auto_name(), GRAPH_FILE_EXTENSION);
    match target {
        Some(path) if path.extension().is_some_and(|ext| ext == GRAPH_FILE_EXTENSION) => {
            Ok(path.to_path_buf())
        }
        Some(path) if path.is_dir() => Ok(path.join(file_name)),
        Some(path) => Err(CodecError::InvalidOutputPath(path.to_path_buf())),
        None => Ok(PathBuf::from(file_name)),
    }
}

/// Render a graph and write it to the resolved output path.
///
/// Returns the path that was written.
pub fn write_file(graph: &Graph, target: Option<&Path>, options: WriteOptions) -> Result<PathBuf> {
    let path = resolve_output_path(target, graph)?;
    let text = GraphWriter::new(options).write_string(graph)?;
    std::fs::write(&path, text).map_err(|source| CodecError::WriteFile {
        path: path.clone(),
        source,
    })?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Wrote graph to {:?}",
        path
    );
    Ok(path)
}
