//! arenagraph core - index-addressed graph engine and text codec
//!
//! This crate provides:
//! - `EntityPool`: dense arena with tombstones and lowest-slot reuse
//! - `AdjacencyIndex`: forward/backward neighbour lists with undirected aliasing
//! - `Graph`: the engine tying both together with cascading deletes
//! - a line-oriented text format with reader, writer and file helpers
//!
//! ```
//! use arenagraph_core::{Edge, Graph, Node};
//!
//! let mut graph = Graph::directed();
//! let a = graph.add_node(Node::with_coordinates("A", 0.0, 0.0)).unwrap();
//! let b = graph.add_node(Node::with_coordinates("B", 1.0, 0.0)).unwrap();
//! graph.add_edge(Edge::new("AB", a, b)).unwrap();
//!
//! assert_eq!(graph.forward_extent(a).unwrap(), 1);
//! assert!(graph.delete_node(b).unwrap());
//! assert_eq!(graph.edge_count(), 0);
//! ```

pub mod adjacency;
pub mod codec;
pub mod entity;
pub mod error;
pub mod files;
pub mod graph;
pub mod pool;

// Re-exports for convenience
pub use adjacency::{AdjacencyIndex, Neighbour};
pub use codec::{
    decode, parse_directedness, read_str, CodecError, Decoded, GraphWriter, Language,
    WriteOptions,
};
pub use entity::{Coordinates, Edge, Entity, Node};
pub use error::{EntityKind, GraphError};
pub use files::{read_file, resolve_output_path, write_file, GRAPH_FILE_EXTENSION};
pub use graph::{Graph, GraphStats};
pub use pool::EntityPool;
