//! The graph engine.
//!
//! [`Graph`] owns a node pool, an edge pool and the adjacency index, and keeps
//! the three consistent under every mutation:
//!
//! - every edge connects two allowed nodes
//! - every allowed edge has exactly one record at each endpoint list
//! - deleting a node first deletes every edge touching it
//!
//! Indices are stable: an allowed node or edge keeps its index until it is
//! deleted, whatever happens elsewhere in the graph.

use crate::adjacency::{AdjacencyIndex, Neighbour};
use crate::entity::{Edge, Node};
use crate::error::{EntityKind, GraphError, Result};
use crate::pool::EntityPool;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Index-addressed graph with lazy deletion and slot reuse.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Optional graph name, see [`Graph::auto_name`]
    name: Option<String>,

    nodes: EntityPool<Node>,
    edges: EntityPool<Edge>,
    adjacency: AdjacencyIndex,
}

/// Summary counts for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub node_slots: usize,
    pub edge_slots: usize,
}

impl Graph {
    /// Create an empty graph
    pub fn new(directed: bool) -> Self {
        Self {
            name: None,
            nodes: EntityPool::new(),
            edges: EntityPool::new(),
            adjacency: AdjacencyIndex::new(directed),
        }
    }

    /// Create an empty directed graph
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Create an empty undirected graph
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Create an empty graph sized for a bulk load
    pub fn with_capacity(directed: bool, nodes: usize, edges: usize) -> Self {
        Self {
            name: None,
            nodes: EntityPool::with_capacity(nodes),
            edges: EntityPool::with_capacity(edges),
            adjacency: AdjacencyIndex::new(directed),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.adjacency.is_directed()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The explicit name, or one derived from directedness and counts.
    pub fn auto_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "graph_directed-{}_{}-nodes_{}-edges",
                self.is_directed(),
                self.node_count(),
                self.edge_count()
            ),
        }
    }

    /// Number of allowed nodes
    pub fn node_count(&self) -> usize {
        self.nodes.live_count()
    }

    /// Number of allowed edges
    pub fn edge_count(&self) -> usize {
        self.edges.live_count()
    }

    /// Physical node slot count, tombstones included
    pub fn node_slots(&self) -> usize {
        self.nodes.len()
    }

    /// Physical edge slot count, tombstones included
    pub fn edge_slots(&self) -> usize {
        self.edges.len()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            directed: self.is_directed(),
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            node_slots: self.node_slots(),
            edge_slots: self.edge_slots(),
        }
    }

    // ------------------------------------------------------------------------
    // Node Operations
    // ------------------------------------------------------------------------

    /// Add a node, reusing the lowest deleted slot if there is one.
    pub fn add_node(&mut self, node: Node) -> Result<usize> {
        let index = self.nodes.add(node)?;
        self.adjacency.ensure_slot(index);
        trace!(index, "added node");
        Ok(index)
    }

    pub fn node(&self, i: usize) -> Result<&Node> {
        self.nodes.get(i)
    }

    pub fn node_allowed(&self, i: usize) -> bool {
        self.nodes.is_allowed(i)
    }

    /// Allowed nodes in ascending index order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter()
    }

    /// Replace the weight of an allowed node
    pub fn set_node_weight(&mut self, i: usize, weight: Option<f64>) -> Result<()> {
        self.nodes.get_mut(i)?.weight = weight;
        Ok(())
    }

    /// Index of the first allowed node called `name`. Linear in the slot count.
    pub fn node_index(&self, name: &str) -> Result<usize> {
        self.nodes
            .position_by_name(name)
            .ok_or_else(|| GraphError::not_found(EntityKind::Node, name))
    }

    /// The first allowed node called `name`. Linear in the slot count.
    pub fn node_by_name(&self, name: &str) -> Result<&Node> {
        let i = self.node_index(name)?;
        self.nodes.get(i)
    }

    /// Build a `name -> index` map over allowed nodes.
    ///
    /// The map is a snapshot; it is not updated by later mutations. When names
    /// repeat, the lowest index wins, matching [`Graph::node_index`].
    pub fn node_name_index(&self) -> HashMap<String, usize> {
        let mut map = HashMap::with_capacity(self.node_count());
        for (i, node) in self.nodes.iter() {
            map.entry(node.name.clone()).or_insert(i);
        }
        map
    }

    /// Delete a node and every edge incident to it.
    ///
    /// Returns `Ok(false)` if the node was already deleted.
    pub fn delete_node(&mut self, i: usize) -> Result<bool> {
        match self.nodes.get(i) {
            Ok(_) => {}
            Err(e) if e.is_deleted() => return Ok(false),
            Err(e) => return Err(e),
        }

        // Edge deletion swap-removes from these same lists, so work from copies.
        let mut incident: Vec<Neighbour> = self.adjacency.forward(i).to_vec();
        if self.is_directed() {
            incident.extend_from_slice(self.adjacency.backward(i));
        }

        let mut removed = 0usize;
        for neighbour in &incident {
            // Undirected self-loops and directed loops appear twice.
            if self.delete_edge(neighbour.edge)? {
                removed += 1;
            }
        }
        debug_assert!(self.adjacency.forward(i).is_empty());
        debug_assert!(self.adjacency.backward(i).is_empty());

        self.nodes.delete(i)?;
        debug!(node = i, edges_removed = removed, "deleted node");
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Edge Operations
    // ------------------------------------------------------------------------

    /// Add an edge between two allowed nodes, reusing the lowest deleted slot.
    pub fn add_edge(&mut self, edge: Edge) -> Result<usize> {
        for (end, index) in [("head", edge.head), ("tail", edge.tail)] {
            if !self.nodes.is_allowed(index) {
                return Err(GraphError::InvalidEndpoint {
                    edge: edge.name.clone(),
                    end,
                    index,
                });
            }
        }

        let (head, tail) = (edge.head, edge.tail);
        let index = self.edges.add(edge)?;
        self.adjacency.insert_edge(index, head, tail);
        trace!(index, head, tail, "added edge");
        Ok(index)
    }

    pub fn edge(&self, j: usize) -> Result<&Edge> {
        self.edges.get(j)
    }

    pub fn edge_allowed(&self, j: usize) -> bool {
        self.edges.is_allowed(j)
    }

    /// Allowed edges in ascending index order
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Edge)> {
        self.edges.iter()
    }

    /// `(head, tail)` of an allowed edge
    pub fn endpoints(&self, j: usize) -> Result<(usize, usize)> {
        let edge = self.edges.get(j)?;
        Ok((edge.head, edge.tail))
    }

    /// Replace the weight of an allowed edge
    pub fn set_edge_weight(&mut self, j: usize, weight: Option<f64>) -> Result<()> {
        self.edges.get_mut(j)?.weight = weight;
        Ok(())
    }

    /// Index of the first allowed edge called `name`. Linear in the slot count.
    pub fn edge_index(&self, name: &str) -> Result<usize> {
        self.edges
            .position_by_name(name)
            .ok_or_else(|| GraphError::not_found(EntityKind::Edge, name))
    }

    /// The first allowed edge called `name`. Linear in the slot count.
    pub fn edge_by_name(&self, name: &str) -> Result<&Edge> {
        let j = self.edge_index(name)?;
        self.edges.get(j)
    }

    /// Delete an edge and its neighbour records.
    ///
    /// Returns `Ok(false)` if the edge was already deleted.
    pub fn delete_edge(&mut self, j: usize) -> Result<bool> {
        let (head, tail) = match self.edges.get(j) {
            Ok(edge) => (edge.head, edge.tail),
            Err(e) if e.is_deleted() => return Ok(false),
            Err(e) => return Err(e),
        };

        self.adjacency.remove_edge(j, head, tail);
        self.edges.delete(j)?;
        trace!(index = j, head, tail, "deleted edge");
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Adjacency Queries
    // ------------------------------------------------------------------------

    /// Neighbours reached by edges leaving node `i`.
    ///
    /// For undirected graphs this is every neighbour of `i`. Order is insertion
    /// order only until an edge is removed from the list.
    pub fn forward_neighbours(&self, i: usize) -> Result<&[Neighbour]> {
        self.check_node(i)?;
        Ok(self.adjacency.forward(i))
    }

    /// Neighbours with edges entering node `i`.
    ///
    /// For undirected graphs this is the same slice as [`Graph::forward_neighbours`].
    pub fn backward_neighbours(&self, i: usize) -> Result<&[Neighbour]> {
        self.check_node(i)?;
        Ok(self.adjacency.backward(i))
    }

    /// Alias of [`Graph::forward_neighbours`], intended for undirected graphs
    pub fn neighbours(&self, i: usize) -> Result<&[Neighbour]> {
        self.forward_neighbours(i)
    }

    pub fn forward_extent(&self, i: usize) -> Result<usize> {
        self.forward_neighbours(i).map(<[Neighbour]>::len)
    }

    pub fn backward_extent(&self, i: usize) -> Result<usize> {
        self.backward_neighbours(i).map(<[Neighbour]>::len)
    }

    /// Alias of [`Graph::forward_extent`], intended for undirected graphs
    pub fn extent(&self, i: usize) -> Result<usize> {
        self.forward_extent(i)
    }

    fn check_node(&self, i: usize) -> Result<()> {
        self.nodes.get(i).map(|_| ())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::directed()
    }
}
