//! Forward and backward neighbour lists.
//!
//! A directed graph keeps two tables: `forward[head]` lists the tails reached
//! by outgoing edges and `backward[tail]` lists the heads of incoming edges.
//! An undirected graph keeps only the forward table, with every edge recorded
//! at both endpoints. Backward queries on an undirected index read the forward
//! table, so the two views can never diverge.
//!
//! Removal swaps the last record into the hole. Neighbour order is therefore
//! only insertion order until the first removal from that list.

use serde::{Deserialize, Serialize};

/// Reference to an adjacent node and the edge that connects to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighbour {
    /// Index of the adjacent node
    pub node: usize,
    /// Index of the connecting edge
    pub edge: usize,
}

impl Neighbour {
    pub fn new(node: usize, edge: usize) -> Self {
        Self { node, edge }
    }
}

/// Per-node neighbour lists, kept in lockstep with edge insertion and removal.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    forward: Vec<Vec<Neighbour>>,
    /// `None` for undirected graphs
    backward: Option<Vec<Vec<Neighbour>>>,
}

impl AdjacencyIndex {
    pub fn new(directed: bool) -> Self {
        Self {
            forward: Vec::new(),
            backward: directed.then(Vec::new),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.backward.is_some()
    }

    /// Number of node slots with neighbour lists
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Make sure lists exist for `node`. Slots reused after a deletion already have them.
    pub fn ensure_slot(&mut self, node: usize) {
        if node >= self.forward.len() {
            self.forward.resize_with(node + 1, Vec::new);
        }
        if let Some(backward) = self.backward.as_mut() {
            if node >= backward.len() {
                backward.resize_with(node + 1, Vec::new);
            }
        }
    }

    /// Record edge `edge` running from `head` to `tail`.
    pub fn insert_edge(&mut self, edge: usize, head: usize, tail: usize) {
        self.forward[head].push(Neighbour::new(tail, edge));
        match self.backward.as_mut() {
            Some(backward) => backward[tail].push(Neighbour::new(head, edge)),
            None => self.forward[tail].push(Neighbour::new(head, edge)),
        }
    }

    /// Drop the records of edge `edge` from both endpoint lists.
    pub fn remove_edge(&mut self, edge: usize, head: usize, tail: usize) {
        swap_remove_edge(&mut self.forward[head], edge);
        match self.backward.as_mut() {
            Some(backward) => swap_remove_edge(&mut backward[tail], edge),
            None => swap_remove_edge(&mut self.forward[tail], edge),
        }
    }

    /// Outgoing neighbours of `node`. The caller checks the index.
    pub fn forward(&self, node: usize) -> &[Neighbour] {
        &self.forward[node]
    }

    /// Incoming neighbours of `node`; the forward list for undirected graphs.
    pub fn backward(&self, node: usize) -> &[Neighbour] {
        match self.backward.as_ref() {
            Some(backward) => &backward[node],
            None => &self.forward[node],
        }
    }
}

/// Remove the first record of `edge`, moving the last record into its place.
fn swap_remove_edge(list: &mut Vec<Neighbour>, edge: usize) {
    if let Some(pos) = list.iter().position(|n| n.edge == edge) {
        list.swap_remove(pos);
    }
}
