//! Shared helpers for integration tests.

#![allow(dead_code)]

use arenagraph_core::{Graph, Neighbour};
use std::path::PathBuf;

/// Path to a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Check that adjacency lists and pools agree.
///
/// Returns one message per violation; an empty vector means the graph is
/// consistent.
pub fn adjacency_violations(graph: &Graph) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, _) in graph.nodes() {
        let lists: Vec<(&str, &[Neighbour])> = vec![
            ("forward", graph.forward_neighbours(i).unwrap()),
            ("backward", graph.backward_neighbours(i).unwrap()),
        ];
        for (direction, list) in lists {
            for n in list {
                if !graph.node_allowed(n.node) {
                    errors.push(format!("{direction}[{i}] points at deleted node {}", n.node));
                }
                match graph.edge(n.edge) {
                    Err(_) => errors.push(format!(
                        "{direction}[{i}] points at deleted edge {}",
                        n.edge
                    )),
                    Ok(edge) => {
                        let expected = match direction {
                            "forward" if graph.is_directed() => (edge.head, edge.tail),
                            "backward" if graph.is_directed() => (edge.tail, edge.head),
                            _ if edge.head == i => (edge.head, edge.tail),
                            _ => (edge.tail, edge.head),
                        };
                        if expected != (i, n.node) {
                            errors.push(format!(
                                "{direction}[{i}] record {:?} does not match edge {}",
                                n, n.edge
                            ));
                        }
                    }
                }
            }
        }
    }

    // Each allowed edge is recorded exactly once per endpoint list.
    for (j, edge) in graph.edges() {
        let count = |list: &[Neighbour]| list.iter().filter(|n| n.edge == j).count();
        let at_head = count(graph.forward_neighbours(edge.head).unwrap());
        let at_tail = if graph.is_directed() {
            count(graph.backward_neighbours(edge.tail).unwrap())
        } else {
            count(graph.forward_neighbours(edge.tail).unwrap())
        };
        let (want_head, want_tail) = if !graph.is_directed() && edge.is_loop() {
            (2, 2)
        } else {
            (1, 1)
        };
        if at_head != want_head || at_tail != want_tail {
            errors.push(format!(
                "edge {j} recorded {at_head}x at head and {at_tail}x at tail"
            ));
        }
    }

    errors
}

/// Small deterministic generator so property tests need no extra crates.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}
