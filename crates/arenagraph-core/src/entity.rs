//! Node and edge values stored in the graph arenas.
//!
//! Entities never reference each other directly. An edge names its endpoints
//! by node index, and those indices are only meaningful through the owning
//! [`Graph`](crate::graph::Graph).

use crate::error::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can live in an [`EntityPool`](crate::pool::EntityPool).
pub trait Entity {
    /// Arena this entity type belongs to, used in error reports.
    const KIND: EntityKind;

    /// Identity name. Must be non-empty for the entity to be allowed.
    fn name(&self) -> &str;
}

// ============================================================================
// Node
// ============================================================================

/// Planar position of a node. Both coordinates are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node name, referenced by edge records in the text format
    pub name: String,

    /// Optional planar position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Optional node weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Node {
    /// Create a node without coordinates or weight
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates: None,
            weight: None,
        }
    }

    /// Create a node at `(x, y)`
    pub fn with_coordinates(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Some(Coordinates::new(x, y)),
            weight: None,
        }
    }

    /// Attach a weight to the node
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn x(&self) -> Option<f64> {
        self.coordinates.map(|c| c.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.coordinates.map(|c| c.y)
    }
}

impl Entity for Node {
    const KIND: EntityKind = EntityKind::Node;

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(c) = self.coordinates {
            write!(f, " ({}, {})", c.x, c.y)?;
        }
        if let Some(w) = self.weight {
            write!(f, " [{}]", w)?;
        }
        Ok(())
    }
}

// ============================================================================
// Edge
// ============================================================================

/// A graph edge between two node indices.
///
/// For directed graphs the edge runs from `head` to `tail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge name
    pub name: String,

    /// Index of the node the edge leaves
    pub head: usize,

    /// Index of the node the edge enters
    pub tail: usize,

    /// Optional edge weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(name: impl Into<String>, head: usize, tail: usize) -> Self {
        Self {
            name: name.into(),
            head,
            tail,
            weight: None,
        }
    }

    /// Attach a weight to the edge
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// True when both endpoints are the same node
    pub fn is_loop(&self) -> bool {
        self.head == self.tail
    }
}

impl Entity for Edge {
    const KIND: EntityKind = EntityKind::Edge;

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.name, self.head, self.tail)?;
        if let Some(w) = self.weight {
            write!(f, " [{}]", w)?;
        }
        Ok(())
    }
}
