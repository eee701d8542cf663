//! Error types for the graph engine.

use std::fmt;
use thiserror::Error;

/// Which arena an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Node,
    Edge,
}

impl EntityKind {
    /// Get the lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Node => "node",
            EntityKind::Edge => "edge",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised by the entity pools and the graph engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The index is past the physical end of the pool.
    #[error("{kind} index {index} out of range (pool has {len} slots)")]
    IndexOutOfRange {
        kind: EntityKind,
        index: usize,
        len: usize,
    },

    /// The slot exists but currently holds a tombstone.
    #[error("{kind} {index} has been deleted")]
    EntityDeleted { kind: EntityKind, index: usize },

    /// An edge endpoint does not reference an allowed node.
    #[error("edge '{edge}' has invalid {end} endpoint {index}")]
    InvalidEndpoint {
        edge: String,
        end: &'static str,
        index: usize,
    },

    /// Name lookup found no allowed entity.
    #[error("no {kind} named '{name}'")]
    NotFound { kind: EntityKind, name: String },

    /// Entities need a non-empty name to occupy a slot.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: EntityKind },
}

impl GraphError {
    /// Create a new NotFound error.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// True when the error reports a tombstoned slot.
    pub fn is_deleted(&self) -> bool {
        matches!(self, GraphError::EntityDeleted { .. })
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, GraphError>;
