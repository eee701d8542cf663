//! Dense arena of entities addressed by stable indices.
//!
//! Deleting an entity leaves a tombstone in its slot. The pool never shrinks;
//! the lowest tombstone is filled by the next [`EntityPool::add`].

use crate::entity::Entity;
use crate::error::{GraphError, Result};

/// Index-addressed storage with tombstones and slot reuse.
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    /// `None` marks a tombstone
    slots: Vec<Option<T>>,

    /// Number of `Some` slots
    live: usize,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityPool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Create an empty pool with room for `capacity` slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Physical slot count, tombstones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of allowed entities
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// True when the slot holds a live entity. Out-of-range indices are not allowed.
    pub fn is_allowed(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Index of the first tombstone, if any deletion left a gap
    fn first_tombstone(&self) -> Option<usize> {
        if self.live == self.slots.len() {
            return None;
        }
        self.slots.iter().position(Option::is_none)
    }

    /// Iterate over allowed entities in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (i, e)))
    }
}

impl<T: Entity> EntityPool<T> {
    /// Store an entity, reusing the lowest tombstone if one exists.
    ///
    /// Returns the slot index.
    pub fn add(&mut self, entity: T) -> Result<usize> {
        if entity.name().is_empty() {
            return Err(GraphError::EmptyName { kind: T::KIND });
        }

        let index = match self.first_tombstone() {
            Some(index) => {
                self.slots[index] = Some(entity);
                index
            }
            None => {
                self.slots.push(Some(entity));
                self.slots.len() - 1
            }
        };
        self.live += 1;
        Ok(index)
    }

    /// Checked access to an allowed entity
    pub fn get(&self, index: usize) -> Result<&T> {
        match self.slots.get(index) {
            None => Err(self.out_of_range(index)),
            Some(None) => Err(GraphError::EntityDeleted {
                kind: T::KIND,
                index,
            }),
            Some(Some(entity)) => Ok(entity),
        }
    }

    /// Checked mutable access to an allowed entity.
    ///
    /// Callers must not change fields the owning graph indexes on.
    pub(crate) fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            None => Err(GraphError::IndexOutOfRange {
                kind: T::KIND,
                index,
                len,
            }),
            Some(None) => Err(GraphError::EntityDeleted {
                kind: T::KIND,
                index,
            }),
            Some(Some(entity)) => Ok(entity),
        }
    }

    /// Tombstone the slot.
    ///
    /// Returns `Ok(false)` if the slot was already a tombstone.
    pub fn delete(&mut self, index: usize) -> Result<bool> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or(GraphError::IndexOutOfRange {
            kind: T::KIND,
            index,
            len,
        })?;
        if slot.take().is_none() {
            return Ok(false);
        }
        self.live -= 1;
        Ok(true)
    }

    /// Index of the first allowed entity with this name
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.iter()
            .find(|(_, entity)| entity.name() == name)
            .map(|(i, _)| i)
    }

    fn out_of_range(&self, index: usize) -> GraphError {
        GraphError::IndexOutOfRange {
            kind: T::KIND,
            index,
            len: self.slots.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Node;
    use crate::error::EntityKind;

    fn pool_abc() -> EntityPool<Node> {
        let mut pool = EntityPool::new();
        for name in ["A", "B", "C"] {
            pool.add(Node::new(name)).unwrap();
        }
        pool
    }

    #[test]
    fn test_add_appends() {
        let pool = pool_abc();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.live_count(), 3);
        assert_eq!(pool.get(1).unwrap().name, "B");
    }

    #[test]
    fn test_delete_keeps_slot() {
        let mut pool = pool_abc();
        assert!(pool.delete(1).unwrap());
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.live_count(), 2);
        assert!(!pool.is_allowed(1));
        assert_eq!(
            pool.get(1),
            Err(GraphError::EntityDeleted {
                kind: EntityKind::Node,
                index: 1
            })
        );
    }

    #[test]
    fn test_delete_twice_is_noop() {
        let mut pool = pool_abc();
        assert!(pool.delete(0).unwrap());
        assert!(!pool.delete(0).unwrap());
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn test_reuse_lowest_tombstone() {
        let mut pool = pool_abc();
        pool.delete(2).unwrap();
        pool.delete(0).unwrap();

        assert_eq!(pool.add(Node::new("D")).unwrap(), 0);
        assert_eq!(pool.add(Node::new("E")).unwrap(), 2);
        assert_eq!(pool.add(Node::new("F")).unwrap(), 3);
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.live_count(), 4);
    }

    #[test]
    fn test_out_of_range() {
        let mut pool = pool_abc();
        let expected = GraphError::IndexOutOfRange {
            kind: EntityKind::Node,
            index: 3,
            len: 3,
        };
        assert_eq!(pool.get(3).unwrap_err(), expected);
        assert_eq!(pool.delete(3).unwrap_err(), expected);
        assert!(!pool.is_allowed(3));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut pool: EntityPool<Node> = EntityPool::new();
        assert_eq!(
            pool.add(Node::new("")),
            Err(GraphError::EmptyName {
                kind: EntityKind::Node
            })
        );
        assert!(pool.is_empty());
    }

    #[test]
    fn test_iter_skips_tombstones() {
        let mut pool = pool_abc();
        pool.delete(1).unwrap();
        let names: Vec<_> = pool.iter().map(|(i, n)| (i, n.name.as_str())).collect();
        assert_eq!(names, vec![(0, "A"), (2, "C")]);
        assert_eq!(pool.position_by_name("C"), Some(2));
        assert_eq!(pool.position_by_name("B"), None);
    }
}
