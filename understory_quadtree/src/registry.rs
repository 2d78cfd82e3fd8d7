// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A quadtree paired with an id-to-box table.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::config::QuadTreeConfig;
use crate::error::QuadTreeError;
use crate::tree::QuadTree;
use crate::types::{Aabb, Node};

/// Owns a [`QuadTree`] and remembers where every node was last placed.
///
/// The bare tree locates nodes along the path a caller-supplied box selects,
/// so a stale box can miss a stored node. The registry always searches with
/// the recorded box, rejects duplicate ids, and reports failures as
/// [`QuadTreeError`]s.
#[derive(Debug)]
pub struct NodeRegistry {
    tree: QuadTree,
    locations: BTreeMap<u32, Aabb>,
}

impl NodeRegistry {
    /// Create an empty registry over `region` with the default configuration.
    pub fn new(region: Aabb) -> Result<Self, QuadTreeError> {
        Self::with_config(region, QuadTreeConfig::default())
    }

    /// Create an empty registry over `region` with a custom configuration.
    pub fn with_config(region: Aabb, config: QuadTreeConfig) -> Result<Self, QuadTreeError> {
        Ok(Self {
            tree: QuadTree::try_with_config(region, config)?,
            locations: BTreeMap::new(),
        })
    }

    /// The underlying tree, for traversal and queries.
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: u32) -> bool {
        self.locations.contains_key(&id)
    }

    /// The recorded box for `id`.
    pub fn get(&self, id: u32) -> Option<Aabb> {
        self.locations.get(&id).copied()
    }

    /// Registered nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.locations
            .iter()
            .map(|(&id, &aabb)| Node::new(id, aabb))
    }

    /// Insert a node with a fresh id.
    pub fn insert(&mut self, id: u32, aabb: Aabb) -> Result<(), QuadTreeError> {
        if self.locations.contains_key(&id) {
            return Err(QuadTreeError::DuplicateId(id));
        }
        if !self.tree.insert(Node::new(id, aabb)) {
            return Err(QuadTreeError::OutOfBounds(id));
        }
        self.locations.insert(id, aabb);
        Ok(())
    }

    /// Remove a node, returning its last box.
    pub fn remove(&mut self, id: u32) -> Result<Aabb, QuadTreeError> {
        let aabb = self.get(id).ok_or(QuadTreeError::NotFound(id))?;
        if !self.tree.remove_node(id, &aabb) {
            return Err(QuadTreeError::NotFound(id));
        }
        self.locations.remove(&id);
        Ok(aabb)
    }

    /// Move a node to `aabb`.
    ///
    /// If `aabb` does not fit the tree the node is removed and unregistered,
    /// as a removal followed by a failed insert would leave it.
    pub fn move_node(&mut self, id: u32, aabb: Aabb) -> Result<(), QuadTreeError> {
        self.remove(id)?;
        if !self.tree.insert(Node::new(id, aabb)) {
            return Err(QuadTreeError::OutOfBounds(id));
        }
        self.locations.insert(id, aabb);
        Ok(())
    }

    /// Ids of other nodes overlapping the recorded box of `id`.
    pub fn collisions(&self, id: u32) -> Result<Vec<u32>, QuadTreeError> {
        let aabb = self.get(id).ok_or(QuadTreeError::NotFound(id))?;
        Ok(self.tree.collisions(id, &aabb))
    }

    /// Ids of nodes overlapping `aabb`.
    pub fn query(&self, aabb: &Aabb) -> Vec<u32> {
        self.tree.query(aabb)
    }

    /// Collapse every eligible level. See [`QuadTree::compact`].
    pub fn compact(&mut self) -> usize {
        self.tree.compact()
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.locations.clear();
    }
}
