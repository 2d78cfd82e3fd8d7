// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only traversal for renderers and debug dumps.

use crate::tree::QuadTree;
use crate::types::Node;

/// Callbacks for [`QuadTree::visit`].
///
/// Both methods default to doing nothing, so implementors override only what
/// they draw.
pub trait Visitor {
    /// Called once per level, before its nodes and children.
    fn level(&mut self, level: &QuadTree) {
        let _ = level;
    }

    /// Called for each node stored directly at `level`.
    ///
    /// `crosser` is true when `level` is split, meaning the node straddles its
    /// quadrants and could not be pushed into a child.
    fn node(&mut self, level: &QuadTree, node: &Node, crosser: bool) {
        let _ = (level, node, crosser);
    }
}

/// Visitor that tallies levels, leaves, stored nodes and boundary crossers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of levels, including the root.
    pub levels: usize,
    /// Number of leaf levels.
    pub leaves: usize,
    /// Number of stored nodes.
    pub nodes: usize,
    /// Number of nodes held at split levels.
    pub crossers: usize,
    /// Deepest level depth seen.
    pub max_depth: u32,
}

impl Stats {
    /// Collect statistics for `tree`.
    pub fn of(tree: &QuadTree) -> Self {
        let mut stats = Self::default();
        tree.visit(&mut stats);
        stats
    }
}

impl Visitor for Stats {
    fn level(&mut self, level: &QuadTree) {
        self.levels += 1;
        if level.is_leaf() {
            self.leaves += 1;
        }
        self.max_depth = self.max_depth.max(level.depth());
    }

    fn node(&mut self, _level: &QuadTree, _node: &Node, crosser: bool) {
        self.nodes += 1;
        if crosser {
            self.crossers += 1;
        }
    }
}
