// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs shared by every level of a tree.

/// Default number of nodes a leaf holds before it splits.
pub const DEFAULT_MAX_CAPACITY: usize = 4;

/// Per-tree configuration. Children inherit their parent's configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadTreeConfig {
    /// Leaf capacity. Inserting into a full leaf splits it; a split level
    /// collapses once it and its leaf children together hold fewer nodes.
    ///
    /// A capacity of zero is treated as one.
    pub max_capacity: usize,
}

impl QuadTreeConfig {
    /// Return a copy with the given leaf capacity.
    pub const fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub(crate) const fn capacity(&self) -> usize {
        if self.max_capacity == 0 {
            1
        } else {
            self.max_capacity
        }
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}
