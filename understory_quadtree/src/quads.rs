// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed view of a level's children.

use crate::tree::QuadTree;
use crate::types::Quadrant;

/// The four children of a [`QuadTree`] level, or none for a leaf.
///
/// Produced on demand by [`QuadTree::quads`]. Either all four references are
/// present or none are.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quads<'a> {
    /// Child covering the minimum-x, minimum-y quadrant.
    pub top_left: Option<&'a QuadTree>,
    /// Child covering the maximum-x, minimum-y quadrant.
    pub top_right: Option<&'a QuadTree>,
    /// Child covering the minimum-x, maximum-y quadrant.
    pub bottom_left: Option<&'a QuadTree>,
    /// Child covering the maximum-x, maximum-y quadrant.
    pub bottom_right: Option<&'a QuadTree>,
}

impl<'a> Quads<'a> {
    /// True when the level is a leaf.
    pub fn is_empty(&self) -> bool {
        self.top_left.is_none()
    }

    /// The child for `quadrant`.
    pub fn get(&self, quadrant: Quadrant) -> Option<&'a QuadTree> {
        match quadrant {
            Quadrant::TopLeft => self.top_left,
            Quadrant::TopRight => self.top_right,
            Quadrant::BottomLeft => self.bottom_left,
            Quadrant::BottomRight => self.bottom_right,
        }
    }

    /// Present children in [`Quadrant::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &'a QuadTree> + use<'a> {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aabb, Node};

    #[test]
    fn leaf_has_no_quads() {
        let tree = QuadTree::new(Aabb::from_xywh(0.0, 0.0, 10.0, 10.0));
        let quads = tree.quads();
        assert!(quads.is_empty());
        assert_eq!(quads.iter().count(), 0);
        assert!(Quadrant::ALL.iter().all(|q| quads.get(*q).is_none()));
    }

    #[test]
    fn split_exposes_all_four_in_order() {
        let mut tree = QuadTree::new(Aabb::from_xywh(0.0, 0.0, 10.0, 10.0));
        for i in 0..5 {
            assert!(tree.insert(Node::new(i, Aabb::from_xywh(0.0, 0.0, 1.0, 1.0))));
        }
        let quads = tree.quads();
        assert!(!quads.is_empty());
        let regions: alloc::vec::Vec<_> = quads.iter().map(|q| *q.region()).collect();
        assert_eq!(regions.len(), 4);
        for (quadrant, region) in Quadrant::ALL.into_iter().zip(regions) {
            assert_eq!(region, tree.region().quadrant(quadrant));
            assert_eq!(
                quads.get(quadrant).map(|q| q.id()),
                tree.child(quadrant).map(|q| q.id())
            );
        }
    }
}
