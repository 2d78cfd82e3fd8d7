// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core quadtree implementation: structure, updates, queries.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use tracing::{debug, trace};

use crate::config::QuadTreeConfig;
use crate::error::RegionError;
use crate::quads::Quads;
use crate::types::{Aabb, Node, Quadrant};
use crate::visit::Visitor;

/// A dynamic region quadtree over [`Aabb`]s.
///
/// Every level owns a region, the nodes stored directly at that level, and
/// either no children (a leaf) or exactly four children covering the four
/// quadrants of its region. A node lives at the deepest level whose region
/// contains it; nodes that straddle the quadrants of a split level stay at that
/// level as boundary crossers.
///
/// Leaves split when an insert arrives while they are full. A split level
/// collapses back into a leaf when a removal one level below leaves it and its
/// four leaf children holding no more than `max_capacity` nodes in total.
/// Collapse never cascades further up in the same call; see [`QuadTree::compact`].
pub struct QuadTree {
    region: Aabb,
    children: Option<Box<[QuadTree; 4]>>,
    nodes: Vec<Node>,
    id: u32,
    depth: u32,
    config: QuadTreeConfig,
}

/// Where a removal found its node, relative to the level that ran it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Found {
    Here,
    Below,
}

impl QuadTree {
    /// Create an empty leaf covering `region` with the default configuration.
    ///
    /// The region should be finite, non-inverted, and have non-zero area;
    /// use [`QuadTree::try_new`] to validate untrusted input.
    pub fn new(region: Aabb) -> Self {
        Self::with_config(region, QuadTreeConfig::default())
    }

    /// Create an empty leaf covering `region` with a custom configuration.
    pub fn with_config(region: Aabb, config: QuadTreeConfig) -> Self {
        debug_assert!(
            validate_region(&region).is_ok(),
            "invalid quadtree region: {region}"
        );
        Self::level(region, config, 0, 0)
    }

    /// Validate `region` and create an empty leaf with the default configuration.
    pub fn try_new(region: Aabb) -> Result<Self, RegionError> {
        Self::try_with_config(region, QuadTreeConfig::default())
    }

    /// Validate `region` and create an empty leaf with a custom configuration.
    pub fn try_with_config(region: Aabb, config: QuadTreeConfig) -> Result<Self, RegionError> {
        validate_region(&region)?;
        Ok(Self::level(region, config, 0, 0))
    }

    /// Set the diagnostic id of a freshly constructed root.
    ///
    /// Children derive their ids from their parent's, so hosts running several
    /// trees can keep dumps distinguishable.
    pub fn with_id(mut self, id: u32) -> Self {
        debug_assert!(self.is_leaf(), "diagnostic ids are fixed once split");
        self.id = id;
        self
    }

    fn level(region: Aabb, config: QuadTreeConfig, id: u32, depth: u32) -> Self {
        Self {
            region,
            children: None,
            nodes: Vec::with_capacity(config.capacity() * 2),
            id,
            depth,
            config,
        }
    }

    /// Region covered by this level.
    pub fn region(&self) -> &Aabb {
        &self.region
    }

    /// Nodes stored directly at this level (not including children).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Borrowed view of the four children, all empty for a leaf.
    pub fn quads(&self) -> Quads<'_> {
        match self.children.as_deref() {
            Some([top_left, top_right, bottom_left, bottom_right]) => Quads {
                top_left: Some(top_left),
                top_right: Some(top_right),
                bottom_left: Some(bottom_left),
                bottom_right: Some(bottom_right),
            },
            None => Quads::default(),
        }
    }

    /// The child covering `quadrant`, if this level is split.
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children
            .as_deref()
            .map(|children| &children[quadrant.index()])
    }

    /// True if this level has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Diagnostic id of this level.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Distance from the root (the root has depth 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Configuration shared by every level of this tree.
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Whether `aabb` fits entirely inside this level's region.
    pub fn contains_rect(&self, aabb: &Aabb) -> bool {
        self.region.contains(aabb)
    }

    /// Whether the point lies inside this level's region.
    pub fn contains_point(&self, p: Point) -> bool {
        self.region.contains_point(p)
    }

    /// Number of nodes stored directly at this level.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes stored at this level and all levels below it.
    pub fn node_count_recursive(&self) -> usize {
        self.nodes.len()
            + self
                .children
                .iter()
                .flat_map(|children| children.iter())
                .map(Self::node_count_recursive)
                .sum::<usize>()
    }

    /// Insert a node. Returns `false`, leaving the tree untouched, if the
    /// node's box does not fit inside this level's region.
    pub fn insert(&mut self, node: Node) -> bool {
        if !self.contains_rect(&node.aabb) {
            trace!(level = self.id, node = node.id, "node outside region");
            return false;
        }
        self.insert_contained(node);
        true
    }

    fn insert_contained(&mut self, node: Node) {
        if let Some(children) = self.children.as_deref_mut() {
            match child_containing(children, &node.aabb) {
                Some(i) => children[i].insert_contained(node),
                None => {
                    trace!(level = self.id, node = node.id, "boundary crosser");
                    self.nodes.push(node);
                }
            }
            return;
        }

        if self.nodes.len() < self.config.capacity() {
            self.nodes.push(node);
            return;
        }

        let mut children = self.split();
        let capacity = self.config.capacity() * 2;
        let pending = core::mem::replace(&mut self.nodes, Vec::with_capacity(capacity));
        // Redistributed nodes go straight into the child lists so one overflow
        // causes one split; an overfull child splits on its next insert.
        for node in pending.into_iter().chain(core::iter::once(node)) {
            match child_containing(&children, &node.aabb) {
                Some(i) => children[i].nodes.push(node),
                None => self.nodes.push(node),
            }
        }
        self.children = Some(children);
    }

    /// Build the four (empty) children of this level.
    fn split(&self) -> Box<[Self; 4]> {
        debug!(
            level = self.id,
            depth = self.depth,
            region = %self.region,
            "splitting"
        );
        Box::new(Quadrant::ALL.map(|quadrant| {
            Self::level(
                self.region.quadrant(quadrant),
                self.config,
                child_id(self.id, quadrant),
                self.depth + 1,
            )
        }))
    }

    /// Remove the node with `id`, searching along the path that `search` (the
    /// box the node is believed to occupy) selects.
    ///
    /// Returns `false` if the node is not reachable along that path. A stale
    /// `search` box can therefore miss a node that is still stored; see
    /// [`NodeRegistry`](crate::NodeRegistry) for a layer that tracks positions.
    pub fn remove_node(&mut self, id: u32, search: &Aabb) -> bool {
        self.remove_guided(id, search).is_some()
    }

    fn remove_guided(&mut self, id: u32, search: &Aabb) -> Option<Found> {
        if self.remove_local(id).is_some() {
            return Some(Found::Here);
        }
        let children = self.children.as_deref_mut()?;
        let i = child_containing(children, search)?;
        if children[i].remove_guided(id, search)? == Found::Here {
            self.try_collapse();
        }
        Some(Found::Below)
    }

    fn remove_local(&mut self, id: u32) -> Option<Node> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.swap_remove(pos))
    }

    /// Remove the node with `id` wherever it is stored and return it.
    ///
    /// This visits every level until the node is found.
    pub fn take_node(&mut self, id: u32) -> Option<Node> {
        self.take_anywhere(id).map(|(node, _)| node)
    }

    fn take_anywhere(&mut self, id: u32) -> Option<(Node, Found)> {
        if let Some(node) = self.remove_local(id) {
            return Some((node, Found::Here));
        }
        let children = self.children.as_deref_mut()?;
        let (node, found) = children.iter_mut().find_map(|c| c.take_anywhere(id))?;
        if found == Found::Here {
            self.try_collapse();
        }
        Some((node, Found::Below))
    }

    /// Move the node with `id` to `aabb`.
    ///
    /// Behaves as a removal followed by an insert of the same id: returns
    /// `false` without touching the tree if the id is not stored, and returns
    /// `false` with the node removed if `aabb` does not fit this level's region.
    /// The tree keeps no id index, so the node is located by visiting levels
    /// until found; use [`QuadTree::move_node_from`] when the current box is known.
    pub fn move_node(&mut self, id: u32, aabb: Aabb) -> bool {
        if self.take_node(id).is_none() {
            return false;
        }
        self.insert(Node::new(id, aabb))
    }

    /// Move the node with `id` from its current box `from` to `to`.
    ///
    /// Like [`QuadTree::move_node`] but locates the node along the path `from`
    /// selects, as [`QuadTree::remove_node`] does.
    pub fn move_node_from(&mut self, id: u32, from: &Aabb, to: Aabb) -> bool {
        if !self.remove_node(id, from) {
            return false;
        }
        self.insert(Node::new(id, to))
    }

    /// The child whose region fully contains `aabb`. Non-recursive.
    ///
    /// Returns `None` for a leaf or a box that straddles quadrants. A box lying
    /// exactly on a shared edge resolves to the first child in [`Quadrant::ALL`]
    /// order, matching where [`QuadTree::insert`] would place it.
    pub fn which_quad_contains_rect(&self, aabb: &Aabb) -> Option<&Self> {
        let children = self.children.as_deref()?;
        child_containing(children, aabb).map(|i| &children[i])
    }

    /// The level whose own node list holds `id`, descending along the path
    /// `aabb` selects.
    pub fn find_quad_containing_node_id(&self, id: u32, aabb: &Aabb) -> Option<&Self> {
        let mut level = self;
        loop {
            if level.nodes.iter().any(|n| n.id == id) {
                return Some(level);
            }
            level = level.which_quad_contains_rect(aabb)?;
        }
    }

    /// Look up a node by id, visiting every level until found.
    pub fn find_node(&self, id: u32) -> Option<&Node> {
        if let Some(node) = self.nodes.iter().find(|n| n.id == id) {
            return Some(node);
        }
        self.children
            .as_deref()?
            .iter()
            .find_map(|child| child.find_node(id))
    }

    /// Ids of all nodes other than `id` whose box overlaps `aabb`.
    ///
    /// Every level whose region overlaps `aabb` is visited, since the query box
    /// may border several quadrants. With unique ids the result is a set; it is
    /// ordered by traversal.
    pub fn collisions(&self, id: u32, aabb: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        self.collisions_into(id, aabb, &mut out);
        out
    }

    /// Like [`QuadTree::collisions`], appending into a caller-provided buffer.
    pub fn collisions_into(&self, id: u32, aabb: &Aabb, out: &mut Vec<u32>) {
        self.overlapping_into(Some(id), aabb, out);
    }

    /// Collisions of a stored node against its own box.
    ///
    /// Returns `None` if no node with `id` is stored.
    pub fn collisions_of(&self, id: u32) -> Option<Vec<u32>> {
        let aabb = self.find_node(id)?.aabb;
        Some(self.collisions(id, &aabb))
    }

    /// Ids of all nodes whose box overlaps `aabb`.
    pub fn query(&self, aabb: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        self.overlapping_into(None, aabb, &mut out);
        out
    }

    fn overlapping_into(&self, exclude: Option<u32>, aabb: &Aabb, out: &mut Vec<u32>) {
        out.extend(
            self.nodes
                .iter()
                .filter(|n| Some(n.id) != exclude && n.aabb.overlaps(aabb))
                .map(|n| n.id),
        );
        let Some(children) = self.children.as_deref() else {
            return;
        };
        for child in children {
            if child.region.overlaps(aabb) {
                child.overlapping_into(exclude, aabb, out);
            }
        }
    }

    /// Collapse this level into a leaf if its four children are leaves and
    /// all nodes together fit within `max_capacity`. Returns whether it collapsed.
    ///
    /// Removals run this check on the parent of the level a node was removed
    /// from; it is exposed for hosts that manage structure themselves.
    pub fn try_collapse(&mut self) -> bool {
        let Some(children) = self.children.as_deref() else {
            return false;
        };
        if children.iter().any(|c| !c.is_leaf()) {
            return false;
        }
        let total = self.nodes.len() + children.iter().map(|c| c.nodes.len()).sum::<usize>();
        if total > self.config.capacity() {
            return false;
        }
        let Some(children) = self.children.take() else {
            return false;
        };
        let [top_left, top_right, bottom_left, bottom_right] = *children;
        for child in [top_left, top_right, bottom_left, bottom_right] {
            self.nodes.extend(child.nodes);
        }
        debug!(level = self.id, depth = self.depth, merged = total, "collapsed");
        true
    }

    /// Collapse every eligible level, bottom-up. Returns the number of
    /// collapses.
    ///
    /// Removal only re-checks one level per call; after a batch of removals
    /// this restores the shape a fresh build would have.
    pub fn compact(&mut self) -> usize {
        let mut collapsed = 0;
        if let Some(children) = self.children.as_deref_mut() {
            for child in children.iter_mut() {
                collapsed += child.compact();
            }
        }
        if self.try_collapse() {
            collapsed += 1;
        }
        collapsed
    }

    /// Remove every node and child, leaving an empty leaf over the same region.
    pub fn clear(&mut self) {
        self.children = None;
        self.nodes.clear();
    }

    /// Walk the tree pre-order (a level, its nodes, then its children in
    /// [`Quadrant::ALL`] order), reporting to `visitor`.
    pub fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        let mut stack: Vec<&Self> = Vec::new();
        stack.push(self);
        while let Some(level) = stack.pop() {
            visitor.level(level);
            let crosser = !level.is_leaf();
            for node in &level.nodes {
                visitor.node(level, node, crosser);
            }
            if let Some(children) = level.children.as_deref() {
                stack.extend(children.iter().rev());
            }
        }
    }
}

fn child_containing(children: &[QuadTree; 4], aabb: &Aabb) -> Option<usize> {
    children.iter().position(|c| c.region.contains(aabb))
}

fn child_id(parent: u32, quadrant: Quadrant) -> u32 {
    let ordinal = match quadrant {
        Quadrant::TopLeft => 1,
        Quadrant::TopRight => 2,
        Quadrant::BottomLeft => 3,
        Quadrant::BottomRight => 4,
    };
    parent.wrapping_mul(4).wrapping_add(ordinal)
}

fn validate_region(region: &Aabb) -> Result<(), RegionError> {
    if !region.is_finite() {
        return Err(RegionError::NonFinite);
    }
    if region.is_inverted() {
        return Err(RegionError::Inverted);
    }
    if region.is_empty() {
        return Err(RegionError::Degenerate);
    }
    Ok(())
}

impl fmt::Display for QuadTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quad #{} {}", self.id, self.region)
    }
}

impl fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("id", &self.id)
            .field("depth", &self.depth)
            .field("region", &self.region)
            .field("leaf", &self.is_leaf())
            .field("nodes", &self.nodes.len())
            .field("total", &self.node_count_recursive())
            .finish_non_exhaustive()
    }
}
