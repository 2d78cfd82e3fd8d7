// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory QuadTree: a dynamic region quadtree over axis-aligned boxes.
//!
//! Understory QuadTree stores [`Aabb`]s tagged with caller-assigned `u32` ids and
//! adapts its subdivision as boxes come and go.
//!
//! - Insert, remove, and move boxes; out-of-bounds inserts and missing ids are
//!   reported as `false`/`None`, never as panics.
//! - Leaves split into four quadrants when an insert arrives while they are full.
//! - Boxes that straddle quadrants ("boundary crossers") stay at the split level.
//! - A split level collapses back into a leaf once a removal below leaves it
//!   and its leaf children holding no more than the leaf capacity.
//! - Query overlapping ids, find the level holding an id, and walk the structure
//!   through [`Quads`] or a [`Visitor`] to draw it.
//!
//! Geometry uses [`kurbo::Point`] corners; [`Aabb::to_rect`] converts for drawing.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb, Node, QuadTree, QuadTreeConfig, Quadrant};
//!
//! let region = Aabb::from_xywh(0.0, 0.0, 100.0, 100.0);
//! let mut tree = QuadTree::with_config(region, QuadTreeConfig::default().with_max_capacity(4));
//!
//! // Five small boxes in the top-left quadrant: the fifth insert splits the root.
//! for i in 0..5_u32 {
//!     let offset = 10.0 * f64::from(i);
//!     assert!(tree.insert(Node::new(i, Aabb::from_xywh(offset, offset, 1.0, 1.0))));
//! }
//! assert!(!tree.is_leaf());
//! assert_eq!(tree.child(Quadrant::TopLeft).unwrap().node_count(), 5);
//!
//! // Removing one brings the total back within capacity, so the root collapses.
//! assert!(tree.remove_node(4, &Aabb::from_xywh(40.0, 40.0, 1.0, 1.0)));
//! assert!(tree.is_leaf());
//! assert_eq!(tree.node_count(), 4);
//! ```
//!
//! ## Locating nodes
//!
//! The tree keeps no id index. [`QuadTree::remove_node`] and
//! [`QuadTree::find_quad_containing_node_id`] follow the path selected by the box
//! the caller says the node occupies; a stale box can miss a node that is still
//! stored. [`QuadTree::move_node`] and [`QuadTree::collisions_of`] visit levels
//! until they find the id.
//!
//! [`NodeRegistry`] pairs a tree with an id-to-box table so lookups always use the
//! current box and failures come back as [`QuadTreeError`]s:
//!
//! ```rust
//! use understory_quadtree::{Aabb, IdAllocator, NodeRegistry, QuadTreeError};
//!
//! let mut ids = IdAllocator::new();
//! let mut reg = NodeRegistry::new(Aabb::from_xywh(0.0, 0.0, 800.0, 600.0)).unwrap();
//!
//! let a = ids.next_id().unwrap();
//! let b = ids.next_id().unwrap();
//! reg.insert(a, Aabb::from_xywh(10.0, 10.0, 20.0, 20.0)).unwrap();
//! reg.insert(b, Aabb::from_xywh(300.0, 300.0, 20.0, 20.0)).unwrap();
//!
//! reg.move_node(b, Aabb::from_xywh(25.0, 25.0, 20.0, 20.0)).unwrap();
//! assert_eq!(reg.collisions(a).unwrap(), vec![b]);
//! assert_eq!(reg.remove(99), Err(QuadTreeError::NotFound(99)));
//! ```
//!
//! ## Logging
//!
//! Splits and collapses emit `tracing` events at `debug` level, and boundary
//! crossers and rejected inserts at `trace` level. Nothing is printed unless the
//! host installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`. Enable either the `std` (default)
//! or `libm` feature for Kurbo.
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. Boxes containing NaN never fit a region and
//! are rejected by [`QuadTree::insert`].

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod id;
pub mod quads;
pub mod registry;
pub mod tree;
pub mod types;
pub mod visit;

pub use config::{DEFAULT_MAX_CAPACITY, QuadTreeConfig};
pub use error::{QuadTreeError, RegionError};
pub use id::IdAllocator;
pub use quads::Quads;
pub use registry::NodeRegistry;
pub use tree::QuadTree;
pub use types::{Aabb, Node, Quadrant};
pub use visit::{Stats, Visitor};
