// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! QuadTree basics.
//!
//! Fill one quadrant until the root splits, add a boundary crosser, remove a
//! node so the root collapses again, and dump the tree at each step.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example basic_quadtree`

use understory_quadtree::{Aabb, Node, QuadTree, QuadTreeConfig, Quadrant};
use understory_quadtree_demos::AsciiCanvas;

fn main() {
    let region = Aabb::from_xywh(0.0, 0.0, 100.0, 100.0);
    let mut tree = QuadTree::with_config(region, QuadTreeConfig::default().with_max_capacity(4));

    for i in 0..5_u32 {
        let offset = 10.0 * f64::from(i);
        let inserted = tree.insert(Node::new(i, Aabb::from_xywh(offset, offset, 1.0, 1.0)));
        println!("insert {i}: {inserted}, leaf={}", tree.is_leaf());
    }
    let top_left = tree.child(Quadrant::TopLeft).unwrap();
    println!("{top_left} holds {} nodes", top_left.node_count());
    assert_eq!(top_left.node_count(), 5);

    // A box across the center cannot be pushed into any quadrant.
    let crosser = Node::new(10, Aabb::from_xywh(45.0, 45.0, 10.0, 10.0));
    assert!(tree.insert(crosser));
    let level = tree
        .find_quad_containing_node_id(crosser.id, &crosser.aabb)
        .unwrap();
    println!("crosser {} lives at {level}", crosser.id);
    print!("{}", AsciiCanvas::new(region.to_rect(), 41, 21).render(&tree));

    assert!(tree.remove_node(crosser.id, &crosser.aabb));
    assert!(tree.remove_node(4, &Aabb::from_xywh(40.0, 40.0, 1.0, 1.0)));
    println!("after removals: leaf={}, nodes={}", tree.is_leaf(), tree.node_count());
    assert!(tree.is_leaf(), "root should collapse back into a leaf");
}
