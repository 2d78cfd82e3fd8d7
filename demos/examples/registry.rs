// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node registry.
//!
//! Track positions alongside the tree so moves and removals never use a stale
//! box, and handle the error cases.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example registry`

use tracing::{info, warn};
use understory_quadtree::{Aabb, IdAllocator, NodeRegistry, QuadTreeError};
use understory_quadtree_demos::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut reg = NodeRegistry::new(Aabb::from_xywh(0.0, 0.0, 800.0, 600.0))?;
    let mut ids = IdAllocator::starting_at(1);

    let player = ids.next_id().unwrap_or_default();
    let wall = ids.next_id().unwrap_or_default();
    reg.insert(player, Aabb::from_xywh(10.0, 10.0, 20.0, 20.0))?;
    reg.insert(wall, Aabb::from_xywh(100.0, 0.0, 10.0, 600.0))?;

    for step in 0..10 {
        let x = 10.0 + 10.0 * f64::from(step);
        reg.move_node(player, Aabb::from_xywh(x, 10.0, 20.0, 20.0))?;
        let hits = reg.collisions(player)?;
        if !hits.is_empty() {
            info!("step {step}: player at x={x} touches {hits:?}");
            break;
        }
    }

    match reg.insert(wall, Aabb::from_xywh(0.0, 0.0, 1.0, 1.0)) {
        Err(QuadTreeError::DuplicateId(id)) => warn!("id {id} already in use"),
        other => anyhow::bail!("expected a duplicate id error, got {other:?}"),
    }
    match reg.move_node(player, Aabb::from_xywh(900.0, 0.0, 20.0, 20.0)) {
        Err(err @ QuadTreeError::OutOfBounds(_)) => warn!("{err}; player unregistered"),
        other => anyhow::bail!("expected an out-of-bounds error, got {other:?}"),
    }

    info!("{} nodes remain: {:?}", reg.len(), reg.iter().collect::<Vec<_>>());
    Ok(())
}
