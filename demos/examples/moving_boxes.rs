// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host loop.
//!
//! Spawns boxes at random positions, drifts them every tick with `move_node`,
//! counts overlapping pairs, and periodically renders the tree as text.
//! Settings come from `quadtree-demo.toml` when present.
//!
//! Run:
//! - `cargo run -p understory_quadtree_demos --example moving_boxes`
//! - `RUST_LOG=understory_quadtree=debug cargo run -p understory_quadtree_demos --example moving_boxes`

use kurbo::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use understory_quadtree::{Aabb, IdAllocator, Node, QuadTree, Stats};
use understory_quadtree_demos::{AsciiCanvas, DemoConfig, init_tracing};

struct Object {
    node: Node,
    velocity: Vec2,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = DemoConfig::load()?;
    info!(
        "world {}x{}, {} objects, capacity {}",
        config.width, config.height, config.objects, config.tree.max_capacity
    );

    let world = Aabb::from_xywh(0.0, 0.0, config.width, config.height);
    let mut tree = QuadTree::try_with_config(world, config.tree)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut ids = IdAllocator::new();
    let size = config.object_size;

    let mut objects = Vec::with_capacity(config.objects as usize);
    for _ in 0..config.objects {
        let id = ids
            .next_id()
            .ok_or_else(|| anyhow::anyhow!("out of ids"))?;
        let x = rng.random_range(0.0..config.width - size);
        let y = rng.random_range(0.0..config.height - size);
        let node = Node::new(id, Aabb::from_xywh(x, y, size, size));
        if !tree.insert(node) {
            anyhow::bail!("object {id} does not fit the world");
        }
        objects.push(Object {
            node,
            velocity: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)),
        });
    }
    info!("built tree: {:?}", Stats::of(&tree));

    for tick in 1..=config.ticks {
        for object in &mut objects {
            let mut min = object.node.aabb.min + object.velocity;
            if min.x < 0.0 || min.x + size > config.width {
                object.velocity.x = -object.velocity.x;
                min.x = min.x.clamp(0.0, config.width - size);
            }
            if min.y < 0.0 || min.y + size > config.height {
                object.velocity.y = -object.velocity.y;
                min.y = min.y.clamp(0.0, config.height - size);
            }
            let moved = Aabb::from_xywh(min.x, min.y, size, size);
            if !tree.move_node_from(object.node.id, &object.node.aabb, moved) {
                anyhow::bail!("lost object {} at tick {tick}", object.node.id);
            }
            object.node.aabb = moved;
        }

        let mut touching = 0;
        let mut hits = Vec::new();
        for object in &objects {
            hits.clear();
            tree.collisions_into(object.node.id, &object.node.aabb, &mut hits);
            touching += hits.len();
        }

        if config.dump_every != 0 && tick % config.dump_every == 0 {
            let stats = Stats::of(&tree);
            info!(
                "tick {tick}: {} overlapping pairs, {} levels, depth {}, {} crossers",
                touching / 2,
                stats.levels,
                stats.max_depth,
                stats.crossers
            );
            print!("{}", AsciiCanvas::new(world.to_rect(), 80, 30).render(&tree));
        }
    }

    let collapsed = tree.compact();
    info!("compacted {collapsed} levels: {:?}", Stats::of(&tree));
    Ok(())
}
