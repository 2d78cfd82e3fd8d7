// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Node, QuadTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_nodes(n: usize, cell: f64) -> Vec<Node> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let id = out.len() as u32;
            out.push(Node::new(id, Aabb::from_xywh(x0, y0, cell * 0.8, cell * 0.8)));
        }
    }
    out
}

fn to_rstar_rects(v: &[Node]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|n| {
            Rectangle::from_corners(
                [n.aabb.min.x, n.aabb.min.y],
                [n.aabb.max.x, n.aabb.max.y],
            )
        })
        .collect()
}

fn bench_quadtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_external_compare");
    for &n in &[64usize, 128] {
        let cell = 10.0;
        let nodes = gen_grid_nodes(n, cell);
        let world = Aabb::from_xywh(0.0, 0.0, n as f64 * cell, n as f64 * cell);
        let query = Aabb::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::new(world),
                |mut tree| {
                    for node in &nodes {
                        let _ = tree.insert(*node);
                    }
                    black_box(tree.query(&query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&nodes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.min.x, query.min.y],
                        [query.max.x, query.max.y],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quadtree_external_compare);
criterion_main!(benches);
