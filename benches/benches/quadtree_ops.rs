// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Node, QuadTree, QuadTreeConfig};

const WORLD: f64 = 2000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_nodes(count: usize, size: f64, seed: u64) -> Vec<Node> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| {
            let x0 = rng.next_f64() * (WORLD - size);
            let y0 = rng.next_f64() * (WORLD - size);
            Node::new(i as u32, Aabb::from_xywh(x0, y0, size, size))
        })
        .collect()
}

fn gen_clustered_nodes(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Node> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = spread + rng.next_f64() * (WORLD - 2.0 * spread);
        let cy = spread + rng.next_f64() * (WORLD - 2.0 * spread);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            let id = out.len() as u32;
            out.push(Node::new(id, Aabb::from_xywh(cx + dx, cy + dy, 8.0, 8.0)));
        }
    }
    out
}

fn new_tree(max_capacity: usize) -> QuadTree {
    QuadTree::with_config(
        Aabb::from_xywh(0.0, 0.0, WORLD, WORLD),
        QuadTreeConfig::default().with_max_capacity(max_capacity),
    )
}

fn build(nodes: &[Node], max_capacity: usize) -> QuadTree {
    let mut tree = new_tree(max_capacity);
    for node in nodes {
        let _ = tree.insert(*node);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000] {
        let nodes = gen_random_nodes(n, 6.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        for &cap in &[4usize, 16] {
            group.bench_function(format!("random_n{n}_cap{cap}"), |b| {
                b.iter_batched(
                    || new_tree(cap),
                    |mut tree| {
                        for node in &nodes {
                            let _ = tree.insert(*node);
                        }
                        black_box(tree.node_count_recursive());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    let nodes = gen_clustered_nodes(32, 128, 60.0);
    group.bench_function("clustered_cap8", |b| {
        b.iter_batched(
            || new_tree(8),
            |mut tree| {
                for node in &nodes {
                    let _ = tree.insert(*node);
                }
                black_box(tree.node_count_recursive());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("move");
    let nodes = gen_random_nodes(4_000, 6.0, 0xFACE_FEED_CAFE_BABE);
    let moved: Vec<Aabb> = nodes
        .iter()
        .map(|n| {
            let x = (n.aabb.min.x + 3.0).min(WORLD - 6.0);
            Aabb::from_xywh(x, n.aabb.min.y, 6.0, 6.0)
        })
        .collect();
    group.throughput(Throughput::Elements(nodes.len() as u64));

    group.bench_function("guided_n4000", |b| {
        b.iter_batched(
            || build(&nodes, 8),
            |mut tree| {
                for (node, to) in nodes.iter().zip(&moved) {
                    black_box(tree.move_node_from(node.id, &node.aabb, *to));
                }
            },
            BatchSize::LargeInput,
        )
    });

    // Unguided moves locate each node by scanning, so use fewer of them.
    let few = &nodes[..256];
    group.throughput(Throughput::Elements(few.len() as u64));
    group.bench_function("scan_256_of_4000", |b| {
        b.iter_batched(
            || build(&nodes, 8),
            |mut tree| {
                for (node, to) in few.iter().zip(&moved) {
                    black_box(tree.move_node(node.id, *to));
                }
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_collisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("collisions");
    for &n in &[1_000usize, 10_000] {
        let nodes = gen_random_nodes(n, 12.0, 0xBADC_F00D_1234_5678);
        let tree = build(&nodes, 8);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("all_pairs_n{n}"), |b| {
            let mut hits = Vec::new();
            b.iter(|| {
                let mut total = 0;
                for node in &nodes {
                    hits.clear();
                    tree.collisions_into(node.id, &node.aabb, &mut hits);
                    total += hits.len();
                }
                black_box(total)
            })
        });
        group.bench_function(format!("viewport_n{n}"), |b| {
            let viewport = Aabb::from_xywh(100.0, 100.0, 400.0, 400.0);
            b.iter(|| black_box(tree.query(&viewport).len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_move, bench_collisions);
criterion_main!(benches);
