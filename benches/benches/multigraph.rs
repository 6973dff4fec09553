// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_multigraph::{Multigraph, NodeId};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

fn node_ids(n: usize) -> Vec<NodeId> {
    (0..n).map(|i| NodeId::from(format!("n{i}"))).collect()
}

fn build_random_graph(n: usize, edges_per_node: usize, seed: u64) -> Multigraph<usize, u32> {
    let ids = node_ids(n);
    let mut graph = Multigraph::new();
    let mut rng = Lcg::new(seed);
    for (i, id) in ids.iter().enumerate() {
        graph.insert_node(id.clone(), i);
    }
    for from in &ids {
        for _ in 0..edges_per_node {
            let to = &ids[rng.gen_range_usize(n)];
            let _ = graph.add_edge_between(from, to, rng.next_u32(), None);
        }
    }
    graph
}

fn bench_multigraph(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_multigraph");
    group.sample_size(50);

    for &(n, edges_per_node) in &[(256_usize, 2_usize), (4_096, 2), (4_096, 8)] {
        group.bench_function(format!("build(n={n},e={edges_per_node})"), |b| {
            b.iter(|| black_box(build_random_graph(n, edges_per_node, 0x6EA9_0000_0000_0001)));
        });

        group.bench_function(format!("bfs_count(n={n},e={edges_per_node})"), |b| {
            let graph = build_random_graph(n, edges_per_node, 0x6EA9_0000_0000_0002);
            b.iter(|| black_box(graph.bfs("n0").count()));
        });

        group.bench_function(format!("dfs_count(n={n},e={edges_per_node})"), |b| {
            let graph = build_random_graph(n, edges_per_node, 0x6EA9_0000_0000_0003);
            b.iter(|| black_box(graph.dfs("n0").count()));
        });

        group.bench_function(format!("edges_from_all(n={n},e={edges_per_node})"), |b| {
            let graph = build_random_graph(n, edges_per_node, 0x6EA9_0000_0000_0004);
            let ids = node_ids(n);
            b.iter(|| {
                let sum: u64 = ids
                    .iter()
                    .flat_map(|id| graph.edges_from(id))
                    .fold(0_u64, |acc, edge| acc + u64::from(edge.data));
                black_box(sum);
            });
        });

        // Removing every node cascades through every edge.
        group.bench_function(format!("remove_all_nodes(n={n},e={edges_per_node})"), |b| {
            let ids = node_ids(n);
            b.iter_batched(
                || build_random_graph(n, edges_per_node, 0x6EA9_0000_0000_0005),
                |mut graph| {
                    for id in &ids {
                        graph.remove_node(id);
                    }
                    black_box(graph.debug_info());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_multigraph);
criterion_main!(benches);
