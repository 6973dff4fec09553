// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect, Size};
use understory_multigraph::Multigraph;
use understory_reframe::{Navigator, ReanchorFns};

/// A Sierpinski-style scene: one tile containing three half-size copies of itself.
fn self_similar() -> Navigator<()> {
    let mut graph = Multigraph::new();
    graph.insert_node("tile", ());
    for offset in [(0.0, 0.0), (50.0, 0.0), (25.0, 50.0)] {
        let edge = Affine::translate(offset) * Affine::scale(0.5);
        let _ = graph.add_edge_between("tile", "tile", edge, None);
    }
    Navigator::new(graph)
}

fn bench_reframe(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_reframe");
    group.sample_size(50);

    for &budget in &[64_usize, 1_024, 16_384] {
        group.bench_function(format!("visible_nodes(max={budget})"), |b| {
            let mut nav = self_similar();
            nav.set_max_visible_nodes(budget);
            b.iter(|| {
                let sum: f64 = nav
                    .visible_nodes()
                    .map(|visible| visible.transform.as_coeffs()[4])
                    .sum();
                black_box(sum);
            });
        });

        group.bench_function(format!("visible_nodes_culled(max={budget})"), |b| {
            let mut nav = self_similar();
            nav.set_max_visible_nodes(budget);
            let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
            b.iter(|| {
                let count = nav
                    .visible_nodes_culled(|_, transform, origin_transform| {
                        let bounds = (origin_transform * transform)
                            .transform_rect_bbox(Rect::new(0.0, 0.0, 100.0, 100.0));
                        // Too small to see, or off screen.
                        bounds.width() < 1.0 || bounds.intersect(viewport).is_zero_area()
                    })
                    .count();
                black_box(count);
            });
        });
    }

    group.bench_function("zoom_in_1000_steps_with_reanchor", |b| {
        let canvas = Size::new(100.0, 100.0);
        b.iter(|| {
            let mut nav = self_similar();
            let mut policy = ReanchorFns::zoom_in(|combined: Affine, _, _| {
                combined.determinant() >= 1.0
            });
            for _ in 0..1_000 {
                nav.zoom_at_point_with(Point::new(10.0, 10.0), 1.05, canvas, &mut policy);
            }
            black_box(nav.origin_transform());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_reframe);
criterion_main!(benches);
