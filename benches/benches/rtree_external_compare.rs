// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_kdtree::KdTree;

use rstar::RTree;

fn gen_points(n: usize, seed: u64) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(0.0..1000.0),
                rng.gen_range(0.0..1000.0),
                rng.gen_range(0.0..1000.0),
            ]
        })
        .collect()
}

fn bench_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    let queries = gen_points(1_000, 2);
    for &n in &[10_000_usize, 100_000] {
        let points = gen_points(n, 1);
        let flat: Vec<f64> = points.iter().flatten().copied().collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("understory_build_n{}", n), |b| {
            b.iter(|| black_box(KdTree::from_points(&flat, 3).len()));
        });
        group.bench_function(format!("rstar_build_n{}", n), |b| {
            b.iter(|| black_box(RTree::bulk_load(points.clone()).size()));
        });

        let tree = KdTree::from_points(&flat, 3);
        let rtree = RTree::bulk_load(points.clone());
        group.bench_function(format!("understory_nearest_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for q in &queries {
                    acc += tree.nearest(q).dist_sq;
                }
                black_box(acc)
            });
        });
        group.bench_function(format!("rstar_nearest_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for q in &queries {
                    acc += rtree.nearest_neighbor(q).map_or(0.0, |p| p[0]);
                }
                black_box(acc)
            });
        });

        let mut out = vec![0; n];
        group.bench_function(format!("understory_range_r25_n{}", n), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += tree.range(q, 625.0, &mut out).unwrap_or(0);
                }
                black_box(total)
            });
        });
        group.bench_function(format!("rstar_range_r25_n{}", n), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += rtree.locate_within_distance(*q, 625.0).count();
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_external_compare_f64);
criterion_main!(benches);
