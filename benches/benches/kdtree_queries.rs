// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_kdtree::{KdTree, Layout};

fn gen_uniform(n: usize, dim: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * dim).map(|_| rng.gen_range(0.0..1000.0)).collect()
}

fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster * 2);
    for _ in 0..n_clusters {
        let (cx, cy) = (rng.gen_range(0.0..2000.0), rng.gen_range(0.0..2000.0));
        for _ in 0..per_cluster {
            out.push(cx + (rng.r#gen::<f64>() - 0.5) * spread);
            out.push(cy + (rng.r#gen::<f64>() - 0.5) * spread);
        }
    }
    out
}

fn gen_pixels(n: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0xFACE_FEED_CAFE_BABE);
    (0..n * 4).map(|_| rng.r#gen()).collect()
}

fn brute_nearest(points: &[f64], dim: usize, q: &[f64]) -> f64 {
    points
        .chunks_exact(dim)
        .map(|p| p.iter().zip(q).map(|(a, b)| (a - b) * (a - b)).sum::<f64>())
        .fold(f64::INFINITY, f64::min)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000_usize, 10_000, 100_000] {
        let points = gen_uniform(n, 3, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_3d_n{}", n), |b| {
            b.iter(|| black_box(KdTree::from_points(&points, 3).len()));
        });
    }
    // Few distinct values per axis; exercises the duplicate short-circuit.
    let coarse: Vec<u8> = gen_pixels(50_000).iter().map(|v| v / 64).collect();
    group.throughput(Throughput::Elements(50_000));
    group.bench_function("coarse_u8_rgba_as_rgb", |b| {
        b.iter(|| {
            let tree = KdTree::build(&coarse, Layout::new(3).with_stride(4));
            black_box(tree.height())
        });
    });
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let queries = gen_uniform(1_000, 3, 2);
    for &n in &[1_000_usize, 100_000] {
        let points = gen_uniform(n, 3, 1);
        let tree = KdTree::from_points(&points, 3);
        group.throughput(Throughput::Elements(1_000));
        group.bench_function(format!("tree_n{}", n), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for q in queries.chunks_exact(3) {
                    acc += tree.nearest(q).dist_sq;
                }
                black_box(acc)
            });
        });
        if n <= 1_000 {
            group.bench_function(format!("brute_force_n{}", n), |b| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for q in queries.chunks_exact(3) {
                        acc += brute_nearest(&points, 3, q);
                    }
                    black_box(acc)
                });
            });
        }
    }

    // Palette lookup: many pixels against a handful of u8 centroids.
    let palette: Vec<u8> = gen_pixels(16).into_iter().take(48).collect();
    let pixels = gen_pixels(65_536);
    let tree = KdTree::from_points(&palette, 3);
    group.throughput(Throughput::Elements(65_536));
    group.bench_function("palette_16_u8", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for px in pixels.chunks_exact(4) {
                hits += tree.nearest(&px[..3]).point.unwrap_or(0);
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let points = gen_clustered(64, 1_000, 80.0);
    let tree = KdTree::from_points(&points, 2);
    let queries = gen_uniform(256, 2, 3);
    let mut out = vec![0; 4_096];

    group.throughput(Throughput::Elements(256));
    group.bench_function("clustered_r20", |b| {
        b.iter(|| {
            let mut total = 0;
            for q in queries.chunks_exact(2) {
                total += tree.range(q, 400.0, &mut out).unwrap_or(out.len());
            }
            black_box(total)
        });
    });

    group.bench_function("clustered_sweep_marked_r20", |b| {
        b.iter_batched(
            || KdTree::from_points(&points, 2),
            |mut tree| {
                let mut total = 0;
                for q in queries.chunks_exact(2) {
                    total += tree.range_unmarked(q, 400.0, &mut out).unwrap_or(out.len());
                }
                black_box(total)
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("clear_marks", |b| {
        let mut tree = KdTree::from_points(&points, 2);
        b.iter(|| {
            tree.clear_marks();
            black_box(tree.marked_len())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_range);
criterion_main!(benches);
