// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palette reduction: k-means over `u8` RGBA pixels.
//!
//! Each round rebuilds a small tree over the current centroids and assigns every
//! pixel to its nearest one. The pixel buffer itself is indexed once, with a
//! stride of 4 so alpha is skipped, to snap the final centroids to real colors.
//!
//! Run:
//! - `cargo run -p understory_demos --example palette`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_kdtree::{KdTree, Layout};

const BASE_COLORS: [[u8; 3]; 5] = [
    [220, 40, 40],
    [40, 180, 60],
    [30, 60, 200],
    [240, 230, 90],
    [20, 20, 20],
];

fn synthetic_image(n: usize, rng: &mut StdRng) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(n * 4);
    for _ in 0..n {
        let base = BASE_COLORS[rng.gen_range(0..BASE_COLORS.len())];
        for c in base {
            let jitter: i16 = rng.gen_range(-25..=25);
            pixels.push((i16::from(c) + jitter).clamp(0, 255) as u8);
        }
        pixels.push(255);
    }
    pixels
}

fn main() {
    let mut rng = StdRng::seed_from_u64(0x00C0_FFEE);
    let pixels = synthetic_image(20_000, &mut rng);
    let k = BASE_COLORS.len();

    // Seed centroids from random pixels.
    let mut centroids: Vec<f64> = (0..k)
        .flat_map(|_| {
            let at = rng.gen_range(0..pixels.len() / 4) * 4;
            pixels[at..at + 3].iter().map(|&c| f64::from(c))
        })
        .collect();

    for round in 0..10 {
        let tree = KdTree::from_points(&centroids, 3);
        let mut sums = vec![[0.0_f64; 3]; k];
        let mut counts = vec![0_usize; k];
        let mut error = 0.0;
        for px in pixels.chunks_exact(4) {
            let q = [f64::from(px[0]), f64::from(px[1]), f64::from(px[2])];
            let hit = tree.nearest(&q);
            let Some(at) = hit.point else { continue };
            let cluster = at / 3;
            for (sum, v) in sums[cluster].iter_mut().zip(q) {
                *sum += v;
            }
            counts[cluster] += 1;
            error += hit.dist_sq;
        }
        drop(tree);

        for (cluster, (sum, &count)) in sums.iter().zip(&counts).enumerate() {
            if count == 0 {
                continue;
            }
            for (c, s) in centroids[cluster * 3..cluster * 3 + 3].iter_mut().zip(sum) {
                *c = s / count as f64;
            }
        }
        println!(
            "round {round}: mean squared error {:.1}",
            error / (pixels.len() / 4) as f64
        );
    }

    // Snap each centroid to the closest color actually present in the image.
    let image = KdTree::build(&pixels, Layout::new(3).with_stride(4));
    println!("image tree: {} pixels, height {}", image.len(), image.height());
    for centroid in centroids.chunks_exact(3) {
        let q: [u8; 3] = core::array::from_fn(|i| centroid[i].round().clamp(0.0, 255.0) as u8);
        let hit = image.nearest(&q);
        if let Some(at) = hit.point {
            println!(
                "centroid {:?} -> pixel #{} {:?} (d^2 = {})",
                q,
                at / 4,
                image.point(at),
                hit.dist_sq
            );
        }
    }
}
