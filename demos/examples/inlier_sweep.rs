// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line fitting by inlier sweeps.
//!
//! Candidate lines are drawn through random pairs of samples. For each candidate a
//! disc of radius `TOLERANCE` slides along the line; `range_unmarked` reports every
//! sample inside the swept band exactly once, so the running total is the number of
//! distinct inliers. Marks are cleared before the next candidate.
//!
//! Run:
//! - `cargo run -p understory_demos --example inlier_sweep`

use kurbo::{Line, ParamCurve, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use understory_kdtree::KdTree;

const TOLERANCE: f64 = 1.5;

fn samples(rng: &mut StdRng) -> Vec<f64> {
    let truth = Line::new((0.0, 10.0), (200.0, 110.0));
    let mut out = Vec::new();
    for _ in 0..600 {
        let p = truth.eval(rng.r#gen());
        out.push(p.x + rng.gen_range(-1.0..1.0));
        out.push(p.y + rng.gen_range(-1.0..1.0));
    }
    for _ in 0..400 {
        out.push(rng.gen_range(0.0..200.0));
        out.push(rng.gen_range(0.0..200.0));
    }
    out
}

/// Count distinct samples within `TOLERANCE` of `line`.
fn count_inliers(tree: &mut KdTree<'_, f64>, line: Line, out: &mut [usize]) -> usize {
    // Steps of half the tolerance leave no gaps between consecutive discs.
    let steps = (line.p0.distance(line.p1) / (TOLERANCE * 0.5)).ceil().max(1.0) as usize;
    let mut total = 0;
    for i in 0..=steps {
        let c = line.eval(i as f64 / steps as f64);
        total += match tree.range_unmarked(&[c.x, c.y], TOLERANCE * TOLERANCE, out) {
            Ok(n) => n,
            Err(overflow) => {
                // What fit stays marked; the rest shows up on the next step.
                eprintln!("sweep step {i}: {overflow}");
                overflow.capacity
            }
        };
    }
    tree.clear_marks();
    total
}

fn main() {
    let mut rng = StdRng::seed_from_u64(0x5EED_1E55);
    let data = samples(&mut rng);
    let mut tree = KdTree::from_points(&data, 2);
    let mut out = vec![0; 64];
    println!("indexed {} samples, tree height {}", tree.len(), tree.height());

    let n = tree.len();
    let mut best: Option<(usize, Line)> = None;
    for _ in 0..50 {
        let (a, b) = (rng.gen_range(0..n) * 2, rng.gen_range(0..n) * 2);
        let (p0, p1) = (
            Point::new(data[a], data[a + 1]),
            Point::new(data[b], data[b + 1]),
        );
        if p0.distance(p1) < 10.0 {
            continue;
        }
        let count = count_inliers(&mut tree, Line::new(p0, p1), &mut out);
        if best.is_none_or(|(c, _)| count > c) {
            best = Some((count, Line::new(p0, p1)));
        }
    }

    match best {
        Some((count, line)) => println!(
            "best candidate {:?} -> {:?} with {count} inliers",
            line.p0, line.p1
        ),
        None => println!("no usable candidate pair"),
    }

    // The same sweep, point by point: the five samples nearest the origin.
    for _ in 0..5 {
        let hit = tree.nearest_unmarked(&[0.0, 0.0]);
        if let Some(at) = hit.point {
            println!("  {:?} at d^2 = {:.2}", tree.point(at), hit.dist_sq);
        }
    }
    tree.clear_marks();
}
