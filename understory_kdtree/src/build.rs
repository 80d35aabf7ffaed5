// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk construction: in-place median selection and tree assembly.
//!
//! The arena starts out as the points in storage order. Each subtree owns a
//! contiguous arena range; selecting its median fixes one node in place and splits
//! the rest of the range into the two child ranges, so the final arena order is the
//! partitioned permutation and no node ever moves after it gains children.

use alloc::vec;

use crate::node::{Node, NodeIdx};
use crate::types::Scalar;

#[inline]
fn coord<T: Scalar>(points: &[T], node: &Node, axis: usize) -> T {
    points[node.point + axis]
}

/// Place the median of `nodes[lo..hi]` along `axis` and return its position.
///
/// Everything left of the returned position is `<=` its value on `axis`, everything
/// right of it is `>=`. When duplicates straddle the middle the first slot holding
/// the median value is accepted, which keeps the ordering invariant at the cost of
/// an off-center split.
pub(crate) fn select_median<T: Scalar>(
    points: &[T],
    nodes: &mut [Node],
    lo: usize,
    hi: usize,
    axis: usize,
) -> Option<usize> {
    if hi <= lo {
        return None;
    }
    if hi == lo + 1 {
        return Some(lo);
    }
    let md = lo + (hi - lo) / 2;
    let (mut i0, mut ie) = (lo, hi);
    loop {
        let pivot = coord(points, &nodes[md], axis);
        nodes.swap(md, ie - 1);
        let mut store = i0;
        for p in i0..ie - 1 {
            if coord(points, &nodes[p], axis) < pivot {
                nodes.swap(p, store);
                store += 1;
            }
        }
        nodes.swap(store, ie - 1);

        if store == md {
            return Some(md);
        }
        // Duplicates of the pivot reach the middle.
        if coord(points, &nodes[store], axis) == coord(points, &nodes[md], axis) {
            return Some(store);
        }
        // `md` always stays inside the shrinking window.
        if store > md {
            ie = store;
        } else {
            i0 = store + 1;
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Attach {
    Root,
    Left(NodeIdx),
    Right(NodeIdx),
}

#[derive(Copy, Clone, Debug)]
struct Task {
    lo: usize,
    hi: usize,
    axis: usize,
    attach: Attach,
}

/// Link `nodes` into a k-d tree and return the root.
///
/// Split axes rotate through `0..dim` by depth. Uses an explicit work stack, so
/// degenerate (duplicate-heavy) inputs cannot exhaust the native stack.
pub(crate) fn assemble<T: Scalar>(
    points: &[T],
    dim: usize,
    nodes: &mut [Node],
) -> Option<NodeIdx> {
    let mut root = None;
    let mut stack = vec![Task {
        lo: 0,
        hi: nodes.len(),
        axis: 0,
        attach: Attach::Root,
    }];
    while let Some(Task { lo, hi, axis, attach }) = stack.pop() {
        let Some(m) = select_median(points, nodes, lo, hi, axis) else {
            continue;
        };
        let m = NodeIdx::new(m);
        match attach {
            Attach::Root => root = Some(m),
            Attach::Left(parent) => nodes[parent.get()].left = Some(m),
            Attach::Right(parent) => nodes[parent.get()].right = Some(m),
        }
        let next = (axis + 1) % dim;
        if m.get() + 1 < hi {
            stack.push(Task {
                lo: m.get() + 1,
                hi,
                axis: next,
                attach: Attach::Right(m),
            });
        }
        if lo < m.get() {
            stack.push(Task {
                lo,
                hi: m.get(),
                axis: next,
                attach: Attach::Left(m),
            });
        }
    }
    root
}
