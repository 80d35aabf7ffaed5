// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radius queries with optional marking.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::RangeOverflow;
use crate::node::{Visit, dist_sq};
use crate::tree::KdTree;
use crate::types::Scalar;

impl<T: Scalar> KdTree<'_, T> {
    /// Collect the offsets of all points strictly closer than `sqrt(radius_sq)` to
    /// `query` into `out`, returning how many were written.
    ///
    /// `out.len()` is the capacity. If more points are in range, the traversal stops
    /// at the first one that does not fit and returns [`RangeOverflow`] with `out`
    /// completely filled.
    ///
    /// # Panics
    ///
    /// If `query` has fewer than `dim` coordinates.
    pub fn range(
        &self,
        query: &[T],
        radius_sq: f64,
        out: &mut [usize],
    ) -> Result<usize, RangeOverflow> {
        let found = self.sweep(query, radius_sq, false, out);
        let written = found.unwrap_or(out.len());
        for slot in &mut out[..written] {
            *slot = self.nodes[*slot].point;
        }
        found
    }

    /// Like [`range`](Self::range), but skips marked points and marks every point it
    /// reports.
    ///
    /// Sweeping a query region across the data with this method reports each point
    /// at most once in total until [`clear_marks`](Self::clear_marks). On overflow the
    /// points already written stay marked.
    ///
    /// # Panics
    ///
    /// If `query` has fewer than `dim` coordinates.
    pub fn range_unmarked(
        &mut self,
        query: &[T],
        radius_sq: f64,
        out: &mut [usize],
    ) -> Result<usize, RangeOverflow> {
        let found = self.sweep(query, radius_sq, true, out);
        let written = found.unwrap_or(out.len());
        for slot in &mut out[..written] {
            let node = &mut self.nodes[*slot];
            node.mark = true;
            *slot = node.point;
        }
        found
    }

    /// Collect every point in range without a capacity bound.
    pub fn range_to_vec(&self, query: &[T], radius_sq: f64) -> Vec<usize> {
        // Room for every point, so this cannot overflow.
        let mut out = vec![0; self.len()];
        let written = self.range(query, radius_sq, &mut out).unwrap_or(out.len());
        out.truncate(written);
        out
    }

    /// Write the arena positions of matching nodes into `out`.
    fn sweep(
        &self,
        query: &[T],
        radius_sq: f64,
        skip_marked: bool,
        out: &mut [usize],
    ) -> Result<usize, RangeOverflow> {
        let query = self.query_slice(query);
        let Some(root) = self.root else {
            return Ok(0);
        };
        let dim = self.dim();
        let mut count = 0;
        let mut stack = vec![Visit {
            node: root,
            axis: 0,
            bound: 0.0,
        }];
        while let Some(Visit { node, axis, bound }) = stack.pop() {
            if bound >= radius_sq {
                continue;
            }
            let n = &self.nodes[node.get()];
            let at = self.node_point(n);
            if !(skip_marked && n.mark) && dist_sq(query, at) < radius_sq {
                let Some(slot) = out.get_mut(count) else {
                    log::trace!(
                        "range query overflowed: capacity {}, radius_sq {}",
                        out.len(),
                        radius_sq
                    );
                    return Err(RangeOverflow {
                        capacity: out.len(),
                    });
                };
                *slot = node.get();
                count += 1;
            }
            let delta = T::to_f64(query[axis]) - T::to_f64(at[axis]);
            let (near, far) = if delta <= 0.0 {
                (n.left, n.right)
            } else {
                (n.right, n.left)
            };
            let axis = (axis + 1) % dim;
            if let Some(far) = far {
                stack.push(Visit {
                    node: far,
                    axis,
                    bound: delta * delta,
                });
            }
            if let Some(near) = near {
                stack.push(Visit {
                    node: near,
                    axis,
                    bound: 0.0,
                });
            }
        }
        Ok(count)
    }
}
