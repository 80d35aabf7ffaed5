// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact nearest-neighbor search.

use alloc::vec;

use crate::node::{NodeIdx, Visit, dist_sq};
use crate::tree::KdTree;
use crate::types::Scalar;

/// Result of a nearest-neighbor query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest {
    /// Scalar offset of the closest point in the tree's storage, or `None` if no
    /// point was eligible.
    pub point: Option<usize>,
    /// Squared Euclidean distance to that point; `+inf` when `point` is `None`.
    pub dist_sq: f64,
}

impl Nearest {
    /// The result for a tree with no eligible points.
    pub const NONE: Self = Self {
        point: None,
        dist_sq: f64::INFINITY,
    };
}

impl Default for Nearest {
    fn default() -> Self {
        Self::NONE
    }
}

impl<T: Scalar> KdTree<'_, T> {
    /// Find the point closest to `query`.
    ///
    /// Among points at the same distance the first one reached in traversal order
    /// wins. Only the first [`dim`](Self::dim) coordinates of `query` are read.
    ///
    /// # Panics
    ///
    /// If `query` has fewer than `dim` coordinates.
    pub fn nearest(&self, query: &[T]) -> Nearest {
        let (best, dist_sq) = self.search_nearest(query, false);
        Nearest {
            point: best.map(|i| self.nodes[i.get()].point),
            dist_sq,
        }
    }

    /// Find the closest point that is not yet marked, and mark it.
    ///
    /// Repeated calls with the same query walk outward through the point set in
    /// order of distance, returning each point once until
    /// [`clear_marks`](Self::clear_marks). Returns [`Nearest::NONE`] once every
    /// point is marked.
    ///
    /// # Panics
    ///
    /// If `query` has fewer than `dim` coordinates.
    pub fn nearest_unmarked(&mut self, query: &[T]) -> Nearest {
        let (best, dist_sq) = self.search_nearest(query, true);
        let Some(best) = best else {
            return Nearest::NONE;
        };
        let node = &mut self.nodes[best.get()];
        node.mark = true;
        Nearest {
            point: Some(node.point),
            dist_sq,
        }
    }

    /// Branch-and-bound descent. The near side of each split is explored before the
    /// far side is considered, and the far side only if its splitting plane is
    /// closer than the best distance found by then.
    fn search_nearest(&self, query: &[T], skip_marked: bool) -> (Option<NodeIdx>, f64) {
        let query = self.query_slice(query);
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        let Some(root) = self.root else {
            return (best, best_dist);
        };
        let dim = self.dim();
        let mut stack = vec![Visit {
            node: root,
            axis: 0,
            bound: 0.0,
        }];
        while let Some(Visit { node, axis, bound }) = stack.pop() {
            if bound >= best_dist {
                continue;
            }
            let n = &self.nodes[node.get()];
            let at = self.node_point(n);
            if !(skip_marked && n.mark) {
                let d = dist_sq(query, at);
                if best.is_none() || d < best_dist {
                    best = Some(node);
                    best_dist = d;
                }
                // Squared distances are non-negative; nothing can beat an exact hit.
                if best_dist == 0.0 {
                    break;
                }
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
        (best, best_dist)
    }
}
