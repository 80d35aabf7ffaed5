// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `KdTree` type: construction, introspection, and the mark store.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::build::assemble;
use crate::node::{Node, NodeIdx};
use crate::types::{Layout, Scalar};

/// A k-d tree over a borrowed flat coordinate buffer.
///
/// The tree indexes points in place: it stores only scalar offsets into `points`,
/// never copies of the coordinates. The borrow keeps the buffer frozen for as long
/// as the tree lives; to index new data, drop the tree and build another.
///
/// Read-only queries ([`nearest`](Self::nearest), [`range`](Self::range)) take
/// `&self` and can run in parallel. Queries that mark points
/// ([`nearest_unmarked`](Self::nearest_unmarked),
/// [`range_unmarked`](Self::range_unmarked)) and [`clear_marks`](Self::clear_marks)
/// take `&mut self`.
pub struct KdTree<'a, T: Scalar> {
    pub(crate) points: &'a [T],
    pub(crate) layout: Layout,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Option<NodeIdx>,
}

impl<'a, T: Scalar> KdTree<'a, T> {
    /// Build a balanced tree over the points `layout` selects from `points`.
    ///
    /// # Panics
    ///
    /// If `layout.dim()` is zero, or if `points` is too short to hold a single
    /// point under `layout`.
    pub fn build(points: &'a [T], layout: Layout) -> Self {
        let dim = layout.dim();
        assert!(dim > 0, "k-d tree dimension must be at least 1");
        let mut nodes: Vec<Node> = layout.point_offsets(points.len()).map(Node::new).collect();
        assert!(
            !nodes.is_empty(),
            "{} scalars hold no {}-dimensional point at offset {}",
            points.len(),
            dim,
            layout.offset()
        );
        debug_assert!(
            nodes
                .iter()
                .all(|n| points[n.point..n.point + dim].iter().all(|&v| T::is_ordered(v))),
            "k-d tree coordinates must not be NaN"
        );

        let root = assemble(points, dim, &mut nodes);
        log::debug!(
            "built k-d tree: {} points, dim {}, offset {}, stride {}",
            nodes.len(),
            dim,
            layout.offset(),
            layout.effective_stride()
        );
        Self {
            points,
            layout,
            nodes,
            root,
        }
    }

    /// Build a tree over a packed buffer of `dim`-dimensional points.
    ///
    /// # Panics
    ///
    /// See [`build`](Self::build).
    pub fn from_points(points: &'a [T], dim: usize) -> Self {
        Self::build(points, Layout::new(dim))
    }

    /// A tree with no points. Every query on it comes back empty.
    ///
    /// # Panics
    ///
    /// If `dim` is zero.
    pub fn empty(dim: usize) -> Self {
        assert!(dim > 0, "k-d tree dimension must be at least 1");
        Self {
            points: &[],
            layout: Layout::new(dim),
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<'a, T: Scalar> KdTree<'a, T> {
    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree indexes no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.layout.dim()
    }

    /// The layout the tree was built with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The borrowed coordinate buffer.
    pub fn points(&self) -> &'a [T] {
        self.points
    }

    /// The coordinates of the point starting at scalar `offset`, as returned by the
    /// queries.
    pub fn point(&self, offset: usize) -> &'a [T] {
        &self.points[offset..offset + self.dim()]
    }

    /// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut tallest = 0;
        let mut stack = vec![(root, 1_usize)];
        while let Some((i, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[i.get()];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        tallest
    }

    /// Reset every mark set by the marking queries.
    pub fn clear_marks(&mut self) {
        for node in &mut self.nodes {
            node.mark = false;
        }
    }

    /// Number of currently marked points.
    pub fn marked_len(&self) -> usize {
        self.nodes.iter().filter(|n| n.mark).count()
    }

    /// Whether the point starting at scalar `offset` is marked. Linear in the
    /// number of points.
    pub fn is_marked(&self, offset: usize) -> bool {
        self.nodes.iter().any(|n| n.point == offset && n.mark)
    }

    /// Check and slice a query point to the tree's dimension.
    pub(crate) fn query_slice<'q>(&self, query: &'q [T]) -> &'q [T] {
        let dim = self.dim();
        assert!(
            query.len() >= dim,
            "query has {} coordinates, tree needs {}",
            query.len(),
            dim
        );
        &query[..dim]
    }

    #[inline]
    pub(crate) fn node_point(&self, node: &Node) -> &'a [T] {
        self.point(node.point)
    }
}

impl<T: Scalar> Default for KdTree<'_, T> {
    fn default() -> Self {
        Self::empty(1)
    }
}

impl<T: Scalar> Debug for KdTree<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("layout", &self.layout)
            .field("points", &self.nodes.len())
            .field("marked", &self.marked_len())
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl<T: Scalar> KdTree<'_, T> {
    /// Walk the tree and assert the structural and ordering invariants.
    pub(crate) fn assert_invariants(&self) {
        let dim = self.dim();
        let mut seen = vec![false; self.nodes.len()];
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "non-empty arena without a root");
            return;
        };
        let mut stack = vec![(root, 0_usize)];
        while let Some((i, axis)) = stack.pop() {
            assert!(!seen[i.get()], "node reachable from two parents");
            seen[i.get()] = true;
            let node = self.nodes[i.get()];
            let split = self.node_point(&node)[axis];
            for (child, is_left) in [(node.left, true), (node.right, false)] {
                let Some(child) = child else { continue };
                assert_ne!(child, i, "node links to itself");
                let mut sub = vec![child];
                while let Some(j) = sub.pop() {
                    let n = &self.nodes[j.get()];
                    let v = self.node_point(n)[axis];
                    if is_left {
                        assert!(v <= split, "left subtree value above split");
                    } else {
                        assert!(v >= split, "right subtree value below split");
                    }
                    sub.extend(n.left);
                    sub.extend(n.right);
                }
                stack.push((child, (axis + 1) % dim));
            }
        }
        assert!(seen.iter().all(|s| *s), "arena node unreachable from root");
    }

    /// Node offsets, sorted.
    pub(crate) fn sorted_offsets(&self) -> Vec<usize> {
        let mut offsets: Vec<_> = self.nodes.iter().map(|n| n.point).collect();
        offsets.sort_unstable();
        offsets
    }
}
