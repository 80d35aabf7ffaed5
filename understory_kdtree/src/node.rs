// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena nodes.

/// Position of a node inside the tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// One indexed point.
///
/// `point` is the scalar offset of the point's first coordinate in the borrowed
/// storage, not an ordinal. Children are arena positions.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Node {
    pub(crate) point: usize,
    pub(crate) left: Option<NodeIdx>,
    pub(crate) right: Option<NodeIdx>,
    pub(crate) mark: bool,
}

impl Node {
    pub(crate) const fn new(point: usize) -> Self {
        Self {
            point,
            left: None,
            right: None,
            mark: false,
        }
    }
}

/// Pending traversal step: a subtree, its split axis, and the squared distance from
/// the query to the splitting plane that separates it from the query's side.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Visit {
    pub(crate) node: NodeIdx,
    pub(crate) axis: usize,
    pub(crate) bound: f64,
}

/// Squared Euclidean distance between two points of equal dimension.
#[inline]
pub(crate) fn dist_sq<T: crate::types::Scalar>(a: &[T], b: &[T]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "points must have the same dimension");
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = T::to_f64(x) - T::to_f64(y);
            d * d
        })
        .sum()
}
