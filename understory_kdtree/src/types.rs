// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate scalars and the storage layout description.

use core::fmt::Debug;

/// Numeric scalar abstraction for tree coordinates.
///
/// Median selection orders values with the scalar's own `PartialOrd`, so integer
/// coordinates split exactly. Distances and split-plane offsets are always measured
/// in `f64`, which keeps `u8` color channels from overflowing when squared.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Convert a coordinate to `f64` for distance computations.
    fn to_f64(v: Self) -> f64;

    /// Whether the value can take part in ordering. Only NaN fails this.
    #[inline]
    fn is_ordered(v: Self) -> bool {
        v.partial_cmp(&v).is_some()
    }
}

impl Scalar for u8 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for u16 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for u32 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for i32 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for i64 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        // Exact up to 2^53; beyond that distances are approximate.
        v as f64
    }
}

impl Scalar for f32 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

impl Scalar for f64 {
    #[inline]
    fn to_f64(v: Self) -> f64 {
        v
    }
}

/// How points are laid out inside a flat coordinate buffer.
///
/// Points start at `offset` and repeat every `stride` scalars; each point is the
/// `dim` consecutive coordinates at its start. With `stride == dim` (the default)
/// this is a plain packed array. A wider stride picks a sub-group of fields out of
/// a larger record, e.g. the `rgb` of an `xyzrgb` record with `offset = 3`,
/// `stride = 6`, `dim = 3`.
///
/// A stride of `0` means "same as `dim`".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    dim: usize,
    offset: usize,
    stride: usize,
}

impl Layout {
    /// A packed layout of `dim`-dimensional points starting at scalar 0.
    pub const fn new(dim: usize) -> Self {
        Self {
            dim,
            offset: 0,
            stride: 0,
        }
    }

    /// Start the first point at scalar `offset`.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the distance between consecutive point starts, in scalars.
    #[must_use]
    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Number of coordinates per point.
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Scalar index of the first point.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Distance between consecutive point starts as configured; `0` means `dim`.
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The stride with the `0` default resolved.
    pub const fn effective_stride(&self) -> usize {
        if self.stride == 0 { self.dim } else { self.stride }
    }

    /// Scalar offsets of every point this layout selects out of `len` scalars,
    /// in storage order. Points that would run past the end are dropped.
    pub fn point_offsets(&self, len: usize) -> impl Iterator<Item = usize> {
        assert!(self.dim > 0, "k-d tree dimension must be at least 1");
        let dim = self.dim;
        (self.offset..len)
            .step_by(self.effective_stride())
            .take_while(move |&at| at + dim <= len)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1)
    }
}
