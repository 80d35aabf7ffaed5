// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_kdtree --heading-base-level=0

//! Understory k-d tree: a static spatial index over flat coordinate buffers.
//!
//! - Bulk-build a balanced tree from any `&[T]` of packed or strided points.
//! - Exact nearest-neighbor queries.
//! - Radius queries into a caller-sized buffer, with optional marking so a sweep of
//!   overlapping queries reports every point at most once.
//!
//! The tree borrows the coordinate buffer and never copies it; queries return the
//! scalar offset of a point's first coordinate, which indexes straight back into the
//! caller's data. It is generic over the coordinate type through [`Scalar`]
//! (`u8`, `u16`, `u32`, `i32`, `i64`, `f32`, `f64`); distances are measured in `f64`.
//!
//! # Example
//!
//! ```rust
//! use understory_kdtree::KdTree;
//!
//! let points = [2.0, 3.0, 5.0, 4.0, 9.0, 6.0, 4.0, 7.0, 8.0, 1.0, 7.0, 2.0];
//! let tree = KdTree::from_points(&points, 2);
//!
//! let hit = tree.nearest(&[9.0, 2.0]);
//! assert_eq!(hit.point, Some(8));
//! assert_eq!(tree.point(8), &[8.0, 1.0]);
//! assert_eq!(hit.dist_sq, 2.0);
//!
//! let mut out = [0; 8];
//! let n = tree.range(&[9.0, 2.0], 5.0, &mut out).unwrap();
//! assert_eq!(n, 2);
//! ```
//!
//! Marking queries make a moving window count each point once:
//!
//! ```rust
//! use understory_kdtree::KdTree;
//!
//! let samples: Vec<f64> = (0..20).flat_map(|i| [i as f64, 0.0]).collect();
//! let mut tree = KdTree::from_points(&samples, 2);
//!
//! let mut out = [0; 16];
//! let mut distinct = 0;
//! for x in [2.0, 3.0, 4.0] {
//!     distinct += tree.range_unmarked(&[x, 0.0], 2.5, &mut out).unwrap();
//! }
//! // x = 1..=5 were covered, some of them by all three windows.
//! assert_eq!(distinct, 5);
//! tree.clear_marks();
//! ```
//!
//! Strided layouts index a sub-group of fields out of wider records:
//!
//! ```rust
//! use understory_kdtree::{KdTree, Layout};
//!
//! // (x, y, r, g, b) records; index the color.
//! let pixels = [0, 0, 255, 0, 0, 1, 0, 0, 250, 10];
//! let tree = KdTree::build(&pixels, Layout::new(3).with_offset(2).with_stride(5));
//! assert_eq!(tree.nearest(&[0, 240, 0]).point, Some(7));
//! ```
//!
//! ## Errors and panics
//!
//! Contract violations (zero dimension, storage too short for one point, short
//! query slices) panic. A range query whose buffer is too small returns
//! [`RangeOverflow`]; the buffer then holds the first matches found, and marking
//! queries leave them marked.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds assert.
//! Data with many equal coordinates is supported, but the tree can grow deeper than
//! `log2(n)` on it.

#![no_std]

extern crate alloc;

mod build;
pub mod error;
mod nearest;
mod node;
mod range;
pub mod tree;
pub mod types;

pub use error::RangeOverflow;
pub use nearest::Nearest;
pub use tree::KdTree;
pub use types::{Layout, Scalar};
