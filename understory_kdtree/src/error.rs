// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable query errors.

/// A range query found more matches than its output buffer could hold.
///
/// The buffer is left completely filled with the first `capacity` matches in
/// traversal order, and with marking queries those matches stay marked. Treat the
/// error as "at least `capacity` points were in range".
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("range query matched more than {capacity} points")]
pub struct RangeOverflow {
    /// Length of the output buffer that overflowed.
    pub capacity: usize,
}
