/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::ops::Range;

/// A partition of the index range `[0 . . len)` into a fixed number of
/// contiguous parts.
///
/// Every part has `len / parts` elements, except for the first `len % parts`
/// parts, which have one more. Parts are disjoint, ordered and their union is
/// `[0 . . len)`; if there are more parts than elements, the trailing parts are
/// empty.
///
/// All parallel phases of the engine split their work using this partition,
/// with worker *i* processing the part of index *i*.
///
/// ```
/// use webrank::utils::Partition;
///
/// let p = Partition::new(10, 4);
/// assert_eq!(p.iter().collect::<Vec<_>>(), vec![0..3, 3..6, 6..8, 8..10]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    parts: usize,
}

impl Partition {
    /// Creates a partition of `[0 . . len)` in `parts` parts.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is zero.
    pub fn new(len: usize, parts: usize) -> Self {
        assert!(parts > 0, "The number of parts must be greater than 0");
        Self { len, parts }
    }

    /// Returns the number of elements of the partitioned range.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the partitioned range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of parts.
    pub fn num_parts(&self) -> usize {
        self.parts
    }

    /// Returns the part of index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not smaller than the number of parts.
    pub fn part(&self, i: usize) -> Range<usize> {
        assert!(
            i < self.parts,
            "Part {i} does not exist (the partition has {} parts)",
            self.parts
        );
        let base = self.len / self.parts;
        let rem = self.len % self.parts;
        let start = i * base + i.min(rem);
        let end = start + base + usize::from(i < rem);
        start..end
    }

    /// Returns an iterator over the parts, in order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.parts).map(|i| self.part(i))
    }
}
