// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! # Interleavings Iterator
//!
//! `Interleavings` lazily produces every merge of a fixed sequence with a
//! flexible list in which the fixed elements keep their order. Items are
//! produced in ascending enumeration index; index `c` always decodes to the
//! same sequence, so any sub-range can be enumerated independently (and in
//! parallel) and merged afterwards.
//!
//! The enumeration total `(n + k)! / n!` is computed with checked arithmetic
//! when the iterator is created. If it does not fit into `u64` construction
//! fails with `InterleaveError::CapacityExceeded` before any work is done.
//!
//! ## Highlights
//!
//! - `Iterator`, `DoubleEndedIterator`, `FusedIterator`, and (on 64-bit
//!   targets) `ExactSizeIterator`.
//! - `nth` skips in O(1) without decoding skipped items.
//! - `decode_into(index, &mut buf)` gives allocation-free random access for
//!   hot loops.
//! - `restrict(range)` and `split(parts)` carve the index space into
//!   disjoint sub-ranges for workers.

use crate::{error::InterleaveError, radix};
use std::iter::FusedIterator;
use std::ops::Range;
use talker_core::math::combinatorics::falling_factorial;

/// Returns `(n + k)! / n!`, the number of interleavings of `new` flexible
/// elements into `committed` fixed elements.
///
/// ```rust
/// use talker_interleave::count_interleavings;
///
/// assert_eq!(count_interleavings(2, 2), Ok(12));
/// assert_eq!(count_interleavings(0, 3), Ok(6));
/// assert_eq!(count_interleavings(5, 0), Ok(1));
/// assert!(count_interleavings(0, 21).is_err());
/// ```
#[inline]
pub fn count_interleavings(committed: usize, new: usize) -> Result<u64, InterleaveError> {
    falling_factorial::<u64>(committed, new)
        .ok_or(InterleaveError::CapacityExceeded { committed, new })
}

/// Enumerates every interleaving of `fixed` and `flex`.
///
/// Shorthand for [`Interleavings::new`].
#[inline]
pub fn interleavings<'a, T>(
    fixed: &'a [T],
    flex: &'a [T],
) -> Result<Interleavings<'a, T>, InterleaveError>
where
    T: Clone,
{
    Interleavings::new(fixed, flex)
}

#[derive(Debug)]
pub struct Interleavings<'a, T> {
    fixed: &'a [T],
    flex: &'a [T],
    total: u64,
    /// Next index to yield from the front.
    front: u64,
    /// One past the last index to yield from the back.
    back: u64,
}

impl<'a, T> Clone for Interleavings<'a, T> {
    fn clone(&self) -> Self {
        Self {
            fixed: self.fixed,
            flex: self.flex,
            total: self.total,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Interleavings<'a, T>
where
    T: Clone,
{
    /// Creates an iterator over all `(n + k)! / n!` interleavings.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the count does not fit into `u64`.
    pub fn new(fixed: &'a [T], flex: &'a [T]) -> Result<Self, InterleaveError> {
        let total = count_interleavings(fixed.len(), flex.len())?;
        Ok(Self {
            fixed,
            flex,
            total,
            front: 0,
            back: total,
        })
    }

    /// Creates an iterator over the interleavings whose indices lie in `range`.
    ///
    /// The range is clamped to `0..total`.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the count does not fit into `u64`.
    pub fn with_range(
        fixed: &'a [T],
        flex: &'a [T],
        range: Range<u64>,
    ) -> Result<Self, InterleaveError> {
        Ok(Self::new(fixed, flex)?.restrict(range))
    }

    /// Restricts the remaining enumeration to indices in `range`.
    ///
    /// The result only yields indices that were still pending and lie in
    /// `range`; an empty intersection yields nothing.
    pub fn restrict(mut self, range: Range<u64>) -> Self {
        self.front = self.front.max(range.start);
        self.back = self.back.min(range.end);
        if self.front > self.back {
            self.front = self.back;
        }
        self
    }

    /// The total number of interleavings, `(n + k)! / n!`, regardless of any restriction.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The number of interleavings still to be yielded.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.back - self.front
    }

    /// The index range still to be yielded.
    #[inline]
    pub fn pending(&self) -> Range<u64> {
        self.front..self.back
    }

    #[inline]
    pub fn fixed(&self) -> &'a [T] {
        self.fixed
    }

    #[inline]
    pub fn flex(&self) -> &'a [T] {
        self.flex
    }

    /// Length of every produced sequence, `n + k`.
    #[inline]
    pub fn sequence_len(&self) -> usize {
        self.fixed.len() + self.flex.len()
    }

    /// Writes the interleaving with enumeration index `index` into `out`.
    ///
    /// Independent of the iterator position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.total()`.
    #[inline]
    pub fn decode_into(&self, index: u64, out: &mut Vec<T>) {
        assert!(
            index < self.total,
            "called `Interleavings::decode_into` with index out of bounds: the total is {} but the index is {}",
            self.total,
            index
        );
        radix::decode_into(index, self.fixed, self.flex, out);
    }

    /// Returns the interleaving with enumeration index `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: u64) -> Option<Vec<T>> {
        if index >= self.total {
            return None;
        }
        let mut out = Vec::with_capacity(self.sequence_len());
        radix::decode_into(index, self.fixed, self.flex, &mut out);
        Some(out)
    }

    /// Splits the pending indices into at most `parts` contiguous, disjoint,
    /// non-empty ranges whose lengths differ by at most one.
    pub fn split(&self, parts: usize) -> Vec<Range<u64>> {
        partition_range(self.pending(), parts)
    }

    #[inline]
    fn decode(&self, index: u64) -> Vec<T> {
        let mut out = Vec::with_capacity(self.sequence_len());
        radix::decode_into(index, self.fixed, self.flex, &mut out);
        out
    }
}

/// Splits `range` into at most `parts` contiguous, disjoint, non-empty ranges
/// whose lengths differ by at most one. Covers `range` exactly.
///
/// ```rust
/// use talker_interleave::interleavings::partition_range;
///
/// assert_eq!(partition_range(0..10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(partition_range(0..2, 4), vec![0..1, 1..2]);
/// assert!(partition_range(5..5, 2).is_empty());
/// ```
pub fn partition_range(range: Range<u64>, parts: usize) -> Vec<Range<u64>> {
    let len = range.end.saturating_sub(range.start);
    if len == 0 || parts == 0 {
        return Vec::new();
    }
    let parts = (parts as u64).min(len);
    let chunk = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = range.start;
    for part in 0..parts {
        let size = chunk + u64::from(part < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

impl<'a, T> Iterator for Interleavings<'a, T>
where
    T: Clone,
{
    type Item = Vec<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some(self.decode(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }

    #[inline]
    fn count(self) -> usize {
        // Counting must not decode every item.
        usize::try_from(self.remaining()).unwrap_or(usize::MAX)
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let skip = u64::try_from(n).unwrap_or(u64::MAX);
        self.front = self.front.saturating_add(skip).min(self.back);
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Interleavings<'a, T>
where
    T: Clone,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.decode(self.back))
    }
}

impl<'a, T> FusedIterator for Interleavings<'a, T> where T: Clone {}

// Every space that fits into u64 also fits into usize here.
#[cfg(target_pointer_width = "64")]
impl<'a, T> ExactSizeIterator for Interleavings<'a, T> where T: Clone {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn strip_flexible<'t>(ordering: &[&'t str], fixed: &[&'t str]) -> Vec<&'t str> {
        ordering
            .iter()
            .copied()
            .filter(|element| fixed.contains(element))
            .collect()
    }

    #[test]
    fn test_scenario_two_fixed_two_flexible() {
        let fixed = ["F0", "F1"];
        let flex = ["X0", "X1"];
        let all: Vec<_> = interleavings(&fixed, &flex).unwrap().collect();

        assert_eq!(all.len(), 12);
        let distinct: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(distinct.len(), 12);
        for ordering in &all {
            assert_eq!(ordering.len(), 4);
            assert_eq!(strip_flexible(ordering, &fixed), vec!["F0", "F1"]);
        }
    }

    #[test]
    fn test_scenario_permutations_without_fixed() {
        let flex = ["a", "b", "c"];
        let all: HashSet<Vec<&str>> = interleavings(&[], &flex).unwrap().collect();

        let expected: HashSet<Vec<&str>> = [
            vec!["a", "b", "c"],
            vec!["a", "c", "b"],
            vec!["b", "a", "c"],
            vec!["b", "c", "a"],
            vec!["c", "a", "b"],
            vec!["c", "b", "a"],
        ]
        .into_iter()
        .collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_scenario_fixed_only_yields_fixed_once() {
        let all: Vec<_> = interleavings(&["a", "b"], &[]).unwrap().collect();
        assert_eq!(all, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_empty_inputs_yield_single_empty_sequence() {
        let empty: [u8; 0] = [];
        let all: Vec<_> = interleavings(&empty, &empty).unwrap().collect();
        assert_eq!(all, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_capacity_exceeded_before_iterating() {
        let flex: Vec<u32> = (0..21).collect();
        let err = interleavings(&[], &flex).unwrap_err();
        assert_eq!(
            err,
            InterleaveError::CapacityExceeded {
                committed: 0,
                new: 21
            }
        );

        // 20! still fits.
        let flex: Vec<u32> = (0..20).collect();
        let it = interleavings(&[], &flex).unwrap();
        assert_eq!(it.total(), 2_432_902_008_176_640_000);
    }

    #[test]
    fn test_size_hint_and_len_track_progress() {
        let mut it = interleavings(&[1, 2], &[3, 4]).unwrap();
        assert_eq!(it.len(), 12);
        it.next();
        it.next_back();
        assert_eq!(it.len(), 10);
        assert_eq!(it.size_hint(), (10, Some(10)));
        assert_eq!(it.clone().count(), 10);
    }

    #[test]
    fn test_nth_matches_random_access() {
        let fixed = [10, 20, 30];
        let flex = [1, 2];
        let it = interleavings(&fixed, &flex).unwrap();
        let expected = it.get(7).unwrap();

        let mut skipping = it.clone();
        assert_eq!(skipping.nth(7), Some(expected));
        assert_eq!(skipping.pending(), 8..20);
        assert_eq!(skipping.nth(usize::MAX), None);
        assert_eq!(skipping.next(), None);
    }

    #[test]
    fn test_reverse_iteration_yields_same_set() {
        let forward: Vec<_> = interleavings(&['a'], &['x', 'y']).unwrap().collect();
        let mut backward: Vec<_> = interleavings(&['a'], &['x', 'y']).unwrap().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_restricted_ranges_cover_the_space_exactly() {
        let fixed = ["F0", "F1", "F2"];
        let flex = ["X0", "X1"];
        let full: Vec<_> = interleavings(&fixed, &flex).unwrap().collect();

        let it = interleavings(&fixed, &flex).unwrap();
        let mut stitched = Vec::new();
        for range in it.split(3) {
            stitched.extend(Interleavings::with_range(&fixed, &flex, range).unwrap());
        }
        assert_eq!(stitched, full);
    }

    #[test]
    fn test_restrict_clamps_to_total() {
        let it = interleavings(&[0u8], &[1u8]).unwrap().restrict(1..100);
        assert_eq!(it.pending(), 1..2);

        let empty = interleavings(&[0u8], &[1u8]).unwrap().restrict(5..9);
        assert_eq!(empty.remaining(), 0);
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let it = interleavings(&[0u8], &[1u8]).unwrap();
        assert!(it.get(1).is_some());
        assert!(it.get(2).is_none());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_decode_into_panics_beyond_total() {
        let it = interleavings(&[0u8], &[1u8]).unwrap();
        let mut buf = Vec::new();
        it.decode_into(2, &mut buf);
    }

    #[test]
    fn test_restarting_yields_identical_sequences() {
        let fixed = ["a", "b"];
        let flex = ["x", "y", "z"];
        let first: Vec<_> = interleavings(&fixed, &flex).unwrap().collect();
        let second: Vec<_> = interleavings(&fixed, &flex).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_range_balances_parts() {
        assert_eq!(partition_range(0..12, 4), vec![0..3, 3..6, 6..9, 9..12]);
        assert_eq!(partition_range(3..8, 2), vec![3..6, 6..8]);
        assert!(partition_range(0..5, 0).is_empty());
    }
}
