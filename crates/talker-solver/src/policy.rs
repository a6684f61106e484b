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


//! # New Task Policy
//!
//! Decides which of the new tasks are interleaved with the committed ones.
//!
//! - `All`: one enumeration merging every new task into the committed
//!   sequence, `(n + k)! / n!` orderings.
//! - `Subsets { max_size, best_per_subset }`: one enumeration per non-empty
//!   subset of at most `max_size` new tasks, so a robot can offer to take only
//!   some of them. Subsets are visited by size, then lexicographically. Each
//!   enumeration gets its own block of global indices, in that order, which
//!   keeps tie-breaking deterministic across enumerations. When no non-empty
//!   subset exists (no new tasks, or `max_size == 0`) the committed sequence
//!   alone is enumerated. With `best_per_subset`, only the cheapest ordering
//!   of each subset competes for the final bundles.
//!
//! Independently of the policy, the tail of the committed route may be
//! released (`released_tail`): released committed tasks join every
//! enumeration as flexible elements, after the chosen new tasks, and may be
//! reordered freely.

use std::ops::Range;
use talker_core::math::combinatorics::binomial;
use talker_interleave::{
    InterleaveError,
    combinations::{Combinations, pick},
    count_interleavings,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NewTaskPolicy {
    #[default]
    All,
    Subsets { max_size: usize, best_per_subset: bool },
}

impl std::fmt::Display for NewTaskPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewTaskPolicy::All => write!(f, "All"),
            NewTaskPolicy::Subsets {
                max_size,
                best_per_subset,
            } => write!(
                f,
                "Subsets(max_size: {}, best_per_subset: {})",
                max_size, best_per_subset
            ),
        }
    }
}

/// Number of trailing committed tasks released for reordering when
/// `permute_last` are requested from a route of `committed` tasks.
///
/// A single released task stays a single task; asking for more than one
/// releases the whole route.
///
/// ```rust
/// use talker_solver::policy::released_tail;
///
/// assert_eq!(released_tail(0, 4), 0);
/// assert_eq!(released_tail(1, 4), 1);
/// assert_eq!(released_tail(2, 4), 4);
/// assert_eq!(released_tail(1, 0), 0);
/// ```
#[inline]
pub fn released_tail(permute_last: usize, committed: usize) -> usize {
    if permute_last > 1 || permute_last > committed {
        committed
    } else {
        permute_last
    }
}

/// One enumeration of the committed sequence with `flex`, owning the global
/// indices `offset..offset + len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<T> {
    pub flex: Vec<T>,
    pub offset: u64,
    pub len: u64,
}

impl<T> Segment<T> {
    #[inline]
    pub fn indices(&self) -> Range<u64> {
        self.offset..self.offset + self.len
    }

    /// The part of `range` inside this segment, as local indices.
    #[inline]
    pub fn local_range(&self, range: &Range<u64>) -> Option<Range<u64>> {
        let start = range.start.max(self.offset);
        let end = range.end.min(self.offset + self.len);
        (start < end).then(|| start - self.offset..end - self.offset)
    }
}

impl NewTaskPolicy {
    /// Returns `true` if each subset contributes at most its cheapest ordering.
    #[inline]
    pub fn best_per_subset(&self) -> bool {
        matches!(
            self,
            NewTaskPolicy::Subsets {
                best_per_subset: true,
                ..
            }
        )
    }

    /// Subset sizes enumerated for `new` new tasks. Empty when no non-empty subset qualifies.
    fn subset_sizes(&self, new: usize) -> Range<usize> {
        match *self {
            NewTaskPolicy::All => new..new + 1,
            NewTaskPolicy::Subsets { max_size, .. } => 1..max_size.min(new) + 1,
        }
    }

    /// Total number of orderings this policy enumerates for `committed` fixed
    /// tasks, `released` committed tasks free to move and `new` new tasks.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the total does not fit into `u64`.
    pub fn orderings(&self, committed: usize, released: usize, new: usize) -> Result<u64, InterleaveError> {
        let exceeded = InterleaveError::CapacityExceeded {
            committed: committed + released,
            new,
        };
        let sizes = self.subset_sizes(new);
        if sizes.is_empty() {
            return count_interleavings(committed, released).map_err(|_| exceeded);
        }

        let mut total: u64 = 0;
        for size in sizes {
            let subsets = binomial::<u64>(new, size).ok_or(exceeded.clone())?;
            let per_subset = count_interleavings(committed, size + released).map_err(|_| exceeded.clone())?;
            total = subsets
                .checked_mul(per_subset)
                .and_then(|orderings| total.checked_add(orderings))
                .ok_or(exceeded.clone())?;
        }
        Ok(total)
    }

    /// Lays out the enumerations this policy performs, with their global index blocks.
    ///
    /// Every segment merges its subset of `flex`, followed by `released`, into
    /// the `committed` fixed tasks.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the total does not fit into `u64`.
    pub fn segments<T>(
        &self,
        committed: usize,
        released: &[T],
        flex: &[T],
    ) -> Result<Vec<Segment<T>>, InterleaveError>
    where
        T: Clone,
    {
        // Fails fast before any subset is materialized.
        self.orderings(committed, released.len(), flex.len())?;

        let mut sizes = self.subset_sizes(flex.len());
        if sizes.is_empty() {
            sizes = 0..1;
        }

        let mut segments = Vec::new();
        let mut offset = 0;
        for size in sizes {
            let len = count_interleavings(committed, size + released.len())?;
            for subset in Combinations::new(flex.len(), size) {
                let mut chosen = pick(flex, &subset);
                chosen.extend_from_slice(released);
                segments.push(Segment {
                    flex: chosen,
                    offset,
                    len,
                });
                offset += len;
            }
        }
        Ok(segments)
    }
}
