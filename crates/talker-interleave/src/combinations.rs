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


//! # Subset Enumeration
//!
//! Lexicographic enumeration of the `size`-element subsets of `0..len`.
//! Used to merge only a bounded number of new elements at a time: each
//! yielded subset selects which flexible elements take part in one round of
//! interleaving.
//!
//! ```rust
//! use talker_interleave::combinations::Combinations;
//!
//! let subsets: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
//! assert_eq!(
//!     subsets,
//!     vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
//! );
//! ```

use smallvec::SmallVec;
use std::iter::FusedIterator;

#[derive(Debug, Clone)]
pub struct Combinations {
    len: usize,
    current: SmallVec<[usize; 16]>,
    exhausted: bool,
}

impl Combinations {
    /// Creates an iterator over all `size`-subsets of `0..len`.
    ///
    /// `size == 0` yields the empty subset once; `size > len` yields nothing.
    pub fn new(len: usize, size: usize) -> Self {
        Self {
            len,
            current: (0..size).collect(),
            exhausted: size > len,
        }
    }

    /// The number of elements in every yielded subset.
    #[inline]
    pub fn size(&self) -> usize {
        self.current.len()
    }

    /// Moves `current` to its lexicographic successor. Returns `false` if
    /// `current` was the last subset.
    fn advance(&mut self) -> bool {
        let size = self.current.len();
        // Rightmost position that can still move right.
        let Some(pivot) = (0..size)
            .rev()
            .find(|&i| self.current[i] < self.len - size + i)
        else {
            return false;
        };

        self.current[pivot] += 1;
        for i in pivot + 1..size {
            self.current[i] = self.current[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let subset = self.current.to_vec();
        self.exhausted = !self.advance();
        Some(subset)
    }
}

impl FusedIterator for Combinations {}

/// Picks the elements named by `subset` out of `elements`, keeping subset order.
///
/// # Panics
///
/// Panics if an index in `subset` is out of bounds for `elements`.
#[inline]
pub fn pick<T>(elements: &[T], subset: &[usize]) -> Vec<T>
where
    T: Clone,
{
    subset.iter().map(|&i| elements[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use talker_core::math::combinatorics::binomial;

    #[test]
    fn test_counts_match_binomial() {
        for len in 0..8 {
            for size in 0..=len + 1 {
                let count = Combinations::new(len, size).count() as u64;
                assert_eq!(Some(count), binomial::<u64>(len, size), "{len} choose {size}");
            }
        }
    }

    #[test]
    fn test_empty_subset_is_yielded_once() {
        let subsets: Vec<_> = Combinations::new(3, 0).collect();
        assert_eq!(subsets, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_oversized_subset_yields_nothing() {
        assert_eq!(Combinations::new(2, 3).next(), None);
    }

    #[test]
    fn test_subsets_are_strictly_increasing_and_lexicographic() {
        let subsets: Vec<_> = Combinations::new(6, 3).collect();
        for subset in &subsets {
            assert!(subset.windows(2).all(|w| w[0] < w[1]));
        }
        assert!(subsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pick_keeps_subset_order() {
        assert_eq!(pick(&["a", "b", "c", "d"], &[1, 3]), vec!["b", "d"]);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut it = Combinations::new(2, 2);
        assert_eq!(it.next(), Some(vec![0, 1]));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
