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


//! # Bundles
//!
//! A `Bundle` is one enumerated ordering annotated with its cost and with the
//! enumeration index it was produced at. Bundles are ranked by the total
//! order `(cost, index)`: lower cost first, and among exactly equal costs the
//! lower enumeration index first. Because the index is unique within one
//! search, this order never depends on the order in which bundles were
//! produced, which keeps parallel and sequential searches in agreement.

use std::cmp::Ordering;
use talker_core::num::cost::CostValue;

#[derive(Clone, Debug, PartialEq)]
pub struct Bundle<T, C> {
    ordering: Vec<T>,
    cost: C,
    index: u64,
}

impl<T, C> Bundle<T, C>
where
    C: CostValue,
{
    #[inline]
    pub fn new(ordering: Vec<T>, cost: C, index: u64) -> Self {
        Self {
            ordering,
            cost,
            index,
        }
    }

    /// The ordered elements of this bundle.
    #[inline]
    pub fn ordering(&self) -> &[T] {
        &self.ordering
    }

    #[inline]
    pub fn cost(&self) -> C {
        self.cost
    }

    /// The enumeration index this bundle originated from.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ordering.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }

    #[inline]
    pub fn into_ordering(self) -> Vec<T> {
        self.ordering
    }

    /// Compares two bundles by rank: cost first, then enumeration index.
    #[inline]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cost_cmp(&other.cost)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl<T, C> std::fmt::Display for Bundle<T, C>
where
    T: std::fmt::Display,
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.cost)?;
        for element in &self.ordering {
            write!(f, " {}", element)?;
        }
        Ok(())
    }
}

/// A ranked list of bundles, ascending by `(cost, index)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BundleSet<T, C> {
    bundles: Vec<Bundle<T, C>>,
}

impl<T, C> Default for BundleSet<T, C> {
    fn default() -> Self {
        Self {
            bundles: Vec::new(),
        }
    }
}

impl<T, C> BundleSet<T, C>
where
    C: CostValue,
{
    /// Creates a set from arbitrary bundles, sorting them by rank.
    ///
    /// Deduplication and truncation are the selector's job; this only
    /// establishes the ordering invariant.
    pub fn new(mut bundles: Vec<Bundle<T, C>>) -> Self {
        bundles.sort_unstable_by(|a, b| a.rank_cmp(b));
        Self { bundles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// The cheapest bundle, if any.
    #[inline]
    pub fn best(&self) -> Option<&Bundle<T, C>> {
        self.bundles.first()
    }

    #[inline]
    pub fn bundles(&self) -> &[Bundle<T, C>] {
        &self.bundles
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Bundle<T, C>> {
        self.bundles.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Bundle<T, C>> {
        self.bundles
    }
}

impl<T, C> IntoIterator for BundleSet<T, C> {
    type Item = Bundle<T, C>;
    type IntoIter = std::vec::IntoIter<Bundle<T, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bundles.into_iter()
    }
}

impl<'s, T, C> IntoIterator for &'s BundleSet<T, C> {
    type Item = &'s Bundle<T, C>;
    type IntoIter = std::slice::Iter<'s, Bundle<T, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bundles.iter()
    }
}

impl<T, C> std::fmt::Display for BundleSet<T, C>
where
    T: std::fmt::Display,
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bundles.is_empty() {
            return writeln!(f, "(no bundles)");
        }
        for bundle in &self.bundles {
            writeln!(f, "{}", bundle)?;
        }
        Ok(())
    }
}
