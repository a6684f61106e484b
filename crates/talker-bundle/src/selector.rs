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


//! # Bundle Selector
//!
//! Keeps the `max_bundles` best distinct bundles seen so far. Bundles are
//! ranked by `(cost, index)`; two bundles with identical orderings count as
//! one, and the better-ranked of them is the one kept.
//!
//! The selector is a bounded max-heap whose top is the current worst kept
//! bundle, plus a hash set of the kept orderings. Memory stays proportional
//! to `max_bundles` no matter how many bundles are offered, and the result
//! does not depend on the order in which bundles arrive. Per-worker
//! selectors of a parallel search can therefore be merged in any order.

use rustc_hash::FxHashSet;
use std::{cmp::Ordering, collections::BinaryHeap, hash::Hash};
use talker_core::num::cost::CostValue;
use talker_model::bundle::{Bundle, BundleSet};

/// Heap entry ordered by bundle rank, so the heap top is the worst bundle.
#[derive(Debug, Clone)]
struct Ranked<T, C>(Bundle<T, C>);

impl<T, C> PartialEq for Ranked<T, C>
where
    C: CostValue,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, C> Eq for Ranked<T, C> where C: CostValue {}

impl<T, C> PartialOrd for Ranked<T, C>
where
    C: CostValue,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, C> Ord for Ranked<T, C>
where
    C: CostValue,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

#[derive(Debug, Clone)]
pub struct BundleSelector<T, C> {
    max_bundles: usize,
    heap: BinaryHeap<Ranked<T, C>>,
    kept: FxHashSet<Vec<T>>,
    duplicates: u64,
}

impl<T, C> BundleSelector<T, C>
where
    T: Clone + Eq + Hash,
    C: CostValue,
{
    pub fn new(max_bundles: usize) -> Self {
        // The heap briefly holds one extra entry during replacement.
        let capacity = max_bundles.saturating_add(1).min(4096);
        Self {
            max_bundles,
            heap: BinaryHeap::with_capacity(capacity),
            kept: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            duplicates: 0,
        }
    }

    #[inline]
    pub fn max_bundles(&self) -> usize {
        self.max_bundles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.max_bundles
    }

    /// The worst bundle currently kept.
    #[inline]
    pub fn worst(&self) -> Option<&Bundle<T, C>> {
        self.heap.peek().map(|r| &r.0)
    }

    /// Number of offered bundles whose ordering was already kept.
    #[inline]
    pub fn duplicates_discarded(&self) -> u64 {
        self.duplicates
    }

    /// Returns `true` if a bundle with this cost and index would currently be kept,
    /// assuming its ordering is new.
    #[inline]
    pub fn would_accept(&self, cost: C, index: u64) -> bool {
        if self.max_bundles == 0 {
            return false;
        }
        match self.heap.peek() {
            Some(worst) if self.is_full() => match cost.cost_cmp(&worst.0.cost()) {
                Ordering::Less => true,
                Ordering::Equal => index < worst.0.index(),
                Ordering::Greater => false,
            },
            _ => true,
        }
    }

    /// Offers a bundle. Returns `true` if it is kept.
    pub fn offer(&mut self, bundle: Bundle<T, C>) -> bool {
        if self.max_bundles == 0 {
            return false;
        }

        if self.kept.contains(bundle.ordering()) {
            self.duplicates += 1;
            let improves = self
                .heap
                .iter()
                .any(|kept| kept.0.ordering() == bundle.ordering() && bundle.rank_cmp(&kept.0).is_lt());
            if !improves {
                return false;
            }
            self.heap.retain(|kept| kept.0.ordering() != bundle.ordering());
            self.heap.push(Ranked(bundle));
            return true;
        }

        if !self.would_accept(bundle.cost(), bundle.index()) {
            return false;
        }

        self.kept.insert(bundle.ordering().to_vec());
        self.heap.push(Ranked(bundle));
        if self.heap.len() > self.max_bundles {
            if let Some(evicted) = self.heap.pop() {
                self.kept.remove(evicted.0.ordering());
            }
        }
        true
    }

    /// Offers every bundle of `bundles`. Returns how many were kept at the time of offering.
    pub fn extend<I>(&mut self, bundles: I) -> usize
    where
        I: IntoIterator<Item = Bundle<T, C>>,
    {
        let mut kept = 0;
        for bundle in bundles {
            kept += usize::from(self.offer(bundle));
        }
        kept
    }

    /// Absorbs another selector, e.g. the one of a finished worker.
    pub fn merge(&mut self, other: BundleSelector<T, C>) {
        self.duplicates += other.duplicates;
        for ranked in other.heap.into_vec() {
            self.offer(ranked.0);
        }
    }

    /// The kept bundles, ascending by `(cost, index)`.
    pub fn into_bundle_set(self) -> BundleSet<T, C> {
        BundleSet::new(self.heap.into_iter().map(|r| r.0).collect())
    }
}

/// Ranks `bundles`, drops repeated orderings, and keeps the `max_bundles` best.
///
/// ```rust
/// use talker_bundle::select;
/// use talker_model::bundle::Bundle;
///
/// let set = select(
///     vec![
///         Bundle::new(vec![2, 1], 5, 0),
///         Bundle::new(vec![1, 2], 3, 1),
///         Bundle::new(vec![2, 1], 9, 2),
///     ],
///     5,
/// );
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.best().map(|b| b.cost()), Some(3));
/// ```
pub fn select<T, C, I>(bundles: I, max_bundles: usize) -> BundleSet<T, C>
where
    T: Clone + Eq + Hash,
    C: CostValue,
    I: IntoIterator<Item = Bundle<T, C>>,
{
    let mut selector = BundleSelector::new(max_bundles);
    selector.extend(bundles);
    selector.into_bundle_set()
}
