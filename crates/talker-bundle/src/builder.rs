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


//! # Bundle Builder
//!
//! `BundleBuilder` binds an origin (whatever the evaluator needs besides the
//! ordering, e.g. a `TaskBoard`), the fixed and flexible sequences and the
//! requested bundle size. `build` turns it into the lazy `Bundles` iterator.
//!
//! For each enumeration index the iterator decodes the ordering into a
//! reused buffer, asks the evaluator for a cost, and yields a `Bundle` when
//! the cost is admissible. An evaluation error or a cost that cannot be
//! ranked (NaN, infinity) drops the ordering: it is logged at `debug`,
//! counted, and reported to the monitor, and enumeration continues.
//!
//! A builder can be restricted to a sub-range of the enumeration (one block
//! of a parallel search) and can shift the produced bundle indices by an
//! offset, so that bundles from several enumerations keep globally unique
//! indices for tie-breaking.
//!
//! A monitored iterator reports steps and evaluations and stops when the
//! monitor asks it to. The search lifecycle (`on_enter_search`,
//! `on_exit_search`) belongs to whoever drives one or more iterators.
//!
//! ```rust
//! use talker_bundle::builder::BundleBuilder;
//! use talker_search::eval::FnEvaluator;
//!
//! let mut by_position = FnEvaluator::new("by_position", |_: &(), ordering: &[char], _| {
//!     Ok(ordering.iter().position(|&c| c == 'x').unwrap_or(0) as u32)
//! });
//!
//! let bundles: Vec<_> = BundleBuilder::new(&(), &['a', 'b'], &['x'], 0)
//!     .build(&mut by_position)
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(bundles.len(), 3);
//! assert_eq!(bundles[0].ordering(), ['x', 'a', 'b']);
//! ```

use std::ops::Range;
use talker_core::num::cost::CostValue;
use talker_interleave::{Interleavings, InterleaveError};
use talker_model::bundle::Bundle;
use talker_search::{
    eval::{CostEvaluator, EvaluationError},
    monitor::{
        no_op::NoOpMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    },
};

#[derive(Debug, Clone)]
pub struct BundleBuilder<'a, S, T>
where
    S: ?Sized,
{
    origin: &'a S,
    fixed: &'a [T],
    flex: &'a [T],
    bundle_size: usize,
    range: Option<Range<u64>>,
    index_offset: u64,
}

impl<'a, S, T> BundleBuilder<'a, S, T>
where
    S: ?Sized,
    T: Clone,
{
    #[inline]
    pub fn new(origin: &'a S, fixed: &'a [T], flex: &'a [T], bundle_size: usize) -> Self {
        Self {
            origin,
            fixed,
            flex,
            bundle_size,
            range: None,
            index_offset: 0,
        }
    }

    /// Only enumerates the orderings whose local index lies in `range`.
    #[inline]
    pub fn with_range(mut self, range: Range<u64>) -> Self {
        self.range = Some(range);
        self
    }

    /// Adds `offset` to the index of every produced bundle.
    #[inline]
    pub fn with_index_offset(mut self, offset: u64) -> Self {
        self.index_offset = offset;
        self
    }

    /// Number of orderings in the unrestricted enumeration.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the count does not fit into `u64`.
    #[inline]
    pub fn total(&self) -> Result<u64, InterleaveError> {
        talker_interleave::count_interleavings(self.fixed.len(), self.flex.len())
    }

    /// Builds an unmonitored bundle iterator.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the enumeration does not fit into `u64`.
    pub fn build<'e, E>(
        self,
        evaluator: &'e mut E,
    ) -> Result<Bundles<'a, 'e, S, T, E, NoOpMonitor>, InterleaveError>
    where
        E: CostEvaluator<S, T>,
    {
        self.build_monitored(evaluator, NoOpMonitor::new())
    }

    /// Builds a bundle iterator that reports to `monitor` and stops as soon
    /// as the monitor asks to terminate.
    ///
    /// # Errors
    ///
    /// Returns `InterleaveError::CapacityExceeded` if the enumeration does not fit into `u64`.
    pub fn build_monitored<'e, E, M>(
        self,
        evaluator: &'e mut E,
        monitor: M,
    ) -> Result<Bundles<'a, 'e, S, T, E, M>, InterleaveError>
    where
        E: CostEvaluator<S, T>,
        M: SearchMonitor<E::Cost>,
    {
        let mut space = Interleavings::new(self.fixed, self.flex)?;
        if let Some(range) = self.range {
            space = space.restrict(range);
        }
        let pending = space.pending();

        Ok(Bundles {
            origin: self.origin,
            buffer: Vec::with_capacity(space.sequence_len()),
            space,
            evaluator,
            monitor,
            bundle_size: self.bundle_size,
            index_offset: self.index_offset,
            next: pending.start,
            end: pending.end,
            enumerated: 0,
            evaluated: 0,
            failed: 0,
            stop_reason: None,
        })
    }
}

/// Lazy iterator over the successfully priced orderings of one enumeration.
pub struct Bundles<'a, 'e, S, T, E, M>
where
    S: ?Sized,
{
    origin: &'a S,
    space: Interleavings<'a, T>,
    evaluator: &'e mut E,
    monitor: M,
    buffer: Vec<T>,
    bundle_size: usize,
    index_offset: u64,
    next: u64,
    end: u64,
    enumerated: u64,
    evaluated: u64,
    failed: u64,
    stop_reason: Option<String>,
}

impl<'a, 'e, S, T, E, M> Bundles<'a, 'e, S, T, E, M>
where
    S: ?Sized,
    T: Clone,
    E: CostEvaluator<S, T>,
    M: SearchMonitor<E::Cost>,
{
    /// Orderings decoded so far.
    #[inline]
    pub fn orderings_enumerated(&self) -> u64 {
        self.enumerated
    }

    /// Orderings priced successfully so far.
    #[inline]
    pub fn bundles_evaluated(&self) -> u64 {
        self.evaluated
    }

    /// Orderings dropped so far.
    #[inline]
    pub fn evaluations_failed(&self) -> u64 {
        self.failed
    }

    /// Local indices not yet enumerated.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }

    /// The monitor's reason, if the monitor stopped the enumeration.
    #[inline]
    pub fn stop_reason(&self) -> Option<&str> {
        self.stop_reason.as_deref()
    }

    fn drop_ordering(&mut self, index: u64, error: EvaluationError) {
        self.failed += 1;
        tracing::debug!(
            index,
            evaluator = self.evaluator.name(),
            %error,
            "ordering skipped"
        );
        self.monitor.on_evaluation_failed(index, &error);
    }
}

impl<'a, 'e, S, T, E, M> Iterator for Bundles<'a, 'e, S, T, E, M>
where
    S: ?Sized,
    T: Clone,
    E: CostEvaluator<S, T>,
    M: SearchMonitor<E::Cost>,
{
    type Item = Bundle<T, E::Cost>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stop_reason.is_some() || self.next >= self.end {
                return None;
            }
            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                self.stop_reason = Some(reason);
                return None;
            }

            let local = self.next;
            self.next += 1;
            let index = self.index_offset + local;

            self.space.decode_into(local, &mut self.buffer);
            self.enumerated += 1;
            self.monitor.on_step();

            match self
                .evaluator
                .evaluate(self.origin, &self.buffer, self.bundle_size)
            {
                Ok(cost) if cost.is_admissible() => {
                    self.evaluated += 1;
                    self.monitor.on_bundle_evaluated(index, cost);
                    return Some(Bundle::new(self.buffer.clone(), cost, index));
                }
                Ok(_) => self.drop_ordering(index, EvaluationError::NonFiniteCost),
                Err(error) => self.drop_ordering(index, error),
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stop_reason.is_some() {
            return (0, Some(0));
        }
        (0, usize::try_from(self.end - self.next).ok())
    }
}

impl<'a, 'e, S, T, E, M> std::iter::FusedIterator for Bundles<'a, 'e, S, T, E, M>
where
    S: ?Sized,
    T: Clone,
    E: CostEvaluator<S, T>,
    M: SearchMonitor<E::Cost>,
{
}
