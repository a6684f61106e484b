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


//! # Evaluation Limit Monitor
//!
//! Counts cost evaluations, successful or not, on a shared `AtomicU64` and
//! optionally terminates the search once a global limit is reached. Workers
//! of a parallel search share one counter, so the limit bounds the total
//! number of evaluator calls rather than the calls per thread.
//!
//! ```rust
//! use talker_search::monitor::evaluation_limit::EvaluationLimitMonitor;
//! use talker_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use std::sync::atomic::AtomicU64;
//!
//! let evaluations = AtomicU64::new(0);
//! let mut monitor = EvaluationLimitMonitor::with_limit(&evaluations, 1);
//!
//! SearchMonitor::<f64>::on_bundle_evaluated(&mut monitor, 0, 3.5);
//! assert!(SearchMonitor::<f64>::search_command(&monitor).is_terminate());
//! ```

use crate::{
    eval::EvaluationError,
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchSpace},
};
use std::sync::atomic::{AtomicU64, Ordering};
use talker_core::num::cost::CostValue;

#[derive(Debug)]
pub struct EvaluationLimitMonitor<'a> {
    evaluations: &'a AtomicU64,
    evaluation_limit: Option<u64>,
}

impl<'a> EvaluationLimitMonitor<'a> {
    #[inline]
    pub fn new(evaluations: &'a AtomicU64, evaluation_limit: Option<u64>) -> Self {
        Self {
            evaluations,
            evaluation_limit,
        }
    }

    #[inline]
    pub fn with_limit(evaluations: &'a AtomicU64, limit: u64) -> Self {
        Self::new(evaluations, Some(limit))
    }

    /// Only counts; never terminates.
    #[inline]
    pub fn without_limit(evaluations: &'a AtomicU64) -> Self {
        Self::new(evaluations, None)
    }

    #[inline]
    fn reached_limit(&self) -> bool {
        match self.evaluation_limit {
            Some(limit) => self.evaluations.load(Ordering::Relaxed) >= limit,
            None => false,
        }
    }
}

impl<'a, C> SearchMonitor<C> for EvaluationLimitMonitor<'a>
where
    C: CostValue,
{
    fn name(&self) -> &str {
        "EvaluationLimitMonitor"
    }

    fn on_enter_search(&mut self, _space: &SearchSpace) {}
    fn on_exit_search(&mut self) {}

    fn on_bundle_evaluated(&mut self, _index: u64, _cost: C) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    fn on_evaluation_failed(&mut self, _index: u64, _error: &EvaluationError) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate("global evaluation limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Cost = i64;

    #[test]
    fn test_counts_successes_and_failures() {
        let evaluations = AtomicU64::new(0);
        let mut monitor = EvaluationLimitMonitor::without_limit(&evaluations);

        SearchMonitor::<Cost>::on_bundle_evaluated(&mut monitor, 0, 4);
        SearchMonitor::<Cost>::on_evaluation_failed(&mut monitor, 1, &EvaluationError::NonFiniteCost);
        SearchMonitor::<Cost>::on_bundle_evaluated(&mut monitor, 2, 9);

        assert_eq!(evaluations.load(Ordering::Relaxed), 3);
        assert_eq!(SearchMonitor::<Cost>::search_command(&monitor), SearchCommand::Continue);
    }

    #[test]
    fn test_limit_is_shared_between_monitors() {
        let evaluations = AtomicU64::new(0);
        let mut first = EvaluationLimitMonitor::with_limit(&evaluations, 3);
        let mut second = EvaluationLimitMonitor::with_limit(&evaluations, 3);

        SearchMonitor::<Cost>::on_bundle_evaluated(&mut first, 0, 1);
        SearchMonitor::<Cost>::on_bundle_evaluated(&mut second, 5, 1);
        assert_eq!(SearchMonitor::<Cost>::search_command(&first), SearchCommand::Continue);

        SearchMonitor::<Cost>::on_bundle_evaluated(&mut second, 6, 1);
        for monitor in [&first, &second] {
            match SearchMonitor::<Cost>::search_command(monitor) {
                SearchCommand::Terminate(reason) => {
                    assert_eq!(reason, "global evaluation limit reached")
                }
                other => panic!("expected Terminate, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_limit_terminates_immediately() {
        let evaluations = AtomicU64::new(0);
        let monitor = EvaluationLimitMonitor::with_limit(&evaluations, 0);
        assert!(SearchMonitor::<Cost>::search_command(&monitor).is_terminate());
    }
}
