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


//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on the search. The clock is only read when
//! `(steps & clock_check_mask) == 0`, so the check costs almost nothing per
//! ordering. The default mask `0x3FF` reads the clock every 1,024 orderings,
//! which suits evaluators that plan a path per ordering.
//!
//! ```rust
//! use talker_search::monitor::time_limit::TimeLimitMonitor;
//! use talker_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use std::time::Duration;
//!
//! let mut mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! SearchMonitor::<f64>::on_step(&mut mon);
//! assert_eq!(SearchMonitor::<f64>::search_command(&mon), SearchCommand::Continue);
//! ```

use crate::{
    eval::EvaluationError,
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchSpace},
};
use talker_core::num::cost::CostValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
}

impl TimeLimitMonitor {
    /// Check every 1,024 steps (2^10).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FF;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }

    #[inline]
    pub fn time_limit(&self) -> std::time::Duration {
        self.time_limit
    }
}

impl<C> SearchMonitor<C> for TimeLimitMonitor
where
    C: CostValue,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _space: &SearchSpace) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}
    fn on_bundle_evaluated(&mut self, _index: u64, _cost: C) {}
    fn on_evaluation_failed(&mut self, _index: u64, _error: &EvaluationError) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    type Cost = f64;

    fn command(mon: &TimeLimitMonitor) -> SearchCommand {
        SearchMonitor::<Cost>::search_command(mon)
    }

    #[test]
    fn test_terminates_after_time_limit_when_mask_condition_met() {
        let mut mon = TimeLimitMonitor::new(Duration::from_millis(10));
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 0;

        match command(&mon) {
            SearchCommand::Terminate(msg) => {
                assert!(msg.contains("time limit"), "unexpected message: {msg}");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_continues_when_mask_condition_not_met_even_if_time_exceeded() {
        let mut mon = TimeLimitMonitor::new(Duration::from_millis(1));
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 1;

        assert_eq!(command(&mon), SearchCommand::Continue);
    }

    #[test]
    fn test_mask_zero_always_checks() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_millis(1), 0);
        mon.start_time = Instant::now() - Duration::from_millis(50);
        mon.steps = 12345;

        assert!(command(&mon).is_terminate());
    }

    #[test]
    fn test_enter_search_restarts_the_clock() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_secs(60), 0);
        mon.start_time = Instant::now() - Duration::from_secs(120);
        mon.steps = 17;
        assert!(command(&mon).is_terminate());

        SearchMonitor::<Cost>::on_enter_search(&mut mon, &SearchSpace::new(0, 3, 0, 0..6));
        assert_eq!(mon.steps, 0);
        assert_eq!(command(&mon), SearchCommand::Continue);
    }

    #[test]
    fn test_on_step_increments_steps_wrapping() {
        let mut mon = TimeLimitMonitor::new(Duration::from_secs(1));
        SearchMonitor::<Cost>::on_step(&mut mon);
        assert_eq!(mon.steps, 1);

        mon.steps = u64::MAX;
        SearchMonitor::<Cost>::on_step(&mut mon);
        assert_eq!(mon.steps, 0);
    }

    #[test]
    fn test_mask_condition_triggers_every_2_pow_k_steps() {
        let mut mon = TimeLimitMonitor::with_clock_check_mask(Duration::from_millis(1), 0x3);
        mon.start_time = Instant::now() - Duration::from_millis(50);

        for s in [0u64, 4, 8, 12] {
            mon.steps = s;
            assert!(command(&mon).is_terminate(), "expected Terminate for steps={s}");
        }
        for s in [1u64, 2, 3, 5, 6, 7] {
            mon.steps = s;
            assert_eq!(command(&mon), SearchCommand::Continue, "steps={s}");
        }
    }
}
