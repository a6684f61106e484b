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


//! # Log Monitor
//!
//! Reports search progress through `tracing`. A progress event is emitted at
//! most once per `log_interval`, and the clock is only read when
//! `(steps & clock_check_mask) == 0`. Entering and leaving the search are
//! always logged.

use crate::{
    eval::EvaluationError,
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchSpace},
};
use std::time::{Duration, Instant};
use talker_core::num::cost::CostValue;

#[derive(Debug, Clone)]
pub struct LogMonitor<C> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    evaluated: u64,
    failed: u64,
    orderings: u64,
    best_cost: Option<C>,
}

impl<C> LogMonitor<C>
where
    C: CostValue,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            steps: 0,
            evaluated: 0,
            failed: 0,
            orderings: 0,
            best_cost: None,
        }
    }

    /// Lowest cost observed so far.
    #[inline]
    pub fn best_cost(&self) -> Option<C> {
        self.best_cost
    }

    #[inline]
    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed
    }

    fn log_line(&mut self) {
        let now = Instant::now();
        tracing::info!(
            elapsed = ?now.duration_since(self.start_time),
            progress = %format_args!("{}/{}", self.steps, self.orderings),
            evaluated = self.evaluated,
            failed = self.failed,
            best = %self.best_label(),
            "bundle search progress"
        );
        self.last_log_time = now;
    }

    fn best_label(&self) -> String {
        match self.best_cost {
            Some(cost) => cost.to_string(),
            None => "Inf".to_string(),
        }
    }
}

impl<C> Default for LogMonitor<C>
where
    C: CostValue,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0xFF)
    }
}

impl<C> std::fmt::Display for LogMonitor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {:?}, clock_check_mask: {:#x})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<C> SearchMonitor<C> for LogMonitor<C>
where
    C: CostValue,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, space: &SearchSpace) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.evaluated = 0;
        self.failed = 0;
        self.orderings = space.len();
        self.best_cost = None;
        tracing::info!(
            committed = space.num_committed(),
            new = space.num_new(),
            bundle_size = space.bundle_size(),
            orderings = space.len(),
            "bundle search started"
        );
    }

    fn on_exit_search(&mut self) {
        tracing::info!(
            elapsed = ?self.start_time.elapsed(),
            evaluated = self.evaluated,
            failed = self.failed,
            best = %self.best_label(),
            "bundle search finished"
        );
    }

    fn on_bundle_evaluated(&mut self, _index: u64, cost: C) {
        self.evaluated += 1;
        let improved = match self.best_cost {
            Some(best) => cost.cost_cmp(&best).is_lt(),
            None => true,
        };
        if improved {
            self.best_cost = Some(cost);
        }
    }

    fn on_evaluation_failed(&mut self, index: u64, error: &EvaluationError) {
        self.failed += 1;
        tracing::trace!(index, %error, "ordering dropped");
    }

    #[inline]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if (self.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line();
        }
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
