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


//! # Bundle Solver
//!
//! Orchestrates a complete bundle search over scoped worker threads.
//!
//! ## Highlights
//!
//! - Work split: the global ordering indices of all enumerations laid out by
//!   the `NewTaskPolicy` are cut into `threads` contiguous, disjoint blocks
//!   (`partition_range`). Worker `w` enumerates block `w` only.
//! - Per-worker state: a cloned evaluator, a local `BundleSelector`, and a
//!   `CompositeMonitor` with the interrupt, evaluation-limit, time-limit and
//!   log monitors the builder asked for.
//! - Reduce: the worker selectors are merged into one. Ranking is the total
//!   order `(cost, index)`, so the result does not depend on the number of
//!   threads or on scheduling.
//! - Per-subset selection: with `best_per_subset`, workers keep one
//!   selector of capacity one per enumeration they touch; the reduce merges
//!   those by enumeration first, so a subset split across workers still
//!   contributes a single bundle.
//! - Committed tail: `with_permute_last_committed` releases the end of the
//!   committed route into every enumeration (see `policy::released_tail`).
//! - Budgets: when a monitor terminates a worker, the bundles found so far
//!   are still returned, with `TerminationReason::Aborted`.
//!
//! ## Usage
//!
//! ```rust
//! use talker_search::eval::FnEvaluator;
//! use talker_solver::solver::BundleSolverBuilder;
//!
//! let evaluator = FnEvaluator::new("position_of_x", |_: &(), ordering: &[char], _| {
//!     Ok(ordering.iter().position(|&c| c == 'x').unwrap_or(0) as u32)
//! });
//!
//! let solver = BundleSolverBuilder::new().with_threads(3).build();
//! let outcome = solver.solve(&(), &['a', 'b'], &['x'], 0, 2, &evaluator).unwrap();
//!
//! assert!(outcome.is_exhaustive());
//! assert_eq!(outcome.bundles.best().map(|b| b.ordering().to_vec()), Some(vec!['x', 'a', 'b']));
//! ```

use crate::{
    error::SolveError,
    policy::{NewTaskPolicy, Segment, released_tail},
};
use std::{
    hash::Hash,
    ops::Range,
    sync::atomic::{AtomicBool, AtomicU64},
    time::{Duration, Instant},
};
use talker_bundle::{builder::BundleBuilder, selector::BundleSelector};
use talker_core::num::cost::CostValue;
use talker_interleave::{InterleaveError, interleavings::partition_range};
use talker_search::{
    eval::CostEvaluator,
    monitor::{
        composite::CompositeMonitor,
        evaluation_limit::EvaluationLimitMonitor,
        interrupt::InterruptMonitor,
        log::LogMonitor,
        search_monitor::{SearchMonitor, SearchSpace},
        time_limit::TimeLimitMonitor,
    },
    result::{SearchOutcome, TerminationReason},
    stats::{SearchStatistics, SearchStatisticsBuilder},
};

#[derive(Debug, Clone)]
pub struct BundleSolver<'a> {
    threads: usize,
    time_limit: Option<Duration>,
    evaluation_limit: Option<u64>,
    log_interval: Option<Duration>,
    policy: NewTaskPolicy,
    permute_last_committed: usize,
    interrupt: Option<&'a AtomicBool>,
}

/// Shared, read-only view of one search handed to every worker.
struct SearchContext<'s, S: ?Sized, T> {
    origin: &'s S,
    fixed: &'s [T],
    segments: &'s [Segment<T>],
    num_new: usize,
    bundle_size: usize,
    max_bundles: usize,
    best_per_segment: bool,
    evaluations: &'s AtomicU64,
}

/// What a worker hands back to the reduce step.
struct WorkerResult<T, C> {
    selector: BundleSelector<T, C>,
    segment_best: Vec<(usize, BundleSelector<T, C>)>,
    statistics: SearchStatistics,
    stop_reason: Option<String>,
}

impl<'a> BundleSolver<'a> {
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    #[inline]
    pub fn evaluation_limit(&self) -> Option<u64> {
        self.evaluation_limit
    }

    #[inline]
    pub fn has_evaluation_limit(&self) -> bool {
        self.evaluation_limit.is_some()
    }

    #[inline]
    pub fn new_task_policy(&self) -> NewTaskPolicy {
        self.policy
    }

    #[inline]
    pub fn permute_last_committed(&self) -> usize {
        self.permute_last_committed
    }

    /// Searches the orderings of `fixed` merged with `flex` (as selected by the
    /// new-task policy) and returns the `max_bundles` cheapest distinct bundles.
    ///
    /// `origin` and `bundle_size` are handed to the evaluator unchanged. The
    /// released tail of `fixed` (see `with_permute_last_committed`) is treated
    /// like a new task that every enumeration includes.
    ///
    /// # Errors
    ///
    /// - `SolveError::Interleave` if the ordering space does not fit into `u64`.
    ///   Nothing is evaluated in that case.
    /// - `SolveError::WorkerPanicked` if a worker thread panicked.
    pub fn solve<S, T, E>(
        &self,
        origin: &S,
        fixed: &[T],
        flex: &[T],
        bundle_size: usize,
        max_bundles: usize,
        evaluator: &E,
    ) -> Result<SearchOutcome<T, E::Cost>, SolveError>
    where
        S: ?Sized + Sync,
        T: Clone + Eq + Hash + Send + Sync,
        E: CostEvaluator<S, T> + Clone + Send,
    {
        let start_time = Instant::now();

        let tail = released_tail(self.permute_last_committed, fixed.len());
        let (fixed, released) = fixed.split_at(fixed.len() - tail);
        let segments = self.policy.segments(fixed.len(), released, flex)?;
        let total = segments.last().map_or(0, |s| s.offset + s.len);
        let blocks = partition_range(0..total, self.threads);

        tracing::info!(
            evaluator = evaluator.name(),
            committed = fixed.len(),
            released = released.len(),
            new = flex.len(),
            policy = %self.policy,
            orderings = total,
            workers = blocks.len(),
            max_bundles,
            "starting bundle search"
        );

        let evaluations = AtomicU64::new(0);
        let context = SearchContext {
            origin,
            fixed,
            segments: &segments,
            num_new: flex.len(),
            bundle_size,
            max_bundles,
            best_per_segment: self.policy.best_per_subset(),
            evaluations: &evaluations,
        };

        let results = self.run_workers(&context, blocks, evaluator)?;
        let outcome = Self::construct_outcome(start_time, &context, results);

        if outcome.statistics.bundles_evaluated == 0 && outcome.statistics.orderings_enumerated > 0 {
            tracing::warn!(
                evaluator = evaluator.name(),
                failed = outcome.statistics.evaluations_failed,
                "every evaluated ordering failed; no bundles to offer"
            );
        }
        tracing::info!(
            reason = %outcome.reason,
            bundles = outcome.bundles.len(),
            evaluated = outcome.statistics.bundles_evaluated,
            failed = outcome.statistics.evaluations_failed,
            duration = ?outcome.statistics.duration,
            "bundle search finished"
        );

        Ok(outcome)
    }

    fn run_workers<S, T, E>(
        &self,
        context: &SearchContext<'_, S, T>,
        blocks: Vec<Range<u64>>,
        evaluator: &E,
    ) -> Result<Vec<WorkerResult<T, E::Cost>>, SolveError>
    where
        S: ?Sized + Sync,
        T: Clone + Eq + Hash + Send + Sync,
        E: CostEvaluator<S, T> + Clone + Send,
    {
        std::thread::scope(|scope| {
            let handles: Vec<_> = blocks
                .into_iter()
                .enumerate()
                .map(|(worker, block)| {
                    let evaluator = evaluator.clone();
                    scope.spawn(move || {
                        let _span = tracing::debug_span!("bundle_worker", worker).entered();
                        self.run_worker(context, block, evaluator)
                    })
                })
                .collect();

            // Join every worker before reporting, so no panicked thread is left to the scope.
            let joined: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
            joined
                .into_iter()
                .enumerate()
                .map(|(worker, joined)| match joined {
                    Ok(result) => result.map_err(SolveError::from),
                    Err(_) => {
                        tracing::error!(worker, "bundle worker panicked");
                        Err(SolveError::WorkerPanicked { worker })
                    }
                })
                .collect()
        })
    }

    fn build_monitor<'m, C>(&self, evaluations: &'m AtomicU64) -> CompositeMonitor<'m, C>
    where
        C: CostValue + 'm,
        'a: 'm,
    {
        let mut monitor = CompositeMonitor::with_capacity(4);
        if let Some(flag) = self.interrupt {
            monitor.add_monitor(InterruptMonitor::new(flag));
        }
        monitor.add_monitor(EvaluationLimitMonitor::new(evaluations, self.evaluation_limit));
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(interval) = self.log_interval {
            monitor.add_monitor(LogMonitor::<C>::new(interval, 0xFF));
        }
        monitor
    }

    fn run_worker<S, T, E>(
        &self,
        context: &SearchContext<'_, S, T>,
        block: Range<u64>,
        mut evaluator: E,
    ) -> Result<WorkerResult<T, E::Cost>, InterleaveError>
    where
        S: ?Sized,
        T: Clone + Eq + Hash,
        E: CostEvaluator<S, T>,
    {
        let start_time = Instant::now();
        let mut monitor = self.build_monitor::<E::Cost>(context.evaluations);
        let mut selector = BundleSelector::new(context.max_bundles);
        let mut segment_best = Vec::new();
        let mut statistics = SearchStatisticsBuilder::new();
        let (mut enumerated, mut evaluated, mut failed) = (0, 0, 0);
        let mut stop_reason = None;

        monitor.on_enter_search(&SearchSpace::new(
            context.fixed.len(),
            context.num_new,
            context.bundle_size,
            block.clone(),
        ));

        for (segment_index, segment) in context.segments.iter().enumerate() {
            let Some(local) = segment.local_range(&block) else {
                continue;
            };

            let mut bundles =
                BundleBuilder::new(context.origin, context.fixed, &segment.flex, context.bundle_size)
                    .with_range(local)
                    .with_index_offset(segment.offset)
                    .build_monitored(&mut evaluator, &mut monitor)?;
            if context.best_per_segment {
                let mut best = BundleSelector::new(1);
                best.extend(bundles.by_ref());
                segment_best.push((segment_index, best));
            } else {
                selector.extend(bundles.by_ref());
            }

            enumerated += bundles.orderings_enumerated();
            evaluated += bundles.bundles_evaluated();
            failed += bundles.evaluations_failed();
            if let Some(reason) = bundles.stop_reason() {
                stop_reason = Some(reason.to_string());
                break;
            }
        }

        monitor.on_exit_search();
        if let Some(reason) = &stop_reason {
            tracing::debug!(reason = reason.as_str(), enumerated, "worker stopped early");
        }

        statistics = statistics
            .orderings_enumerated(enumerated)
            .bundles_evaluated(evaluated)
            .evaluations_failed(failed)
            .duplicates_discarded(selector.duplicates_discarded())
            .duration(start_time.elapsed());

        Ok(WorkerResult {
            selector,
            segment_best,
            statistics: statistics.build(),
            stop_reason,
        })
    }

    fn construct_outcome<S, T, C>(
        start_time: Instant,
        context: &SearchContext<'_, S, T>,
        results: Vec<WorkerResult<T, C>>,
    ) -> SearchOutcome<T, C>
    where
        S: ?Sized,
        T: Clone + Eq + Hash,
        C: CostValue,
    {
        let used_threads = results.len();
        let mut selector = BundleSelector::new(context.max_bundles);
        let mut per_segment: Vec<BundleSelector<T, C>> = if context.best_per_segment {
            (0..context.segments.len()).map(|_| BundleSelector::new(1)).collect()
        } else {
            Vec::new()
        };
        let mut statistics: Option<SearchStatistics> = None;
        let mut reason = TerminationReason::Exhausted;

        for result in results {
            selector.merge(result.selector);
            for (segment_index, best) in result.segment_best {
                per_segment[segment_index].merge(best);
            }
            statistics = Some(match statistics {
                Some(acc) => acc.combine(&result.statistics),
                None => result.statistics,
            });

            // The first worker in block order names the reason.
            if let Some(stop) = result.stop_reason {
                if matches!(reason, TerminationReason::Exhausted) {
                    reason = TerminationReason::Aborted(stop);
                }
            }
        }

        let mut segment_duplicates = 0;
        for best in per_segment {
            segment_duplicates += best.duplicates_discarded();
            selector.extend(best.into_bundle_set().into_vec());
        }

        let mut statistics = statistics.unwrap_or_default();
        statistics.used_threads = used_threads;
        statistics.duplicates_discarded = selector.duplicates_discarded() + segment_duplicates;
        statistics.duration = start_time.elapsed();

        SearchOutcome::new(selector.into_bundle_set(), reason, statistics)
    }
}

pub struct BundleSolverBuilder<'a> {
    threads: usize,
    time_limit: Option<Duration>,
    evaluation_limit: Option<u64>,
    log_interval: Option<Duration>,
    policy: NewTaskPolicy,
    permute_last_committed: usize,
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> Default for BundleSolverBuilder<'a> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BundleSolverBuilder<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            threads: 1,
            time_limit: None,
            evaluation_limit: None,
            log_interval: None,
            policy: NewTaskPolicy::All,
            permute_last_committed: 0,
            interrupt: None,
        }
    }

    /// Number of worker threads. `0` uses the available parallelism.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Caps the number of evaluator calls, successful or not, across all workers.
    #[inline]
    pub fn with_evaluation_limit(mut self, limit: u64) -> Self {
        self.evaluation_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_new_task_policy(mut self, policy: NewTaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Releases the last committed task for reordering with the new tasks.
    /// Any value above one releases the whole committed route; `0` keeps it fixed.
    #[inline]
    pub fn with_permute_last_committed(mut self, count: usize) -> Self {
        self.permute_last_committed = count;
        self
    }

    /// Emits a progress event per worker at most once per `interval`.
    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    /// Stops every worker once `flag` is raised.
    #[inline]
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[inline]
    pub fn build(self) -> BundleSolver<'a> {
        let threads = match self.threads {
            0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        };
        BundleSolver {
            threads,
            time_limit: self.time_limit,
            evaluation_limit: self.evaluation_limit,
            log_interval: self.log_interval,
            policy: self.policy,
            permute_last_committed: self.permute_last_committed,
            interrupt: self.interrupt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use talker_model::{
        board::TaskBoard, bundle::BundleSet, index::TaskRef, pose::Pose2d, task::Task,
    };
    use talker_search::eval::{EvaluationError, FnEvaluator, StraightLineEvaluator};

    fn scattered_tasks(count: usize, seed: u64) -> Vec<Task> {
        // Deterministic, well spread points without pulling in an RNG.
        (0..count as u64)
            .map(|i| {
                let h = (i + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ seed;
                let x = (h % 97) as f64 / 7.0;
                let y = ((h >> 16) % 89) as f64 / 5.0;
                Task::at(x, y, 0.0)
            })
            .collect()
    }

    fn solve_board(
        solver: &BundleSolver<'_>,
        committed: &[Task],
        new_tasks: &[Task],
        max_bundles: usize,
    ) -> SearchOutcome<TaskRef, f64> {
        let board = TaskBoard::new(Pose2d::new(0.5, 0.5, 0.0), committed, new_tasks);
        let fixed = board.committed_refs();
        let flex = board.new_refs();
        solver
            .solve(&board, &fixed, &flex, 0, max_bundles, &StraightLineEvaluator::new())
            .unwrap()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let committed = scattered_tasks(3, 11);
        let new_tasks = scattered_tasks(3, 29);

        let sequential = solve_board(&BundleSolverBuilder::new().build(), &committed, &new_tasks, 7);
        for threads in [2, 3, 5, 16] {
            let solver = BundleSolverBuilder::new().with_threads(threads).build();
            let parallel = solve_board(&solver, &committed, &new_tasks, 7);
            assert_eq!(parallel.bundles, sequential.bundles, "threads = {threads}");
            assert_eq!(parallel.statistics.used_threads, threads);
        }
    }

    #[test]
    fn test_exhaustive_search_statistics() {
        let committed = scattered_tasks(2, 3);
        let new_tasks = scattered_tasks(3, 5);
        let solver = BundleSolverBuilder::new().with_threads(4).build();
        let outcome = solve_board(&solver, &committed, &new_tasks, 5);

        assert!(outcome.is_exhaustive());
        assert_eq!(outcome.bundles.len(), 5);
        assert_eq!(outcome.statistics.orderings_enumerated, 60);
        assert_eq!(outcome.statistics.bundles_evaluated, 60);
        assert_eq!(outcome.statistics.evaluations_failed, 0);
        assert_eq!(outcome.statistics.duplicates_discarded, 0);

        let costs: Vec<f64> = outcome.bundles.iter().map(|b| b.cost()).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]), "costs not ascending: {costs:?}");
    }

    #[test]
    fn test_more_threads_than_orderings() {
        let committed = scattered_tasks(1, 3);
        let new_tasks = scattered_tasks(1, 5);
        let solver = BundleSolverBuilder::new().with_threads(8).build();
        let outcome = solve_board(&solver, &committed, &new_tasks, 10);

        assert_eq!(outcome.statistics.used_threads, 2);
        assert_eq!(outcome.bundles.len(), 2);
    }

    #[test]
    fn test_committed_only_search_keeps_committed_order() {
        let committed = scattered_tasks(3, 1);
        let outcome = solve_board(&BundleSolverBuilder::new().build(), &committed, &[], 3);

        assert_eq!(outcome.bundles.len(), 1);
        let best = outcome.bundles.best().unwrap();
        assert_eq!(
            best.ordering(),
            [TaskRef::committed(0), TaskRef::committed(1), TaskRef::committed(2)]
        );
    }

    #[test]
    fn test_subset_policy_enumerates_every_subset() {
        let committed = scattered_tasks(2, 7);
        let new_tasks = scattered_tasks(3, 13);
        let policy = NewTaskPolicy::Subsets {
            max_size: 2,
            best_per_subset: false,
        };

        let sequential = BundleSolverBuilder::new().with_new_task_policy(policy).build();
        let parallel = BundleSolverBuilder::new()
            .with_new_task_policy(policy)
            .with_threads(4)
            .build();

        let a = solve_board(&sequential, &committed, &new_tasks, 100);
        let b = solve_board(&parallel, &committed, &new_tasks, 100);

        assert_eq!(a.statistics.orderings_enumerated, 45);
        assert_eq!(a.bundles.len(), 45);
        assert_eq!(a.bundles, b.bundles);

        let lengths: std::collections::BTreeSet<usize> = a.bundles.iter().map(|b| b.len()).collect();
        assert_eq!(lengths.into_iter().collect::<Vec<_>>(), vec![3, 4]);

        let mut indices: Vec<u64> = a.bundles.iter().map(|b| b.index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..45).collect::<Vec<_>>());
    }

    #[test]
    fn test_best_per_subset_keeps_one_bundle_per_subset() {
        let committed = scattered_tasks(2, 7);
        let new_tasks = scattered_tasks(3, 13);
        let policy = NewTaskPolicy::Subsets {
            max_size: 2,
            best_per_subset: true,
        };

        let sequential = BundleSolverBuilder::new().with_new_task_policy(policy).build();
        let outcome = solve_board(&sequential, &committed, &new_tasks, 100);

        assert_eq!(outcome.statistics.orderings_enumerated, 45);
        assert_eq!(outcome.bundles.len(), 6);

        let mut chosen: Vec<Vec<TaskRef>> = outcome
            .bundles
            .iter()
            .map(|b| {
                let mut new: Vec<TaskRef> = b.ordering().iter().copied().filter(|r| r.is_new()).collect();
                new.sort_unstable();
                new
            })
            .collect();
        chosen.sort_unstable();
        chosen.dedup();
        assert_eq!(chosen.len(), 6, "every subset contributes exactly once");

        // Each kept bundle is the cheapest ordering of its own subset.
        let board = TaskBoard::new(Pose2d::new(0.5, 0.5, 0.0), &committed, &new_tasks);
        let fixed = board.committed_refs();
        let all = BundleSolverBuilder::new().build();
        for bundle in outcome.bundles.iter() {
            let subset: Vec<TaskRef> = bundle.ordering().iter().copied().filter(|r| r.is_new()).collect();
            let alone = all
                .solve(&board, &fixed, &subset, 0, 1, &StraightLineEvaluator::new())
                .unwrap();
            assert_eq!(alone.bundles.best().map(|b| b.cost()), Some(bundle.cost()));
        }

        // Subsets straddling worker blocks still yield one bundle each.
        for threads in [2, 4, 7] {
            let parallel = BundleSolverBuilder::new()
                .with_new_task_policy(policy)
                .with_threads(threads)
                .build();
            assert_eq!(
                solve_board(&parallel, &committed, &new_tasks, 100).bundles,
                outcome.bundles,
                "threads = {threads}"
            );
        }
    }

    #[test]
    fn test_permuting_the_last_committed_task() {
        // Cheapest when `c` comes first.
        let evaluator = FnEvaluator::new("position_of_c", |_: &(), ordering: &[char], _| {
            Ok(ordering.iter().position(|&t| t == 'c').map_or(0, |p| p as u32))
        });
        let solver = BundleSolverBuilder::new()
            .with_permute_last_committed(1)
            .with_threads(2)
            .build();
        let outcome = solver.solve(&(), &['a', 'b', 'c'], &['x'], 0, 20, &evaluator).unwrap();

        // `a` and `b` stay fixed, `x` and `c` move: 4!/2! = 12.
        assert_eq!(outcome.statistics.orderings_enumerated, 12);
        assert_eq!(outcome.bundles.len(), 12);
        assert_eq!(outcome.bundles.best().map(|b| b.ordering()[0]), Some('c'));
        assert!(outcome.bundles.iter().any(|b| {
            let ordering = b.ordering();
            let c = ordering.iter().position(|&t| t == 'c');
            let x = ordering.iter().position(|&t| t == 'x');
            c < x
        }));
        for bundle in outcome.bundles.iter() {
            let ordering = bundle.ordering();
            let a = ordering.iter().position(|&t| t == 'a');
            let b = ordering.iter().position(|&t| t == 'b');
            assert!(a < b, "fixed prefix reordered in {ordering:?}");
        }

        // Releasing more than one task frees the whole route: 4! orderings.
        let everything = BundleSolverBuilder::new().with_permute_last_committed(2).build();
        let outcome = everything.solve(&(), &['a', 'b', 'c'], &['x'], 0, 30, &evaluator).unwrap();
        assert_eq!(outcome.statistics.orderings_enumerated, 24);
        assert!(outcome.bundles.iter().any(|b| b.ordering()[0] == 'b'));
    }

    #[test]
    fn test_panicking_evaluator_is_reported() {
        let evaluator = FnEvaluator::new("panics", |_: &(), _: &[char], _| -> Result<u32, EvaluationError> {
            panic!("evaluator failure")
        });
        let solver = BundleSolverBuilder::new().with_threads(2).build();
        let result = solver.solve(&(), &['a', 'b'], &['x', 'y'], 0, 5, &evaluator);

        assert_eq!(result.err(), Some(SolveError::WorkerPanicked { worker: 0 }));
    }

    #[test]
    fn test_failed_evaluations_are_skipped_and_counted() {
        let evaluator = FnEvaluator::new("reject_x_first", |_: &(), ordering: &[char], _| {
            if ordering.first() == Some(&'x') {
                Err(EvaluationError::Rejected("x cannot go first".into()))
            } else {
                Ok(ordering.iter().position(|&c| c == 'x').map_or(0, |p| p as u32))
            }
        });

        let solver = BundleSolverBuilder::new().with_threads(2).build();
        let outcome = solver.solve(&(), &['a', 'b'], &['x', 'y'], 0, 20, &evaluator).unwrap();

        // 12 orderings, 3 of them start with `x`.
        assert_eq!(outcome.statistics.orderings_enumerated, 12);
        assert_eq!(outcome.statistics.evaluations_failed, 3);
        assert_eq!(outcome.bundles.len(), 9);
        assert!(outcome.bundles.iter().all(|b| b.ordering()[0] != 'x'));
        assert!(outcome.is_exhaustive());
    }

    #[test]
    fn test_every_evaluation_failing_is_not_an_error() {
        let evaluator = FnEvaluator::new("always_fails", |_: &(), _: &[char], _| {
            Err::<f64, _>(EvaluationError::Timeout(Duration::from_secs(10)))
        });
        let solver = BundleSolverBuilder::new().with_threads(3).build();
        let outcome = solver.solve(&(), &['a'], &['x', 'y'], 0, 5, &evaluator).unwrap();

        assert!(outcome.is_exhaustive());
        assert_eq!(outcome.bundles, BundleSet::default());
        assert_eq!(outcome.statistics.evaluations_failed, 6);
    }

    #[test]
    fn test_zero_max_bundles_yields_empty_set() {
        let committed = scattered_tasks(2, 3);
        let new_tasks = scattered_tasks(2, 5);
        let outcome = solve_board(&BundleSolverBuilder::new().with_threads(2).build(), &committed, &new_tasks, 0);

        assert!(outcome.bundles.is_empty());
        assert_eq!(outcome.statistics.orderings_enumerated, 12);
    }

    #[test]
    fn test_capacity_exceeded_fails_before_evaluating() {
        let evaluator = FnEvaluator::new("never_called", |_: &(), _: &[u8], _| -> Result<u8, EvaluationError> {
            panic!("evaluator must not run")
        });
        let flex: Vec<u8> = (0..21).collect();
        let result = BundleSolverBuilder::new().build().solve(&(), &[], &flex, 0, 3, &evaluator);

        assert_eq!(
            result.err(),
            Some(SolveError::Interleave(InterleaveError::CapacityExceeded {
                committed: 0,
                new: 21
            }))
        );
    }

    #[test]
    fn test_interrupt_aborts_search() {
        let flag = AtomicBool::new(true);
        let committed = scattered_tasks(2, 3);
        let new_tasks = scattered_tasks(2, 5);
        let solver = BundleSolverBuilder::new()
            .with_threads(2)
            .with_interrupt(&flag)
            .build();
        let outcome = solve_board(&solver, &committed, &new_tasks, 5);

        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("interrupt signal received".to_string())
        );
        assert!(outcome.bundles.is_empty());
        assert_eq!(outcome.statistics.orderings_enumerated, 0);

        flag.store(false, Ordering::Relaxed);
        assert!(solve_board(&solver, &committed, &new_tasks, 5).is_exhaustive());
    }

    #[test]
    fn test_zero_time_limit_aborts_immediately() {
        let committed = scattered_tasks(2, 3);
        let new_tasks = scattered_tasks(2, 5);
        let solver = BundleSolverBuilder::new()
            .with_time_limit(Duration::ZERO)
            .build();
        let outcome = solve_board(&solver, &committed, &new_tasks, 5);

        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("time limit reached".to_string())
        );
        assert!(!outcome.has_bundles());
    }

    #[test]
    fn test_evaluation_limit_keeps_best_so_far() {
        let committed = scattered_tasks(2, 3);
        let new_tasks = scattered_tasks(3, 5);
        let solver = BundleSolverBuilder::new()
            .with_evaluation_limit(10)
            .with_log_interval(Duration::from_millis(1))
            .build();
        let outcome = solve_board(&solver, &committed, &new_tasks, 3);

        assert!(outcome.is_aborted());
        assert_eq!(outcome.statistics.bundles_evaluated, 10);
        assert_eq!(outcome.bundles.len(), 3);
        assert!(outcome.bundles.iter().all(|b| b.index() < 10));
    }

    #[test]
    fn test_builder_defaults() {
        let solver = BundleSolverBuilder::default().build();
        assert_eq!(solver.threads(), 1);
        assert!(!solver.has_time_limit());
        assert!(!solver.has_evaluation_limit());
        assert_eq!(solver.new_task_policy(), NewTaskPolicy::All);
        assert_eq!(solver.permute_last_committed(), 0);
        assert!(BundleSolverBuilder::new().with_threads(0).build().threads() >= 1);
    }
}
