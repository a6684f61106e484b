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


//! # Cost Evaluation
//!
//! The cost of an ordering is computed outside the bundling core, typically
//! by a path planner. `CostEvaluator` is the seam: it receives the search
//! origin (for task bundling, the `TaskBoard` holding the start pose and the
//! tasks), one enumerated ordering, and the caller's `bundle_size`, and
//! returns a cost or an `EvaluationError`. A failed evaluation only drops
//! that ordering; the search continues.
//!
//! Evaluators take `&mut self` so they can keep scratch buffers or planner
//! handles. Parallel searches clone one evaluator per worker.

use talker_core::num::cost::CostValue;
use talker_model::{board::TaskBoard, index::TaskRef};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// No path exists through the ordering.
    #[error("ordering is unreachable: {0}")]
    Unreachable(String),
    /// The evaluator refused the ordering, e.g. because it is infeasible.
    #[error("ordering rejected: {0}")]
    Rejected(String),
    /// The evaluator produced a cost that cannot be ranked (NaN or infinite).
    #[error("evaluator produced a non-finite cost")]
    NonFiniteCost,
    /// The evaluator gave up waiting for an answer.
    #[error("evaluation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

pub trait CostEvaluator<S, T>
where
    S: ?Sized,
{
    type Cost: CostValue;

    fn name(&self) -> &str;

    fn evaluate(
        &mut self,
        origin: &S,
        ordering: &[T],
        bundle_size: usize,
    ) -> Result<Self::Cost, EvaluationError>;
}

/// Adapts a closure `FnMut(&S, &[T], usize) -> Result<C, EvaluationError>` into a `CostEvaluator`.
///
/// ```rust
/// use talker_search::eval::{CostEvaluator, FnEvaluator};
///
/// let mut by_length = FnEvaluator::new("by_length", |_: &(), ordering: &[u32], _| Ok(ordering.len() as u64));
/// assert_eq!(by_length.evaluate(&(), &[1, 2, 3], 0), Ok(3));
/// ```
#[derive(Clone)]
pub struct FnEvaluator<F> {
    name: &'static str,
    f: F,
}

impl<F> FnEvaluator<F> {
    #[inline]
    pub fn new<S, T, C>(name: &'static str, f: F) -> Self
    where
        S: ?Sized,
        C: CostValue,
        F: FnMut(&S, &[T], usize) -> Result<C, EvaluationError>,
    {
        Self { name, f }
    }
}

impl<F> std::fmt::Debug for FnEvaluator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnEvaluator({})", self.name)
    }
}

impl<S, T, C, F> CostEvaluator<S, T> for FnEvaluator<F>
where
    S: ?Sized,
    C: CostValue,
    F: FnMut(&S, &[T], usize) -> Result<C, EvaluationError>,
{
    type Cost = C;

    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn evaluate(&mut self, origin: &S, ordering: &[T], bundle_size: usize) -> Result<C, EvaluationError> {
        (self.f)(origin, ordering, bundle_size)
    }
}

/// Prices an ordering by the straight-line distance travelled from the start
/// pose through the targets in order.
///
/// This is a stand-in for a planner-backed path cost: it never plans around
/// obstacles. When `bundle_size` is non-zero only the leading `bundle_size`
/// tasks of the ordering are travelled; `0` travels the whole ordering.
/// With a range limit, orderings whose travelled distance exceeds the limit
/// are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StraightLineEvaluator {
    range_limit: Option<f64>,
}

impl StraightLineEvaluator {
    #[inline]
    pub fn new() -> Self {
        Self { range_limit: None }
    }

    /// Rejects orderings longer than `range_limit` metres.
    #[inline]
    pub fn with_range_limit(range_limit: f64) -> Self {
        Self {
            range_limit: Some(range_limit),
        }
    }

    #[inline]
    pub fn range_limit(&self) -> Option<f64> {
        self.range_limit
    }
}

impl<'a, M> CostEvaluator<TaskBoard<'a, M>, TaskRef> for StraightLineEvaluator {
    type Cost = f64;

    fn name(&self) -> &str {
        "StraightLineEvaluator"
    }

    fn evaluate(
        &mut self,
        board: &TaskBoard<'a, M>,
        ordering: &[TaskRef],
        bundle_size: usize,
    ) -> Result<f64, EvaluationError> {
        let counted = match bundle_size {
            0 => ordering.len(),
            size => size.min(ordering.len()),
        };

        let mut position = *board.start();
        let mut length = 0.0;
        for &task in &ordering[..counted] {
            let target = board
                .get(task)
                .ok_or_else(|| EvaluationError::Rejected(format!("{task} is not on the board")))?;
            length += position.distance_to(target.pose());
            position = *target.pose();
        }

        if !length.is_finite() {
            return Err(EvaluationError::NonFiniteCost);
        }
        match self.range_limit {
            Some(limit) if length > limit => Err(EvaluationError::Unreachable(format!(
                "path length {length:.3} exceeds range limit {limit:.3}"
            ))),
            _ => Ok(length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talker_model::{pose::Pose2d, task::Task};

    fn line_board_tasks() -> (Vec<Task>, Vec<Task>) {
        (
            vec![Task::at(3.0, 0.0, 0.0), Task::at(6.0, 0.0, 0.0)],
            vec![Task::at(0.0, 4.0, 0.0)],
        )
    }

    #[test]
    fn test_straight_line_sums_leg_lengths() {
        let (committed, new_tasks) = line_board_tasks();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);
        let mut eval = StraightLineEvaluator::new();

        let ordering = [
            TaskRef::new_task(0),
            TaskRef::committed(0),
            TaskRef::committed(1),
        ];
        // 4 (up) + 5 (diagonal) + 3 (along x)
        assert_eq!(eval.evaluate(&board, &ordering, 0), Ok(12.0));
    }

    #[test]
    fn test_bundle_size_counts_only_leading_tasks() {
        let (committed, new_tasks) = line_board_tasks();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);
        let mut eval = StraightLineEvaluator::new();

        let ordering = [
            TaskRef::committed(0),
            TaskRef::committed(1),
            TaskRef::new_task(0),
        ];
        assert_eq!(eval.evaluate(&board, &ordering, 1), Ok(3.0));
        assert_eq!(eval.evaluate(&board, &ordering, 2), Ok(6.0));
        // Larger than the ordering: everything counts.
        assert_eq!(eval.evaluate(&board, &ordering, 10), eval.evaluate(&board, &ordering, 0));
    }

    #[test]
    fn test_range_limit_rejects_long_paths() {
        let (committed, new_tasks) = line_board_tasks();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);
        let mut eval = StraightLineEvaluator::with_range_limit(5.0);

        assert_eq!(eval.evaluate(&board, &[TaskRef::committed(0)], 0), Ok(3.0));
        let err = eval
            .evaluate(&board, &[TaskRef::committed(0), TaskRef::committed(1)], 0)
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Unreachable(_)), "got {err:?}");
    }

    #[test]
    fn test_foreign_refs_are_rejected() {
        let (committed, new_tasks) = line_board_tasks();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);
        let mut eval = StraightLineEvaluator::new();

        let err = eval.evaluate(&board, &[TaskRef::new_task(7)], 0).unwrap_err();
        assert_eq!(err, EvaluationError::Rejected("N7 is not on the board".to_string()));
    }

    #[test]
    fn test_empty_ordering_costs_nothing() {
        let board = TaskBoard::<()>::new(Pose2d::new(1.0, 1.0, 0.0), &[], &[]);
        assert_eq!(StraightLineEvaluator::new().evaluate(&board, &[], 0), Ok(0.0));
    }

    #[test]
    fn test_fn_evaluator_forwards_arguments() {
        let mut eval = FnEvaluator::new("sum", |offset: &i64, ordering: &[i64], bundle_size: usize| {
            if bundle_size == 0 {
                return Err(EvaluationError::Rejected("empty bundle".into()));
            }
            Ok(offset + ordering.iter().sum::<i64>())
        });

        assert_eq!(eval.evaluate(&10, &[1, 2, 3], 1), Ok(16));
        assert!(eval.evaluate(&10, &[1], 0).is_err());
        assert_eq!(CostEvaluator::<i64, i64>::name(&eval), "sum");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EvaluationError::NonFiniteCost.to_string(),
            "evaluator produced a non-finite cost"
        );
        assert!(
            EvaluationError::Timeout(std::time::Duration::from_secs(10))
                .to_string()
                .contains("10s")
        );
    }
}
