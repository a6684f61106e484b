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


//! # Bundle Service
//!
//! The request/response boundary of a robot's bundling step: a
//! `BundleRequest` names the robot's start pose, its committed route and the
//! tasks on offer; the response lists the cheapest bundles with their tasks
//! resolved, echoing the request's correlation ids so the caller can match
//! answers to requests.

use crate::{error::SolveError, solver::BundleSolver};
use talker_model::{
    board::TaskBoard,
    index::TaskRef,
    request::{BundleRequest, BundleResponse},
};
use talker_search::eval::CostEvaluator;

/// Answers `request` by searching its orderings with `solver`, pricing them with `evaluator`.
///
/// # Errors
///
/// Returns `SolveError` if the search cannot run; see `BundleSolver::solve`.
pub fn respond<'r, M, E>(
    request: &'r BundleRequest<M>,
    evaluator: &E,
    solver: &BundleSolver<'_>,
) -> Result<BundleResponse<M, E::Cost>, SolveError>
where
    M: Clone + Sync,
    E: CostEvaluator<TaskBoard<'r, M>, TaskRef> + Clone + Send,
{
    let board = request.board();
    let fixed = board.committed_refs();
    let flex = board.new_refs();

    let _span = tracing::info_span!(
        "bundle_request",
        sender = request.sender_id.as_str(),
        request = request.request_id.as_str()
    )
    .entered();

    let outcome = solver.solve(
        &board,
        &fixed,
        &flex,
        request.bundle_size as usize,
        request.max_bundles as usize,
        evaluator,
    )?;

    if outcome.is_aborted() {
        tracing::warn!(reason = %outcome.reason, bundles = outcome.bundles.len(), "answering with a partial search");
    }

    Ok(BundleResponse::from_bundle_set(request, &outcome.bundles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{policy::NewTaskPolicy, solver::BundleSolverBuilder};
    use talker_model::{pose::Pose2d, task::Task};
    use talker_search::eval::StraightLineEvaluator;

    fn request(max_bundles: u32, bundle_size: u32) -> BundleRequest<&'static str> {
        BundleRequest {
            start: Pose2d::default(),
            committed_tasks: vec![
                Task::new(Pose2d::new(2.0, 0.0, 0.0), "deliver"),
                Task::new(Pose2d::new(4.0, 0.0, 0.0), "dock"),
            ],
            new_tasks: vec![
                Task::new(Pose2d::new(1.0, 0.0, 0.0), "pick"),
                Task::new(Pose2d::new(3.0, 0.0, 0.0), "scan"),
            ],
            max_bundles,
            bundle_size,
            sender_id: "robot_2".to_string(),
            request_id: "42".to_string(),
        }
    }

    fn labels(tasks: &[Task<&'static str>]) -> Vec<&'static str> {
        tasks.iter().map(|t| *t.metadata()).collect()
    }

    #[test]
    fn test_response_echoes_ids_and_ranks_bundles() {
        let request = request(3, 0);
        let solver = BundleSolverBuilder::new().with_threads(2).build();
        let response = respond(&request, &StraightLineEvaluator::new(), &solver).unwrap();

        assert!(response.answers(&request));
        assert_eq!(response.sender_id, "robot_2");
        assert_eq!(response.request_id, "42");
        assert_eq!(response.bundles.len(), 3);
        assert_eq!(labels(&response.bundles[0].tasks), vec!["pick", "deliver", "scan", "dock"]);
        assert_eq!(response.bundles[0].cost, 4.0);
        assert!(response.bundles.windows(2).all(|w| w[0].cost <= w[1].cost));
        for bundle in &response.bundles {
            let deliver = bundle.tasks.iter().position(|t| *t.metadata() == "deliver").unwrap();
            let dock = bundle.tasks.iter().position(|t| *t.metadata() == "dock").unwrap();
            assert!(deliver < dock, "committed order broken in {bundle}");
        }
    }

    #[test]
    fn test_bundle_size_limits_the_priced_prefix() {
        let request = request(12, 1);
        let solver = BundleSolverBuilder::new().build();
        let response = respond(&request, &StraightLineEvaluator::new(), &solver).unwrap();

        assert_eq!(response.bundles.len(), 12);
        // Only the first leg is priced: starting with "pick" costs 1.
        assert_eq!(response.bundles[0].cost, 1.0);
        assert_eq!(*response.bundles[0].tasks[0].metadata(), "pick");
    }

    #[test]
    fn test_subset_policy_offers_partial_bundles() {
        let request = request(50, 0);
        let solver = BundleSolverBuilder::new()
            .with_new_task_policy(NewTaskPolicy::Subsets {
                max_size: 1,
                best_per_subset: false,
            })
            .build();
        let response = respond(&request, &StraightLineEvaluator::new(), &solver).unwrap();

        // Two singletons, three positions each.
        assert_eq!(response.bundles.len(), 6);
        assert!(response.bundles.iter().all(|b| b.tasks.len() == 3));
        assert_eq!(response.bundles[0].cost, 4.0);
    }

    #[test]
    fn test_best_per_subset_offers_one_bundle_per_singleton() {
        let request = request(50, 0);
        let solver = BundleSolverBuilder::new()
            .with_new_task_policy(NewTaskPolicy::Subsets {
                max_size: 1,
                best_per_subset: true,
            })
            .with_threads(2)
            .build();
        let response = respond(&request, &StraightLineEvaluator::new(), &solver).unwrap();

        assert_eq!(response.bundles.len(), 2);
        let mut offered: Vec<Vec<&str>> = response.bundles.iter().map(|b| labels(&b.tasks)).collect();
        offered.sort();
        assert_eq!(
            offered,
            vec![vec!["deliver", "scan", "dock"], vec!["pick", "deliver", "dock"]]
        );
        assert!(response.bundles.iter().all(|b| b.cost == 4.0));
    }

    #[test]
    fn test_released_committed_task_may_move_ahead() {
        let mut request = request(1, 0);
        // `dock` lies behind the start, so it is cheapest to visit first.
        request.committed_tasks[1] = Task::new(Pose2d::new(-1.0, 0.0, 0.0), "dock");
        let solver = BundleSolverBuilder::new().with_permute_last_committed(1).build();
        let response = respond(&request, &StraightLineEvaluator::new(), &solver).unwrap();

        assert_eq!(labels(&response.bundles[0].tasks), vec!["dock", "pick", "deliver", "scan"]);
        assert_eq!(response.bundles[0].cost, 5.0);
    }

    #[test]
    fn test_unreachable_bundles_are_left_out() {
        let request = request(20, 0);
        let solver = BundleSolverBuilder::new().build();
        let response = respond(&request, &StraightLineEvaluator::with_range_limit(6.0), &solver).unwrap();

        assert!(!response.bundles.is_empty());
        assert!(response.bundles.iter().all(|b| b.cost <= 6.0));
    }

    #[test]
    fn test_empty_request_yields_the_empty_bundle() {
        let request = BundleRequest::<()> {
            start: Pose2d::default(),
            committed_tasks: Vec::new(),
            new_tasks: Vec::new(),
            max_bundles: 4,
            bundle_size: 0,
            sender_id: "robot_0".into(),
            request_id: "0".into(),
        };
        let response = respond(&request, &StraightLineEvaluator::new(), &BundleSolverBuilder::new().build()).unwrap();

        assert_eq!(response.bundles.len(), 1);
        assert!(response.bundles[0].tasks.is_empty());
        assert_eq!(response.bundles[0].cost, 0.0);
    }
}
