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


//! # Request / Response Records
//!
//! The logical shapes exchanged with a task-allocation service. Transport
//! and encoding happen elsewhere; these are plain, already-decoded records.
//! The response echoes the sender and request ids so that a caller polling
//! for its answer can tell it apart from answers to other senders.

use crate::{
    board::TaskBoard,
    bundle::{Bundle, BundleSet},
    index::TaskRef,
    pose::Pose2d,
    task::Task,
};
use talker_core::num::cost::CostValue;

/// A request to rank the ways of merging `new_tasks` into `committed_tasks`.
#[derive(Clone, Debug, PartialEq)]
pub struct BundleRequest<M = ()> {
    /// The robot's current pose.
    pub start: Pose2d,
    /// Tasks the robot already committed to, in execution order.
    pub committed_tasks: Vec<Task<M>>,
    /// Newly arrived tasks. Their input order carries no meaning.
    pub new_tasks: Vec<Task<M>>,
    /// Upper bound on the number of bundles in the response.
    pub max_bundles: u32,
    /// Passed unchanged to the cost evaluator.
    pub bundle_size: u32,
    pub sender_id: String,
    pub request_id: String,
}

impl<M> BundleRequest<M> {
    #[inline]
    pub fn board(&self) -> TaskBoard<'_, M> {
        TaskBoard::new(self.start, &self.committed_tasks, &self.new_tasks)
    }
}

/// A bundle with its task references resolved to tasks.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskBundle<M, C> {
    pub cost: C,
    pub tasks: Vec<Task<M>>,
}

impl<M, C> TaskBundle<M, C>
where
    M: Clone,
    C: CostValue,
{
    /// Resolves a `TaskRef` bundle against the board it was enumerated on.
    pub fn resolve(bundle: &Bundle<TaskRef, C>, board: &TaskBoard<'_, M>) -> Self {
        Self {
            cost: bundle.cost(),
            tasks: board.resolve_all(bundle.ordering()).cloned().collect(),
        }
    }
}

impl<M, C> std::fmt::Display for TaskBundle<M, C>
where
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.cost)?;
        for task in &self.tasks {
            write!(f, " {}", task.pose())?;
        }
        Ok(())
    }
}

/// The answer to a `BundleRequest`, bundles ascending by cost.
#[derive(Clone, Debug, PartialEq)]
pub struct BundleResponse<M, C> {
    pub bundles: Vec<TaskBundle<M, C>>,
    pub sender_id: String,
    pub request_id: String,
}

impl<M, C> BundleResponse<M, C>
where
    M: Clone,
    C: CostValue,
{
    /// Builds the response for `request` from a ranked set of `TaskRef` bundles.
    pub fn from_bundle_set(request: &BundleRequest<M>, set: &BundleSet<TaskRef, C>) -> Self {
        let board = request.board();
        Self {
            bundles: set
                .iter()
                .map(|bundle| TaskBundle::resolve(bundle, &board))
                .collect(),
            sender_id: request.sender_id.clone(),
            request_id: request.request_id.clone(),
        }
    }

    /// Returns `true` if this response answers `request`.
    #[inline]
    pub fn answers(&self, request: &BundleRequest<M>) -> bool {
        self.sender_id == request.sender_id && self.request_id == request.request_id
    }
}
