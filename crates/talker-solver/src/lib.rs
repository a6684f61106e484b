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


//! # Talker Solver
//!
//! Runs bundle searches end to end.
//!
//! ## Modules
//!
//! - `policy`: Which new tasks take part in an enumeration (`NewTaskPolicy`).
//! - `solver`: `BundleSolver` and its builder. Splits the ordering space
//!   into disjoint blocks, searches them on scoped worker threads with one
//!   cloned evaluator and one monitor stack per worker, and merges the
//!   per-worker selections into one ranked `BundleSet`.
//! - `service`: The request/response boundary (`respond`), turning a
//!   `BundleRequest` into a `BundleResponse`.
//! - `error`: `SolveError`.
//!
//! ## Usage
//!
//! ```rust
//! use talker_model::{pose::Pose2d, request::BundleRequest, task::Task};
//! use talker_search::eval::StraightLineEvaluator;
//! use talker_solver::{service::respond, solver::BundleSolverBuilder};
//!
//! let request = BundleRequest {
//!     start: Pose2d::default(),
//!     committed_tasks: vec![Task::at(2.0, 0.0, 0.0)],
//!     new_tasks: vec![Task::at(1.0, 0.0, 0.0), Task::at(3.0, 0.0, 0.0)],
//!     max_bundles: 2,
//!     bundle_size: 0,
//!     sender_id: "robot_1".into(),
//!     request_id: "17".into(),
//! };
//!
//! let solver = BundleSolverBuilder::new().with_threads(2).build();
//! let response = respond(&request, &StraightLineEvaluator::new(), &solver).unwrap();
//!
//! assert!(response.answers(&request));
//! assert_eq!(response.bundles.len(), 2);
//! assert_eq!(response.bundles[0].cost, 3.0);
//! ```

pub mod error;
pub mod policy;
pub mod service;
pub mod solver;

pub use error::SolveError;
