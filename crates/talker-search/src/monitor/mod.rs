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


//! # Search Monitors
//!
//! Pluggable observers and controllers for the lifecycle of a bundle search.
//! Monitors can log progress, enforce budgets (wall-clock time, number of
//! evaluations), and react to an external interrupt, issuing termination
//! commands that the enumeration loop honors between two orderings.
//!
//! ## Submodules
//!
//! - `search_monitor`: Core trait (`SearchMonitor<C>`), the `SearchCommand`
//!   enum, and the `SearchSpace` handed to monitors on entry.
//! - `composite`: Aggregate multiple monitors into a single composite.
//! - `index`: Strongly typed monitor indices for safe addressing.
//! - `interrupt`: Atomically-driven interrupt monitor for cross-thread stops.
//! - `evaluation_limit`: Evaluation-count monitor with a global limit via `AtomicU64`.
//! - `time_limit`: Wall-clock time budget monitor with step-filtered checks.
//! - `log`: Periodic progress reporting through `tracing`.
//! - `no_op`: A monitor that never interferes.

pub mod composite;
pub mod evaluation_limit;
pub mod index;
pub mod interrupt;
pub mod log;
pub mod no_op;
pub mod search_monitor;
pub mod time_limit;
