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


//! # Talker Model
//!
//! **The data model for multi-robot task bundling.**
//!
//! A robot that has already committed to an ordered list of tasks receives a
//! set of new tasks. The bundling service enumerates every way to merge the
//! new tasks into the committed list, prices each merged ordering, and returns
//! the cheapest ones as *bundles*. This crate holds the records that flow
//! through that pipeline; it contains no search logic.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed positions (`CommittedIndex`, `NewTaskIndex`)
//!   and the `TaskRef` identity used inside enumerated orderings.
//! * **`pose`**: `Pose2d`, the planar pose a task targets.
//! * **`task`**: `Task<M>`, a pose plus opaque metadata that is carried through unchanged.
//! * **`board`**: `TaskBoard`, a borrowed view of one request that resolves `TaskRef`s.
//! * **`bundle`**: `Bundle` (ordering + cost + enumeration index) and the ranked `BundleSet`.
//! * **`request`**: `BundleRequest` and `BundleResponse`, the logical service boundary.
//!
//! ## Design Philosophy
//!
//! 1.  **Identity over equality**: Orderings are enumerated over `TaskRef`s,
//!     so two tasks with identical poses are still distinct tasks.
//! 2.  **Opaque payloads**: Task metadata is never inspected or mutated.
//! 3.  **Plain records**: Requests arrive already decoded; no wire format lives here.

pub mod board;
pub mod bundle;
pub mod index;
pub mod pose;
pub mod request;
pub mod task;
