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


//! # Talker Interleave
//!
//! Enumeration of order-preserving merges. Given a fixed sequence of `n`
//! elements and a flexible list of `k` elements, an *interleaving* is a
//! sequence of all `n + k` elements in which the fixed elements keep their
//! relative order. There are exactly `(n + k)! / n!` of them: the new
//! elements may appear in any relative order and at any position.
//!
//! ## Modules
//!
//! - `radix`: Mixed-radix decoding of an enumeration index into insertion
//!   positions, one digit per flexible element with radixes
//!   `n + 1, n + 2, ..., n + k`.
//! - `interleavings`: The lazy, restartable `Interleavings` iterator with
//!   random access (`decode_into`) and range restriction for parallel workers.
//! - `combinations`: Lexicographic `k`-subset enumeration, used when only a
//!   subset of the flexible elements should be merged at a time.
//! - `error`: `InterleaveError`, raised when the enumeration space does not
//!   fit the `u64` index domain.
//!
//! ## Usage
//!
//! ```rust
//! use talker_interleave::interleavings;
//!
//! let all: Vec<Vec<&str>> = interleavings(&["F0", "F1"], &["X0", "X1"])
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(all.len(), 12);
//! for ordering in &all {
//!     let f0 = ordering.iter().position(|&t| t == "F0").unwrap();
//!     let f1 = ordering.iter().position(|&t| t == "F1").unwrap();
//!     assert!(f0 < f1);
//! }
//! ```

pub mod combinations;
pub mod error;
pub mod interleavings;
pub mod radix;

pub use error::InterleaveError;
pub use interleavings::{Interleavings, count_interleavings, interleavings};
