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


//! # Talker Core
//!
//! Numeric and combinatorial building blocks shared by the talker task
//! bundling crates. Everything here is free of domain types so that the
//! model, enumeration and search crates can agree on the same primitives.
//!
//! ## Modules
//!
//! - `math`: Overflow-checked combinatorial counting (`factorial`,
//!   `falling_factorial`, `binomial`) used to size enumeration spaces before
//!   any work is done.
//! - `num`: Associated constant traits (`Zero`, `PlusOne`), by-value checked
//!   arithmetic traits, and the `CostValue` trait that gives bundle costs a
//!   total order.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`).
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod num;
pub mod utils;
