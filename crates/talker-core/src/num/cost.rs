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


//! # Cost Values
//!
//! Bundles are ranked by cost, and the ranking must be a total order so that
//! the selected set does not depend on the order in which candidates arrive.
//! Integer costs already are totally ordered. Floating point costs are
//! compared with `total_cmp`, and non-finite values are reported as not
//! admissible so that callers can drop them before they reach a ranking.
//!
//! ```rust
//! use talker_core::num::cost::CostValue;
//! use std::cmp::Ordering;
//!
//! assert_eq!(1.5f64.cost_cmp(&2.0), Ordering::Less);
//! assert!(!f64::NAN.is_admissible());
//! assert!(7u32.is_admissible());
//! ```

use std::cmp::Ordering;

/// A cost that can be ranked by a total order.
pub trait CostValue: Copy + PartialOrd + std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Compares two costs. Must be a total order on admissible values.
    fn cost_cmp(&self, other: &Self) -> Ordering;

    /// Returns `true` if the value may take part in a ranking.
    fn is_admissible(&self) -> bool;
}

macro_rules! impl_cost_value_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl CostValue for $t {
                #[inline(always)]
                fn cost_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                #[inline(always)]
                fn is_admissible(&self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_cost_value_for_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl CostValue for $t {
                #[inline(always)]
                fn cost_cmp(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }

                #[inline(always)]
                fn is_admissible(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_cost_value_for_int!(u8, u16, u32, u64, u128, usize);
impl_cost_value_for_int!(i8, i16, i32, i64, i128, isize);
impl_cost_value_for_float!(f32, f64);
