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


//! # Combinatorial Counting
//!
//! Overflow-checked counting of permutations and subsets. Enumeration spaces
//! in task bundling grow factorially: interleaving `k` new tasks into `n`
//! committed ones yields `(n + k)! / n!` orderings, which already exceeds
//! 670 million for `n = k = 10`. These helpers compute such sizes exactly or
//! report that they do not fit the chosen integer type.
//!
//! All functions are generic over the counter width and never wrap.
//!
//! ```rust
//! use talker_core::math::combinatorics::{binomial, factorial, falling_factorial};
//!
//! assert_eq!(factorial::<u64>(5), Some(120));
//! // (2 + 2)! / 2! = 3 * 4
//! assert_eq!(falling_factorial::<u64>(2, 2), Some(12));
//! assert_eq!(binomial::<u64>(4, 2), Some(6));
//! assert_eq!(factorial::<u64>(21), None);
//! ```

use crate::num::{
    constants::{PlusOne, Zero},
    ops::checked_arithmetic::{CheckedAddVal, CheckedMulVal},
};
use num_traits::{FromPrimitive, PrimInt};

/// Returns `n!`, or `None` if it does not fit into `T`.
#[inline]
pub fn factorial<T>(n: usize) -> Option<T>
where
    T: PrimInt + FromPrimitive + PlusOne + CheckedMulVal,
{
    falling_factorial(0, n)
}

/// Returns `(base + len)! / base!`, i.e. the product
/// `(base + 1) * (base + 2) * ... * (base + len)`.
///
/// This is the number of ways to insert `len` distinguishable items, one
/// after another, into a sequence that starts with `base` items. It is `1`
/// when `len == 0`. Returns `None` if the product, or any factor, does not
/// fit into `T`.
pub fn falling_factorial<T>(base: usize, len: usize) -> Option<T>
where
    T: PrimInt + FromPrimitive + PlusOne + CheckedMulVal,
{
    let mut product = T::PLUS_ONE;
    for i in 1..=len {
        let factor = T::from_usize(base.checked_add(i)?)?;
        product = product.checked_mul_val(factor)?;
    }
    Some(product)
}

/// Returns the binomial coefficient `n choose k`, or `None` on overflow.
///
/// Uses the multiplicative formula with an exact division at every step, so
/// intermediate values stay as small as the result allows.
pub fn binomial<T>(n: usize, k: usize) -> Option<T>
where
    T: PrimInt + FromPrimitive + PlusOne + Zero + CheckedMulVal,
{
    if k > n {
        return Some(T::ZERO);
    }
    let k = k.min(n - k);
    let mut result = T::PLUS_ONE;
    for i in 1..=k {
        // result * (n - k + i) is divisible by i at every step.
        let numerator = T::from_usize(n - k + i)?;
        let divisor = T::from_usize(i)?;
        result = result.checked_mul_val(numerator)? / divisor;
    }
    Some(result)
}

/// Returns the sum of `binomial(n, s)` over `s in 1..=max_size`, or `None`
/// on overflow. This is the number of non-empty subsets of at most
/// `max_size` elements.
pub fn subsets_up_to<T>(n: usize, max_size: usize) -> Option<T>
where
    T: PrimInt + FromPrimitive + PlusOne + Zero + CheckedMulVal + CheckedAddVal,
{
    let mut total = T::ZERO;
    for size in 1..=max_size.min(n) {
        total = total.checked_add_val(binomial(n, size)?)?;
    }
    Some(total)
}
