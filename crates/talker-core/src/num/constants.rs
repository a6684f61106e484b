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


//! Associated constants for the integer types used in combinatorial counting.
//!
//! Counting code is generic over the counter width (`u32`, `u64`, `u128`,
//! `usize`), and `num_traits::{Zero, One}` only expose these values through
//! functions. Associated constants keep the generic code usable in `const`
//! position and read the same for every width.

/// A trait for integer types that have a constant representing 0.
pub trait Zero {
    /// The constant representing 0 for the implementing type.
    const ZERO: Self;
}

/// A trait for integer types that have a constant representing +1.
pub trait PlusOne {
    /// The constant representing +1 for the implementing type.
    const PLUS_ONE: Self;
}

macro_rules! impl_counting_constants_for {
    ($($t:ty),* $(,)?) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0;
            }

            impl PlusOne for $t {
                const PLUS_ONE: Self = 1;
            }
        )*
    };
}

impl_counting_constants_for!(u8, u16, u32, u64, u128, usize);
impl_counting_constants_for!(i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_and_one<T: Zero + PlusOne>() -> (T, T) {
        (T::ZERO, T::PLUS_ONE)
    }

    #[test]
    fn test_constants_for_unsigned_counters() {
        assert_eq!(zero_and_one::<u32>(), (0, 1));
        assert_eq!(zero_and_one::<u64>(), (0, 1));
        assert_eq!(zero_and_one::<u128>(), (0, 1));
        assert_eq!(zero_and_one::<usize>(), (0, 1));
    }

    #[test]
    fn test_constants_for_signed_types() {
        assert_eq!(zero_and_one::<i8>(), (0, 1));
        assert_eq!(zero_and_one::<i64>(), (0, 1));
    }
}
