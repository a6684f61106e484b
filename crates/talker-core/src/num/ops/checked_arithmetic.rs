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


use core::ops::{Add, Mul};

/// A trait for types that support checked addition by value (no references).
///
/// This mirrors the semantics of primitive integer `checked_add`, but provides
/// a trait-based API that does not take references (unlike `num_traits::CheckedAdd`).
///
/// # Examples
///
/// ```rust
/// # use talker_core::num::ops::checked_arithmetic::CheckedAddVal;
/// let a: u8 = 200;
/// assert_eq!(a.checked_add_val(100), None);
/// assert_eq!(a.checked_add_val(50), Some(250));
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Performs checked addition by value, returning `None` if overflow occurs.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// A trait for types that support checked multiplication by value (no references).
///
/// # Examples
///
/// ```rust
/// # use talker_core::num::ops::checked_arithmetic::CheckedMulVal;
/// let a: u8 = 20;
/// assert_eq!(a.checked_mul_val(10), Some(200));
/// assert_eq!(a.checked_mul_val(20), None); // 400 > 255
/// ```
pub trait CheckedMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs checked multiplication by value, returning `None` if overflow occurs.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

macro_rules! checked_impl_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),*) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: $t) -> Option<$t> {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

checked_impl_val!(CheckedAddVal, checked_add_val, checked_add, u8, u16, u32, u64, usize, u128);
checked_impl_val!(CheckedAddVal, checked_add_val, checked_add, i8, i16, i32, i64, isize, i128);
checked_impl_val!(CheckedMulVal, checked_mul_val, checked_mul, u8, u16, u32, u64, usize, u128);
checked_impl_val!(CheckedMulVal, checked_mul_val, checked_mul, i8, i16, i32, i64, isize, i128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_val_detects_overflow() {
        assert_eq!(u64::MAX.checked_add_val(1), None);
        assert_eq!(i32::MAX.checked_add_val(-1), Some(i32::MAX - 1));
    }

    #[test]
    fn test_checked_mul_val_detects_overflow() {
        assert_eq!((u64::MAX / 2).checked_mul_val(3), None);
        assert_eq!(6u32.checked_mul_val(7), Some(42));
        assert_eq!(i8::MIN.checked_mul_val(-1), None);
    }
}
