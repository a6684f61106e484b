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


//! # Mixed-Radix Decoding
//!
//! An interleaving of `k` flexible elements into `n` fixed elements can be
//! built by inserting the flexible elements one after another: element `i`
//! is inserted into a sequence that already holds `n + i` elements and so has
//! `n + i + 1` possible positions. Reading an index `c` in the mixed radix
//! system with radixes `n + 1, n + 2, ..., n + k` (least significant first)
//! yields one position per element:
//!
//! ```text
//! position_0 = c mod (n + 1)              c_1 = c / (n + 1)
//! position_1 = c_1 mod (n + 2)            c_2 = c_1 / (n + 2)
//! ...
//! ```
//!
//! The digit ranges multiply to `(n + 1)(n + 2)...(n + k) = (n + k)! / n!`,
//! and distinct digit tuples produce distinct sequences, so every index in
//! `0..(n + k)! / n!` decodes to a different interleaving and every
//! interleaving is reached.
//!
//! Reusing the undivided counter for every digit (`position_i = c mod (n + i + 1)`)
//! is *not* a bijection in general: with `n = 0, k = 4` the radixes `1, 2, 3, 4`
//! only distinguish `lcm(1, 2, 3, 4) = 12` of the `24` indices.

use smallvec::SmallVec;

/// Inline capacity of position buffers; covers every `k` whose space fits in `u64`.
pub const INLINE_DIGITS: usize = 24;

/// Insertion positions for each flexible element, in element order.
pub type Positions = SmallVec<[usize; INLINE_DIGITS]>;

/// The radix of digit `digit` when interleaving into `base` fixed elements.
#[inline(always)]
pub const fn radix(base: usize, digit: usize) -> usize {
    base + digit + 1
}

/// Decodes `index` into `len` insertion positions for a sequence that
/// starts with `base` fixed elements.
///
/// Position `i` lies in `0..=base + i`; a position equal to the current
/// sequence length means "append".
///
/// ```rust
/// use talker_interleave::radix::decode_positions;
///
/// // n = 2, k = 2: radixes 3 and 4.
/// assert_eq!(decode_positions(0, 2, 2).as_slice(), &[0, 0]);
/// assert_eq!(decode_positions(5, 2, 2).as_slice(), &[2, 1]);
/// assert_eq!(decode_positions(11, 2, 2).as_slice(), &[2, 3]);
/// ```
pub fn decode_positions(index: u64, base: usize, len: usize) -> Positions {
    let mut positions = Positions::with_capacity(len);
    let mut rest = index;
    for digit in 0..len {
        let r = radix(base, digit) as u64;
        positions.push((rest % r) as usize);
        rest /= r;
    }
    positions
}

/// Writes the interleaving for `index` into `out`, replacing its contents.
///
/// `out` receives `fixed` followed by one insertion per flexible element.
/// Indices at or beyond `(n + k)! / n!` wrap around in the most significant
/// digit; callers bound `index` by the enumeration total.
pub fn decode_into<T>(index: u64, fixed: &[T], flex: &[T], out: &mut Vec<T>)
where
    T: Clone,
{
    out.clear();
    out.reserve(fixed.len() + flex.len());
    out.extend_from_slice(fixed);

    let base = fixed.len();
    let mut rest = index;
    for (digit, element) in flex.iter().enumerate() {
        let r = radix(base, digit) as u64;
        let at = (rest % r) as usize;
        rest /= r;
        // `at` never exceeds `out.len()`, which equals `base + digit` here.
        out.insert(at, element.clone());
    }
}
