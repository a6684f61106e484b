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


//! Property tests for the interleaving enumeration.
//!
//! Elements are tagged with their origin so that "deleting the flexible
//! elements" can be checked by identity rather than by value.
//!
//! Case counts can be raised with `PROPTEST_CASES`.

use proptest::prelude::*;
use std::collections::HashSet;
use talker_core::math::combinatorics::{factorial, falling_factorial};
use talker_interleave::{
    Interleavings, count_interleavings, interleavings::partition_range, interleavings,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Origin {
    Fixed(usize),
    Flex(usize),
}

fn tagged(n: usize, k: usize) -> (Vec<Origin>, Vec<Origin>) {
    (
        (0..n).map(Origin::Fixed).collect(),
        (0..k).map(Origin::Flex).collect(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_count_is_falling_factorial(n in 0usize..6, k in 0usize..5) {
        let (fixed, flex) = tagged(n, k);
        let expected = falling_factorial::<u64>(n, k).unwrap();

        let it = interleavings(&fixed, &flex).unwrap();
        prop_assert_eq!(it.total(), expected);
        prop_assert_eq!(it.fold(0u64, |acc, _| acc + 1), expected);
    }

    #[test]
    fn prop_interleavings_are_pairwise_distinct(n in 0usize..5, k in 0usize..5) {
        let (fixed, flex) = tagged(n, k);
        let all: Vec<_> = interleavings(&fixed, &flex).unwrap().collect();
        let distinct: HashSet<_> = all.iter().cloned().collect();
        prop_assert_eq!(distinct.len(), all.len());
    }

    #[test]
    fn prop_fixed_order_survives_and_every_element_appears_once(n in 0usize..5, k in 0usize..4) {
        let (fixed, flex) = tagged(n, k);
        for ordering in interleavings(&fixed, &flex).unwrap() {
            prop_assert_eq!(ordering.len(), n + k);

            let kept: Vec<_> = ordering
                .iter()
                .copied()
                .filter(|o| matches!(o, Origin::Fixed(_)))
                .collect();
            prop_assert_eq!(&kept, &fixed);

            let unique: HashSet<_> = ordering.iter().copied().collect();
            prop_assert_eq!(unique.len(), n + k);
        }
    }

    #[test]
    fn prop_without_fixed_all_permutations_appear(k in 0usize..6) {
        let (_, flex) = tagged(0, k);
        let all: HashSet<_> = interleavings(&[], &flex).unwrap().collect();
        prop_assert_eq!(all.len() as u64, factorial::<u64>(k).unwrap());
        for permutation in &all {
            let mut sorted = permutation.clone();
            sorted.sort_by_key(|o| match o {
                Origin::Flex(i) | Origin::Fixed(i) => *i,
            });
            prop_assert_eq!(&sorted, &flex);
        }
    }

    #[test]
    fn prop_without_flex_yields_fixed_once(n in 0usize..8) {
        let (fixed, _) = tagged(n, 0);
        let all: Vec<_> = interleavings(&fixed, &[]).unwrap().collect();
        prop_assert_eq!(all, vec![fixed]);
    }

    #[test]
    fn prop_partitions_reassemble_the_full_enumeration(
        n in 0usize..4,
        k in 0usize..4,
        parts in 1usize..7,
    ) {
        let (fixed, flex) = tagged(n, k);
        let full: Vec<_> = interleavings(&fixed, &flex).unwrap().collect();
        let total = count_interleavings(n, k).unwrap();

        let mut stitched = Vec::new();
        for range in partition_range(0..total, parts) {
            stitched.extend(Interleavings::with_range(&fixed, &flex, range).unwrap());
        }
        prop_assert_eq!(stitched, full);
    }

    #[test]
    fn prop_random_access_agrees_with_iteration(n in 0usize..4, k in 0usize..4) {
        let (fixed, flex) = tagged(n, k);
        let it = interleavings(&fixed, &flex).unwrap();
        let mut buf = Vec::new();
        for (index, ordering) in it.clone().enumerate() {
            it.decode_into(index as u64, &mut buf);
            prop_assert_eq!(&buf, &ordering);
        }
    }
}

#[test]
fn test_largest_representable_spaces() {
    // 20! is the largest factorial in u64.
    assert!(count_interleavings(0, 20).is_ok());
    assert!(count_interleavings(0, 21).is_err());
    // n = k = 10 is about 670 million orderings, still representable.
    assert_eq!(count_interleavings(10, 10), Ok(670_442_572_800));
}
