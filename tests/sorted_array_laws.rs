//! Property-based tests for SortedArray.
//!
//! The ordering invariant must hold after every operation, and uniqueness
//! must hold whenever the flag is on.

use std::cmp::Ordering;

use proptest::prelude::*;
use rwarray::{SortedArray, UnsyncSortedArray};

fn strictly_increasing(values: &[i32]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}

fn non_decreasing(values: &[i32]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

proptest! {
    /// The array is sorted after every `add`, and ends up holding the sorted
    /// multiset of everything added.
    #[test]
    fn prop_add_yields_sorted_multiset(
        batches in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..12), 0..12)
    ) {
        let array: SortedArray<i32> = SortedArray::new();
        for batch in &batches {
            array.add(batch.iter().copied());
            prop_assert!(non_decreasing(&array.to_vec()));
        }

        let mut expected = batches.concat();
        expected.sort_unstable();
        prop_assert_eq!(array.to_vec(), expected);
    }

    /// With uniqueness on, the contents equal the sorted set of inputs.
    #[test]
    fn prop_unique_add_yields_sorted_set(
        elements in prop::collection::vec(-20i32..20, 0..80)
    ) {
        let array: UnsyncSortedArray<i32> = UnsyncSortedArray::new();
        array.set_unique(true);
        array.add(elements.iter().copied());

        let mut expected = elements;
        expected.sort_unstable();
        expected.dedup();
        let values = array.to_vec();
        prop_assert!(strictly_increasing(&values));
        prop_assert_eq!(values, expected);
    }

    /// Turning uniqueness on after the fact gives the same result as having
    /// it on from the start.
    #[test]
    fn prop_late_unique_matches_early_unique(
        elements in prop::collection::vec(-20i32..20, 0..80)
    ) {
        let late: SortedArray<i32> = SortedArray::from_vec(elements.clone());
        late.set_unique(true);

        let early: SortedArray<i32> = SortedArray::new();
        early.set_unique(true);
        early.add(elements);

        prop_assert_eq!(late.to_vec(), early.to_vec());
    }

    /// Search finds every present value at a position holding that value.
    #[test]
    fn prop_search_finds_present_values(
        elements in prop::collection::vec(-50i32..50, 1..60),
        probe in -60i32..60
    ) {
        let array: SortedArray<i32> = SortedArray::from_vec(elements.clone());

        match array.search(&probe) {
            Some(index) => prop_assert_eq!(array.get(index), probe),
            None => prop_assert!(!elements.contains(&probe)),
        }
    }

    /// The reported neighbour brackets the probe.
    #[test]
    fn prop_binary_search_brackets_probe(
        elements in prop::collection::vec(-50i32..50, 1..60),
        probe in -60i32..60
    ) {
        let array: SortedArray<i32> = SortedArray::from_vec(elements);
        let values = array.to_vec();

        if let Some((index, ordering)) = array.binary_search(&probe) {
            prop_assert_eq!(probe.cmp(&values[index]), ordering);
            match ordering {
                Ordering::Less => prop_assert!(index == 0 || values[index - 1] <= probe),
                Ordering::Greater => prop_assert!(index + 1 == values.len() || probe <= values[index + 1]),
                Ordering::Equal => {}
            }
        }
    }

    /// Removals keep the remainder sorted.
    #[test]
    fn prop_removals_keep_order(
        elements in prop::collection::vec(any::<i32>(), 1..60),
        amount in 0usize..10,
        seed in any::<usize>()
    ) {
        let array: SortedArray<i32> = SortedArray::from_vec(elements);
        array.remove(seed % array.len());
        array.pop_rands(amount);
        array.pop_left();

        prop_assert!(non_decreasing(&array.to_vec()));
    }
}
