//! Unit tests for SortedArray.
//!
//! Covers ordered insertion, binary search, uniqueness toggling, aliasing
//! through shared storage, and the cost difference between sorted and
//! unsorted deduplication.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use rstest::rstest;
use rwarray::lock::{LockMode, Synchronized};
use rwarray::{Array, SortedArray, UnsyncSortedArray};

fn is_sorted<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_array() {
    let array: SortedArray<i32> = SortedArray::new();
    assert!(array.is_empty());
    assert!(!array.is_unique());
    assert!(array.is_safe());
}

#[rstest]
fn test_from_vec_sorts_input() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![5, 3, 9, 1]);
    assert_eq!(array.to_vec(), vec![1, 3, 5, 9]);
}

#[rstest]
fn test_from_slice_copies_input() {
    let source = vec![2, 1];
    let array: SortedArray<i32> = SortedArray::from_slice(&source);
    array.add([0]);
    assert_eq!(source, vec![2, 1]);
    assert_eq!(array.to_vec(), vec![0, 1, 2]);
}

#[rstest]
fn test_from_shared_sorts_and_aliases() {
    let shared = Synchronized::share(VecDeque::from(vec![3, 1, 2]));
    let array: SortedArray<i32> = SortedArray::from_shared(Arc::clone(&shared));

    assert_eq!(*shared.read(), VecDeque::from(vec![1, 2, 3]));
    array.pop_left();
    assert_eq!(*shared.read(), VecDeque::from(vec![2, 3]));
}

#[rstest]
fn test_sort_restores_order_after_aliased_write() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![1, 2]);
    array.shared().write().push_front(9);
    array.sort();
    assert_eq!(array.to_vec(), vec![1, 2, 9]);
}

#[rstest]
fn test_custom_comparator() {
    let array: UnsyncSortedArray<String> = UnsyncSortedArray::new_by(|left, right| {
        left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    });
    array.add(["ccc".to_string(), "a".to_string(), "bb".to_string()]);
    assert_eq!(array.to_vec(), vec!["a", "bb", "ccc"]);
    assert_eq!(array.search(&"bb".to_string()), Some(1));
}

// =============================================================================
// Ordered Insertion and Lookup
// =============================================================================

#[rstest]
#[case(vec![], 4, vec![4])]
#[case(vec![1, 3], 2, vec![1, 2, 3])]
#[case(vec![1, 3], 0, vec![0, 1, 3])]
#[case(vec![1, 3], 5, vec![1, 3, 5])]
#[case(vec![1, 3], 3, vec![1, 3, 3])]
fn test_add_places_value(#[case] initial: Vec<i32>, #[case] value: i32, #[case] expected: Vec<i32>) {
    let array: SortedArray<i32> = SortedArray::from_vec(initial);
    array.add([value]);
    assert_eq!(array.to_vec(), expected);
}

#[rstest]
fn test_add_many_stays_sorted() {
    let array: SortedArray<i32> = SortedArray::new();
    array.add([8, -1, 4, 4, 0, 12, 3]);
    let values = array.to_vec();
    assert!(is_sorted(&values));
    assert_eq!(values.len(), 7);
}

#[rstest]
fn test_binary_search_reports_neighbour() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![10, 20, 30, 40]);
    assert_eq!(array.binary_search(&30), Some((2, Ordering::Equal)));
    assert_eq!(array.binary_search(&25), Some((2, Ordering::Less)));
    assert_eq!(array.binary_search(&45), Some((3, Ordering::Greater)));
    assert_eq!(array.binary_search(&1), Some((0, Ordering::Less)));
}

#[rstest]
fn test_search_and_contains() {
    let array: SortedArray<&str> = SortedArray::from_vec(vec!["b", "a", "c"]);
    assert_eq!(array.search(&"a"), Some(0));
    assert_eq!(array.search(&"c"), Some(2));
    assert_eq!(array.search(&"d"), None);
    assert!(array.contains(&"b"));
    assert!(!SortedArray::<&str>::new().contains(&"b"));
}

// =============================================================================
// Uniqueness
// =============================================================================

#[rstest]
fn test_set_unique_removes_existing_duplicates() {
    let array: SortedArray<&str> = SortedArray::from_vec(vec!["a", "a", "b"]);
    array.set_unique(true);
    assert!(array.is_unique());
    assert_eq!(array.to_vec(), vec!["a", "b"]);
}

#[rstest]
fn test_unique_mode_skips_equal_values() {
    let array: SortedArray<i32> = SortedArray::new();
    array.set_unique(true);
    array.add([3, 1, 3, 2, 1, 3]);
    assert_eq!(array.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_turning_unique_off_allows_duplicates_again() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![1, 2]);
    array.set_unique(true).set_unique(false);
    array.add([2]);
    assert_eq!(array.to_vec(), vec![1, 2, 2]);
}

#[rstest]
fn test_unique_without_flag_dedups_once() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![2, 1, 2, 1]);
    array.unique();
    assert_eq!(array.to_vec(), vec![1, 2]);
    assert!(!array.is_unique());
}

#[rstest]
fn test_write_with_restores_invariants() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![1, 5]);
    array.set_unique(true);
    let length = array.write_with(|values| {
        values.push_back(0);
        values.push_back(5);
        values.len()
    });
    assert_eq!(length, 4);
    assert_eq!(array.to_vec(), vec![0, 1, 5]);
}

// =============================================================================
// Deduplication Cost
// =============================================================================

static SORTED_COMPARISONS: AtomicUsize = AtomicUsize::new(0);

fn counting_cmp(left: &u32, right: &u32) -> Ordering {
    SORTED_COMPARISONS.fetch_add(1, AtomicOrdering::Relaxed);
    left.cmp(right)
}

#[rstest]
fn test_sorted_unique_is_linear() {
    let size: u32 = 200;
    let array: SortedArray<u32> = SortedArray::new_by(counting_cmp);
    array.write_with(|values| values.extend((0..size).map(|value| value / 2)));

    SORTED_COMPARISONS.store(0, AtomicOrdering::Relaxed);
    array.unique();

    assert_eq!(SORTED_COMPARISONS.load(AtomicOrdering::Relaxed), 199);
    assert_eq!(array.len(), 100);
}

#[derive(Clone, Debug)]
struct Counted {
    value: u32,
    comparisons: Arc<AtomicUsize>,
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool {
        self.comparisons.fetch_add(1, AtomicOrdering::Relaxed);
        self.value == other.value
    }
}

#[rstest]
fn test_unsorted_unique_is_pairwise() {
    let size: usize = 50;
    let comparisons = Arc::new(AtomicUsize::new(0));
    let array: Array<Counted> = (0..size)
        .map(|value| Counted {
            value: u32::try_from(value).unwrap_or_default(),
            comparisons: Arc::clone(&comparisons),
        })
        .collect();

    array.unique();

    assert_eq!(comparisons.load(AtomicOrdering::Relaxed), size * (size - 1) / 2);
    assert_eq!(array.len(), size);
}

// =============================================================================
// Removal and Reads
// =============================================================================

#[rstest]
fn test_pops_follow_order() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![4, 2, 6, 8]);
    assert_eq!(array.pop_left(), Some(2));
    assert_eq!(array.pop_right(), Some(8));
    assert_eq!(array.pop_lefts(5), vec![4, 6]);
    assert_eq!(array.pop_left(), None);
    assert_eq!(array.pop_rand(), None);
}

#[rstest]
fn test_pop_rands_removes_members() {
    let array: SortedArray<i32> = (0..10).collect();
    let popped = array.pop_rands(4);
    assert_eq!(popped.len(), 4);
    assert_eq!(array.len(), 6);
    assert!(popped.iter().all(|value| !array.contains(value)));
    assert!(is_sorted(&array.to_vec()));
}

#[rstest]
fn test_remove_keeps_order() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![1, 2, 3, 4]);
    assert_eq!(array.remove(1), 2);
    assert_eq!(array.to_vec(), vec![1, 3, 4]);
}

#[rstest]
fn test_windows_and_reads() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![5, 4, 3, 2, 1]);
    assert_eq!(array.range(1, Some(3)), vec![2, 3]);
    assert_eq!(array.sub_slice(-2, Some(2)), vec![4, 5]);
    assert_eq!(array.chunk(2), vec![vec![1, 2], vec![3, 4], vec![5]]);
    assert_eq!(array.sum(), 15);
    assert_eq!(array.join("-"), "1-2-3-4-5");
    assert_eq!(array.get(4), 5);
    assert!(array.rand().is_some_and(|value| array.contains(&value)));
    assert_eq!(array.rands(9).len(), 5);
}

#[rstest]
fn test_set_array_sorts() {
    let array: SortedArray<i32> = SortedArray::new();
    array.set_array(vec![3, 2, 1]);
    assert_eq!(array.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_display_and_debug() {
    let array: SortedArray<i32> = SortedArray::from_vec(vec![2, 1]);
    assert_eq!(array.to_string(), "[1, 2]");
    assert_eq!(
        format!("{array:?}"),
        "SortedArray { values: [1, 2], unique: false }"
    );
}
