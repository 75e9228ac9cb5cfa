//! Boundary arithmetic and sequence algorithms shared by both containers.
//!
//! Everything here operates on an already-locked `VecDeque`; the containers
//! decide which lock to hold.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt::{Display, Write};
use std::hash::Hash;

use crate::random;

// =============================================================================
// Windows
// =============================================================================

/// Half-open bounds for `range(start, end)`.
///
/// `end` defaults to `length` and is clamped to it; `start` is clamped to
/// zero. A start beyond the effective end yields `None`.
pub(crate) fn range_bounds(length: usize, start: isize, end: Option<isize>) -> Option<(usize, usize)> {
    let length = to_isize(length);
    let end = end.map_or(length, |end| end.min(length));
    if start > end {
        return None;
    }
    let start = start.max(0);
    if end < start {
        return None;
    }
    Some((start.unsigned_abs(), end.unsigned_abs()))
}

/// Half-open bounds for `sub_slice(offset, size)`.
///
/// - A negative `offset` counts from the end; if it still lands before the
///   front the window is empty.
/// - `size` omitted means "up to the end".
/// - A negative `size` stops the window that many elements before the end.
/// - The window is clamped to the sequence.
pub(crate) fn sub_slice_bounds(length: usize, offset: isize, size: Option<isize>) -> Option<(usize, usize)> {
    let length = to_isize(length);
    if offset > length {
        return None;
    }
    let start = if offset < 0 { length + offset } else { offset };
    if start < 0 {
        return None;
    }
    let end = match size {
        None => length,
        Some(size) if size < 0 => length + size,
        Some(size) => start.saturating_add(size).min(length),
    };
    if end <= start {
        return None;
    }
    Some((start.unsigned_abs(), end.unsigned_abs()))
}

#[inline]
fn to_isize(length: usize) -> isize {
    isize::try_from(length).unwrap_or(isize::MAX)
}

pub(crate) fn copy_window<T: Clone>(values: &VecDeque<T>, bounds: Option<(usize, usize)>) -> Vec<T> {
    bounds.map_or_else(Vec::new, |(start, end)| values.range(start..end).cloned().collect())
}

// =============================================================================
// Removal
// =============================================================================

/// Removes the element at `index`, panicking when it is out of range.
///
/// The front and back are trimmed in O(1); interior removal shifts the
/// remainder in O(length).
pub(crate) fn remove_at<T>(values: &mut VecDeque<T>, index: usize) -> T {
    let length = values.len();
    let removed = if index == 0 {
        values.pop_front()
    } else if index + 1 == length {
        values.pop_back()
    } else {
        values.remove(index)
    };
    removed.unwrap_or_else(|| panic!("index out of bounds: the len is {length} but the index is {index}"))
}

/// Removes `amount` uniformly chosen elements, one draw at a time.
pub(crate) fn pop_random<T>(values: &mut VecDeque<T>, amount: usize) -> Vec<T> {
    let amount = amount.min(values.len());
    let mut popped = Vec::with_capacity(amount);
    for _ in 0..amount {
        let index = random::index(values.len());
        popped.push(remove_at(values, index));
    }
    popped
}

pub(crate) fn pop_front_many<T>(values: &mut VecDeque<T>, amount: usize) -> Vec<T> {
    let amount = amount.min(values.len());
    values.drain(..amount).collect()
}

pub(crate) fn pop_back_many<T>(values: &mut VecDeque<T>, amount: usize) -> Vec<T> {
    let start = values.len().saturating_sub(amount);
    values.drain(start..).collect()
}

// =============================================================================
// Deduplication
// =============================================================================

/// Pairwise deduplication: every element is compared with every later one.
///
/// First occurrences survive in their original relative order. Runs in
/// O(length²) comparisons and does not require any ordering on `T`.
pub(crate) fn dedup_pairwise<T: PartialEq>(values: &mut VecDeque<T>) -> usize {
    let before = values.len();
    let mut index = 0;
    while index < values.len() {
        let mut other = index + 1;
        while other < values.len() {
            if values[index] == values[other] {
                values.remove(other);
            } else {
                other += 1;
            }
        }
        index += 1;
    }
    before - values.len()
}

/// Adjacent deduplication for sorted input: a single linear pass that keeps
/// the first element of each run of equal elements.
pub(crate) fn dedup_adjacent<T, F>(values: &mut VecDeque<T>, mut compare: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let before = values.len();
    if before < 2 {
        return 0;
    }
    let slice = values.make_contiguous();
    let mut write = 1;
    for read in 1..before {
        if compare(&slice[write - 1], &slice[read]) != Ordering::Equal {
            slice.swap(write, read);
            write += 1;
        }
    }
    values.truncate(write);
    before - write
}

// =============================================================================
// Reading helpers
// =============================================================================

pub(crate) fn chunks<T: Clone>(values: &VecDeque<T>, size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    let mut chunks = Vec::with_capacity(values.len().div_ceil(size));
    let mut current = Vec::with_capacity(size);
    for value in values {
        current.push(value.clone());
        if current.len() == size {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

pub(crate) fn random_picks<T: Clone>(values: &VecDeque<T>, amount: usize) -> Vec<T> {
    random::sample(values.len(), amount)
        .into_iter()
        .map(|index| values[index].clone())
        .collect()
}

pub(crate) fn random_pick<T: Clone>(values: &VecDeque<T>) -> Option<T> {
    if values.is_empty() {
        None
    } else {
        Some(values[random::index(values.len())].clone())
    }
}

pub(crate) fn join<T: Display>(values: &VecDeque<T>, separator: &str) -> String {
    let mut joined = String::new();
    for (position, value) in values.iter().enumerate() {
        if position > 0 {
            joined.push_str(separator);
        }
        let _ = write!(joined, "{value}");
    }
    joined
}

pub(crate) fn count_values<T: Clone + Eq + Hash>(values: &VecDeque<T>) -> HashMap<T, usize> {
    let mut counts = HashMap::with_capacity(values.len());
    for value in values {
        *counts.entry(value.clone()).or_insert(0) += 1;
    }
    counts
}

/// Writes `[a, b, c]`.
pub(crate) fn display<T: Display>(values: &VecDeque<T>, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    formatter.write_str("[")?;
    for (position, value) in values.iter().enumerate() {
        if position > 0 {
            formatter.write_str(", ")?;
        }
        write!(formatter, "{value}")?;
    }
    formatter.write_str("]")
}

// =============================================================================
// Tests
// =============================================================================
