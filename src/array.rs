//! Ordered, index-addressable sequence container.
//!
//! This module provides [`Array`], a growable sequence of elements of one type
//! whose every operation is gated by the container's [`LockMode`]:
//!
//! - Mutating operations hold the exclusive lock for their whole duration.
//! - Read-only operations hold the shared lock.
//!
//! # Time Complexity
//!
//! | Operation                    | Complexity        |
//! |------------------------------|-------------------|
//! | `get` / `set`                | O(1)              |
//! | `push_right` / `append`      | O(1)* per element |
//! | `push_left`                  | O(1)* per element |
//! | `pop_left` / `pop_right`     | O(1)              |
//! | `remove` (first or last)     | O(1)              |
//! | `remove` (interior)          | O(n)              |
//! | `insert_before/after`        | O(n)              |
//! | `range` / `sub_slice`        | O(k)              |
//! | `search` / `contains`        | O(n)              |
//! | `unique`                     | O(n²)             |
//! | `sort` / `sort_by`           | O(n log n)        |
//!
//! \* amortized
//!
//! The backing store is a ring buffer, so prepending costs the same as
//! appending and removing from either end never shifts the remainder.
//!
//! # Index Contract
//!
//! `get`, `set`, `remove`, `insert_before` and `insert_after` do not validate
//! their index. The caller must guarantee `index < len()`; violating it
//! panics.
//!
//! # Examples
//!
//! ```rust
//! use rwarray::Array;
//!
//! let array: Array<i32> = Array::from_vec(vec![10, 20, 30, 40]);
//!
//! assert_eq!(array.range(1, Some(3)), vec![20, 30]);
//! assert_eq!(array.range(1, None), vec![20, 30, 40]);
//! assert!(array.range(5, None).is_empty());
//!
//! array.push_left([0]).push_right([50]);
//! assert_eq!(array.to_vec(), vec![0, 10, 20, 30, 40, 50]);
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

use crate::lock::{LockMode, SequenceLock, SharedSeq, Synchronized, Unsynchronized};
use crate::random;
use crate::window;

/// An ordered sequence container with a per-instance locking policy.
///
/// `M` selects the policy once, at construction: [`Synchronized`] (the
/// default) guards the sequence with a reader/writer lock, [`Unsynchronized`]
/// performs no synchronization and keeps the container on one thread.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `M` - The lock mode
///
/// # Examples
///
/// ```rust
/// use rwarray::Array;
/// use std::sync::Arc;
/// use std::thread;
///
/// let array = Arc::new(Array::<usize>::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let array = Arc::clone(&array);
///         thread::spawn(move || {
///             for value in 0..100 {
///                 array.push_right([worker * 100 + value]);
///             }
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(array.len(), 400);
/// ```
pub struct Array<T, M: LockMode = Synchronized> {
    inner: SharedSeq<T, M>,
}

/// An [`Array`] with no internal synchronization.
pub type UnsyncArray<T> = Array<T, Unsynchronized>;

// =============================================================================
// Construction
// =============================================================================

impl<T, M: LockMode> Array<T, M> {
    /// Creates an empty array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::{Array, UnsyncArray};
    ///
    /// let array: Array<i32> = Array::new();
    /// assert!(array.is_empty());
    /// assert!(array.is_safe());
    ///
    /// let local: UnsyncArray<i32> = UnsyncArray::new();
    /// assert!(!local.is_safe());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_deque(VecDeque::new())
    }

    /// Creates an array holding `size` default elements, with room for at
    /// least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::with_size(3, 16);
    /// assert_eq!(array.to_vec(), vec![0, 0, 0]);
    /// ```
    #[must_use]
    pub fn with_size(size: usize, capacity: usize) -> Self
    where
        T: Default + Clone,
    {
        let mut values = VecDeque::with_capacity(capacity.max(size));
        values.resize(size, T::default());
        Self::from_deque(values)
    }

    /// Creates an array that takes ownership of `values` without copying.
    #[inline]
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_deque(VecDeque::from(values))
    }

    /// Creates an array from a defensive copy of `values`.
    ///
    /// Later changes to `values` are not visible through the array.
    #[must_use]
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_deque(values.iter().cloned().collect())
    }

    /// Creates an array that aliases a caller-owned shared sequence.
    ///
    /// No copy is made: mutations through the array are visible through
    /// `shared` and vice versa, for as long as either handle lives.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    /// use rwarray::lock::{LockMode, Synchronized};
    /// use std::collections::VecDeque;
    /// use std::sync::Arc;
    ///
    /// let shared = Synchronized::share(VecDeque::from(vec![1, 2]));
    /// let array: Array<i32> = Array::from_shared(Arc::clone(&shared));
    ///
    /// array.push_right([3]);
    /// assert_eq!(shared.read().len(), 3);
    ///
    /// shared.write().push_back(4);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_shared(shared: SharedSeq<T, M>) -> Self {
        Self { inner: shared }
    }

    #[inline]
    fn from_deque(values: VecDeque<T>) -> Self {
        Self {
            inner: M::share(values),
        }
    }

    /// Returns a handle aliasing the live backing sequence.
    #[inline]
    #[must_use]
    pub fn shared(&self) -> SharedSeq<T, M> {
        self.inner.clone()
    }

    /// Returns `true` if this array performs real synchronization.
    #[inline]
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        M::IS_SAFE
    }
}

// =============================================================================
// Indexed Access
// =============================================================================

impl<T, M: LockMode> Array<T, M> {
    /// Returns a copy of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> T
    where
        T: Clone,
    {
        self.inner.read()[index].clone()
    }

    /// Overwrites the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn set(&self, index: usize, value: T) -> &Self {
        self.inner.write()[index] = value;
        self
    }

    /// Replaces the whole backing sequence with `values`.
    pub fn set_array(&self, values: Vec<T>) -> &Self {
        *self.inner.write() = VecDeque::from(values);
        self
    }

    /// Overwrites elements from the front with `values`.
    ///
    /// Only the first `min(values.len(), len())` elements are touched; extra
    /// values are ignored and the rest of the array is left as is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::from_vec(vec![1, 2, 3]);
    /// array.replace([7, 8]);
    /// assert_eq!(array.to_vec(), vec![7, 8, 3]);
    ///
    /// array.replace([4, 5, 6, 9]);
    /// assert_eq!(array.to_vec(), vec![4, 5, 6]);
    /// ```
    pub fn replace<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut guard = self.inner.write();
        for (slot, value) in guard.iter_mut().zip(values) {
            *slot = value;
        }
        drop(guard);
        self
    }

    /// Inserts `value` in front of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_before(&self, index: usize, value: T) -> &Self {
        self.inner.write().insert(index, value);
        self
    }

    /// Inserts `value` right after the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn insert_after(&self, index: usize, value: T) -> &Self {
        self.inner.write().insert(index + 1, value);
        self
    }

    /// Removes and returns the element at `index`.
    ///
    /// Removing the first or last element is O(1); any other index shifts the
    /// remainder and costs O(n).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&self, index: usize) -> T {
        window::remove_at(&mut self.inner.write(), index)
    }
}

// =============================================================================
// Push / Pop
// =============================================================================

impl<T, M: LockMode> Array<T, M> {
    /// Prepends `values`, keeping their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::from_vec(vec![3]);
    /// array.push_left([1, 2]);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn push_left<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let mut guard = self.inner.write();
        guard.reserve(values.len());
        for value in values.into_iter().rev() {
            guard.push_front(value);
        }
        drop(guard);
        self
    }

    /// Appends `values`.
    pub fn push_right<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().extend(values);
        self
    }

    /// Alias of [`push_right`](Self::push_right).
    #[inline]
    pub fn append<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        self.push_right(values)
    }

    /// Removes and returns the first element, or `None` if empty.
    #[inline]
    pub fn pop_left(&self) -> Option<T> {
        self.inner.write().pop_front()
    }

    /// Removes and returns the last element, or `None` if empty.
    #[inline]
    pub fn pop_right(&self) -> Option<T> {
        self.inner.write().pop_back()
    }

    /// Removes and returns a uniformly chosen element, or `None` if empty.
    pub fn pop_rand(&self) -> Option<T> {
        window::pop_random(&mut self.inner.write(), 1).pop()
    }

    /// Removes and returns up to `amount` uniformly chosen elements, without
    /// replacement.
    pub fn pop_rands(&self, amount: usize) -> Vec<T> {
        window::pop_random(&mut self.inner.write(), amount)
    }

    /// Removes and returns up to `amount` elements from the front.
    pub fn pop_lefts(&self, amount: usize) -> Vec<T> {
        window::pop_front_many(&mut self.inner.write(), amount)
    }

    /// Removes and returns up to `amount` elements from the back, in their
    /// original order.
    pub fn pop_rights(&self, amount: usize) -> Vec<T> {
        window::pop_back_many(&mut self.inner.write(), amount)
    }
}

// =============================================================================
// Windows
// =============================================================================

impl<T: Clone, M: LockMode> Array<T, M> {
    /// Returns a copy of the elements in `[max(start, 0), min(end, len))`.
    ///
    /// `end` omitted means "up to the current length". A `start` past the
    /// effective end yields an empty vector.
    #[must_use]
    pub fn range(&self, start: isize, end: Option<isize>) -> Vec<T> {
        let guard = self.inner.read();
        window::copy_window(&guard, window::range_bounds(guard.len(), start, end))
    }

    /// Returns a copy of the window described by `offset` and `size`.
    ///
    /// - A negative `offset` counts from the end.
    /// - `size` omitted takes everything up to the end.
    /// - A negative `size` stops the window that many elements before the end.
    /// - A window that would begin before the first element is empty.
    ///
    /// The end of a negative-size window is measured from the end of the
    /// array, not from `offset`: `sub_slice(1, Some(-1))` on `[1, 2, 3, 4, 5]`
    /// is `[2, 3, 4]`, and only yields `[2, 3]` on `[1, 2, 3, 4]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::from_vec(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(array.sub_slice(-2, Some(2)), vec![4, 5]);
    /// assert_eq!(array.sub_slice(1, Some(-1)), vec![2, 3, 4]);
    /// assert_eq!(array.sub_slice(2, None), vec![3, 4, 5]);
    /// assert!(array.sub_slice(-9, Some(2)).is_empty());
    /// ```
    #[must_use]
    pub fn sub_slice(&self, offset: isize, size: Option<isize>) -> Vec<T> {
        let guard = self.inner.read();
        window::copy_window(&guard, window::sub_slice_bounds(guard.len(), offset, size))
    }

    /// Splits the array into consecutive chunks of `size` elements; the last
    /// chunk may be shorter. A `size` of zero yields no chunks.
    #[must_use]
    pub fn chunk(&self, size: usize) -> Vec<Vec<T>> {
        window::chunks(&self.inner.read(), size)
    }

    /// Materializes the full backing sequence.
    ///
    /// In [`Synchronized`] mode this is a defensive `Vec<T>` copy. In
    /// [`Unsynchronized`] mode it is a handle to the live storage, so later
    /// mutations are visible through it.
    #[inline]
    #[must_use]
    pub fn slice(&self) -> M::View<T> {
        M::view(&self.inner)
    }

    /// Returns a copy of all elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().iter().cloned().collect()
    }
}

// =============================================================================
// Whole-sequence Operations
// =============================================================================

impl<T, M: LockMode> Array<T, M> {
    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) -> &Self {
        self.inner.write().clear();
        self
    }

    /// Sorts in increasing order, or decreasing order when `reverse` is set.
    pub fn sort(&self, reverse: bool) -> &Self
    where
        T: Ord,
    {
        let mut guard = self.inner.write();
        let values = guard.make_contiguous();
        if reverse {
            values.sort_by(|left, right| right.cmp(left));
        } else {
            values.sort();
        }
        drop(guard);
        self
    }

    /// Sorts with a custom comparator.
    pub fn sort_by<F>(&self, compare: F) -> &Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.inner.write().make_contiguous().sort_by(compare);
        self
    }

    /// Removes every duplicate, keeping first occurrences in their original
    /// relative order.
    ///
    /// Every element is compared with every later element, so this costs
    /// O(n²) comparisons. `T` needs no ordering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::from_vec(vec![3, 1, 3, 2, 1]);
    /// array.unique();
    /// assert_eq!(array.to_vec(), vec![3, 1, 2]);
    /// ```
    pub fn unique(&self) -> &Self
    where
        T: PartialEq,
    {
        window::dedup_pairwise(&mut self.inner.write());
        self
    }

    /// Pads to `|size|` elements with `value`: on the right when `size` is
    /// positive, on the left when negative. Nothing happens when `|size|`
    /// does not exceed the current length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::from_vec(vec![1, 2, 3]);
    /// array.pad(5, 0);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3, 0, 0]);
    /// array.pad(-7, 9);
    /// assert_eq!(array.to_vec(), vec![9, 9, 1, 2, 3, 0, 0]);
    /// ```
    pub fn pad(&self, size: isize, value: T) -> &Self
    where
        T: Clone,
    {
        let target = size.unsigned_abs();
        let mut guard = self.inner.write();
        if target > guard.len() {
            if size > 0 {
                guard.resize(target, value);
            } else {
                let missing = target - guard.len();
                guard.reserve(missing);
                for _ in 0..missing {
                    guard.push_front(value.clone());
                }
            }
        }
        drop(guard);
        self
    }

    /// Writes `value` into `count` consecutive slots starting at
    /// `max(start, 0)`, appending once the end of the array is reached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::Array;
    ///
    /// let array: Array<i32> = Array::from_vec(vec![1, 2, 3]);
    /// array.fill(1, 4, 0);
    /// assert_eq!(array.to_vec(), vec![1, 0, 0, 0, 0]);
    /// ```
    pub fn fill(&self, start: isize, count: usize, value: T) -> &Self
    where
        T: Clone,
    {
        let start = start.max(0).unsigned_abs();
        let mut guard = self.inner.write();
        for index in start..start.saturating_add(count) {
            if index < guard.len() {
                guard[index] = value.clone();
            } else {
                guard.push_back(value.clone());
            }
        }
        drop(guard);
        self
    }

    /// Shuffles the elements in place.
    pub fn shuffle(&self) -> &Self {
        random::shuffle(self.inner.write().make_contiguous());
        self
    }

    /// Reverses the elements in place.
    pub fn reverse(&self) -> &Self {
        self.inner.write().make_contiguous().reverse();
        self
    }

    /// Runs `f` with shared access to the backing sequence.
    ///
    /// `f` must not call back into this array.
    pub fn read_with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&VecDeque<T>) -> R,
    {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the backing sequence.
    ///
    /// `f` must not call back into this array.
    pub fn write_with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut VecDeque<T>) -> R,
    {
        f(&mut self.inner.write())
    }
}

// =============================================================================
// Queries
// =============================================================================

impl<T, M: LockMode> Array<T, M> {
    /// Returns the index of the first element equal to `value`.
    #[must_use]
    pub fn search(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.inner.read().iter().position(|element| element == value)
    }

    /// Returns `true` if some element equals `value`.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.search(value).is_some()
    }

    /// Returns the sum of all elements.
    #[must_use]
    pub fn sum(&self) -> T
    where
        T: Clone + Sum,
    {
        self.inner.read().iter().cloned().sum()
    }

    /// Returns a uniformly chosen element, or `None` if empty.
    #[must_use]
    pub fn rand(&self) -> Option<T>
    where
        T: Clone,
    {
        window::random_pick(&self.inner.read())
    }

    /// Returns up to `amount` uniformly chosen elements, without replacement.
    #[must_use]
    pub fn rands(&self, amount: usize) -> Vec<T>
    where
        T: Clone,
    {
        window::random_picks(&self.inner.read(), amount)
    }

    /// Joins the elements' text forms with `separator`.
    #[must_use]
    pub fn join(&self, separator: &str) -> String
    where
        T: fmt::Display,
    {
        window::join(&self.inner.read(), separator)
    }

    /// Counts the occurrences of each distinct element.
    #[must_use]
    pub fn count_values(&self) -> HashMap<T, usize>
    where
        T: Clone + Eq + Hash,
    {
        window::count_values(&self.inner.read())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T, M: LockMode> Default for Array<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy with the same lock mode; the clone does not alias the original.
impl<T: Clone, M: LockMode> Clone for Array<T, M> {
    fn clone(&self) -> Self {
        Self::from_deque(self.inner.read().clone())
    }
}

impl<T, M: LockMode> From<Vec<T>> for Array<T, M> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T, M: LockMode> FromIterator<T> for Array<T, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_deque(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug, M: LockMode> fmt::Debug for Array<T, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.inner.read().iter()).finish()
    }
}

impl<T: fmt::Display, M: LockMode> fmt::Display for Array<T, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        window::display(&self.inner.read(), formatter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, M: LockMode> serde::Serialize for Array<T, M> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let guard = self.inner.read();
        let mut seq = serializer.serialize_seq(Some(guard.len()))?;
        for element in guard.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T, M> serde::Deserialize<'de> for Array<T, M>
where
    T: serde::Deserialize<'de>,
    M: LockMode,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(Self::from_vec)
    }
}

// =============================================================================
// Tests
// =============================================================================
