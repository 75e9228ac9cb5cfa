//! Sequence container kept in comparator order.
//!
//! [`SortedArray`] keeps its backing sequence sorted by a comparator fixed at
//! construction. New elements are placed with a binary search, so the sequence
//! is sorted after every single insertion. Uniqueness can be switched on at
//! runtime; when it is on, no two adjacent elements compare equal.
//!
//! Only order-preserving operations are exposed: [`add`](SortedArray::add),
//! removal, and reads. Positional writes such as `set`, `insert_before` or
//! `replace` do not exist on this type.
//!
//! # Time Complexity
//!
//! | Operation                    | Complexity    |
//! |------------------------------|---------------|
//! | `binary_search` / `search`   | O(log n)      |
//! | `add` (per element)          | O(n)          |
//! | `pop_left` / `pop_right`     | O(1)          |
//! | `remove` (interior)          | O(n)          |
//! | `unique`                     | O(n)          |
//!
//! # Examples
//!
//! ```rust
//! use rwarray::SortedArray;
//!
//! let array: SortedArray<&str> = SortedArray::new();
//! array.add(["pear", "apple", "fig", "apple"]);
//! assert_eq!(array.to_vec(), vec!["apple", "apple", "fig", "pear"]);
//! assert_eq!(array.search(&"fig"), Some(2));
//!
//! array.set_unique(true);
//! assert_eq!(array.to_vec(), vec!["apple", "fig", "pear"]);
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;
use std::sync::atomic::{self, AtomicBool};

use crate::lock::{LockMode, SequenceLock, SharedSeq, Synchronized, Unsynchronized};
use crate::window;

/// Total order used by a [`SortedArray`].
///
/// Non-capturing closures coerce to this type.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// A sequence container that stays sorted by its comparator.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `M` - The lock mode, [`Synchronized`] by default
///
/// # Examples
///
/// ```rust
/// use rwarray::SortedArray;
///
/// let descending: SortedArray<i32> = SortedArray::new_by(|left, right| right.cmp(left));
/// descending.add([2, 9, 4]);
/// assert_eq!(descending.to_vec(), vec![9, 4, 2]);
/// ```
pub struct SortedArray<T, M: LockMode = Synchronized> {
    inner: SharedSeq<T, M>,
    comparator: Comparator<T>,
    unique: AtomicBool,
}

/// A [`SortedArray`] with no internal synchronization.
pub type UnsyncSortedArray<T> = SortedArray<T, Unsynchronized>;

/// Locates `value` in the sorted `values`.
///
/// Returns the last probed index together with `compare(value, probed)`, or
/// `None` when `values` is empty.
fn locate<T>(values: &VecDeque<T>, value: &T, compare: Comparator<T>) -> Option<(usize, Ordering)> {
    if values.is_empty() {
        return None;
    }
    // Inclusive bounds; the loop always probes at least once.
    let mut low = 0;
    let mut high = values.len() - 1;
    loop {
        let middle = low + (high - low) / 2;
        let ordering = compare(value, &values[middle]);
        match ordering {
            Ordering::Less if middle > low => high = middle - 1,
            Ordering::Greater if middle < high => low = middle + 1,
            _ => return Some((middle, ordering)),
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T: Ord, M: LockMode> SortedArray<T, M> {
    /// Creates an empty array ordered by `T`'s natural order.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::new_by(T::cmp)
    }

    /// Creates an empty array with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_deque(VecDeque::with_capacity(capacity), T::cmp)
    }

    /// Creates an array that takes ownership of `values` and sorts them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::SortedArray;
    ///
    /// let array: SortedArray<i32> = SortedArray::from_vec(vec![3, 1, 2]);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_vec_by(values, T::cmp)
    }

    /// Creates an array from a sorted copy of `values`.
    #[must_use]
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_vec_by(values.to_vec(), T::cmp)
    }

    /// Creates an array aliasing `shared`, sorting it in place first.
    #[must_use]
    pub fn from_shared(shared: SharedSeq<T, M>) -> Self {
        Self::from_shared_by(shared, T::cmp)
    }
}

impl<T, M: LockMode> SortedArray<T, M> {
    /// Creates an empty array ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn new_by(comparator: Comparator<T>) -> Self {
        Self::from_deque(VecDeque::new(), comparator)
    }

    /// Creates an array that takes ownership of `values` and sorts them by
    /// `comparator`.
    #[must_use]
    pub fn from_vec_by(values: Vec<T>, comparator: Comparator<T>) -> Self {
        let mut values = VecDeque::from(values);
        values.make_contiguous().sort_by(comparator);
        Self::from_deque(values, comparator)
    }

    /// Creates an array aliasing `shared`, sorting it in place by
    /// `comparator` first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::SortedArray;
    /// use rwarray::lock::{LockMode, Synchronized};
    /// use std::collections::VecDeque;
    /// use std::sync::Arc;
    ///
    /// let shared = Synchronized::share(VecDeque::from(vec![5, 1, 3]));
    /// let array: SortedArray<i32> = SortedArray::from_shared(Arc::clone(&shared));
    ///
    /// assert_eq!(*shared.read(), VecDeque::from(vec![1, 3, 5]));
    /// array.add([4]);
    /// assert_eq!(*shared.read(), VecDeque::from(vec![1, 3, 4, 5]));
    /// ```
    #[must_use]
    pub fn from_shared_by(shared: SharedSeq<T, M>, comparator: Comparator<T>) -> Self {
        shared.write().make_contiguous().sort_by(comparator);
        Self {
            inner: shared,
            comparator,
            unique: AtomicBool::new(false),
        }
    }

    #[inline]
    fn from_deque(values: VecDeque<T>, comparator: Comparator<T>) -> Self {
        Self {
            inner: M::share(values),
            comparator,
            unique: AtomicBool::new(false),
        }
    }

    /// Returns a handle aliasing the live backing sequence.
    ///
    /// Writes through the handle bypass ordering; call
    /// [`sort`](Self::sort) afterwards.
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

    /// Returns the comparator fixed at construction.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> Comparator<T> {
        self.comparator
    }
}

// =============================================================================
// Ordered Insertion and Lookup
// =============================================================================

impl<T, M: LockMode> SortedArray<T, M> {
    /// Binary search for `value`.
    ///
    /// Returns `(index, ordering)` where `ordering` compares `value` with the
    /// element at `index`: `Equal` is an exact match, `Less` / `Greater` mean
    /// `value` sorts right before / after that element. Returns `None` on an
    /// empty array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::SortedArray;
    /// use std::cmp::Ordering;
    ///
    /// let array: SortedArray<i32> = SortedArray::from_vec(vec![10, 20, 30]);
    /// assert_eq!(array.binary_search(&20), Some((1, Ordering::Equal)));
    /// assert_eq!(array.binary_search(&35), Some((2, Ordering::Greater)));
    /// assert_eq!(SortedArray::<i32>::new().binary_search(&1), None);
    /// ```
    #[must_use]
    pub fn binary_search(&self, value: &T) -> Option<(usize, Ordering)> {
        locate(&self.inner.read(), value, self.comparator)
    }

    /// Inserts each of `values` at its sorted position, in the given order.
    ///
    /// With uniqueness on, a value equal to an existing element is skipped.
    /// Equal values are otherwise placed in front of the matching element.
    pub fn add<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut guard = self.inner.write();
        let unique = self.is_unique();
        for value in values {
            match locate(&guard, &value, self.comparator) {
                None => guard.push_back(value),
                Some((_, Ordering::Equal)) if unique => {}
                Some((index, Ordering::Greater)) => guard.insert(index + 1, value),
                Some((index, _)) => guard.insert(index, value),
            }
        }
        drop(guard);
        self
    }

    /// Returns the index of an element equal to `value`.
    #[must_use]
    pub fn search(&self, value: &T) -> Option<usize> {
        match self.binary_search(value) {
            Some((index, Ordering::Equal)) => Some(index),
            _ => None,
        }
    }

    /// Returns `true` if some element equals `value`.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

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
}

// =============================================================================
// Uniqueness and Ordering Maintenance
// =============================================================================

impl<T, M: LockMode> SortedArray<T, M> {
    /// Switches uniqueness on or off.
    ///
    /// Switching it on removes the duplicates already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::SortedArray;
    ///
    /// let array: SortedArray<&str> = SortedArray::from_vec(vec!["a", "a", "b"]);
    /// array.set_unique(true);
    /// assert_eq!(array.to_vec(), vec!["a", "b"]);
    ///
    /// array.add(["b", "c"]);
    /// assert_eq!(array.to_vec(), vec!["a", "b", "c"]);
    /// ```
    pub fn set_unique(&self, unique: bool) -> &Self {
        // The flag only changes under the write lock, so `add` never sees a
        // flag that disagrees with the contents.
        let mut guard = self.inner.write();
        let previous = self.unique.swap(unique, atomic::Ordering::AcqRel);
        if unique && !previous {
            self.dedup(&mut guard);
        }
        drop(guard);
        self
    }

    /// Returns `true` if uniqueness is on.
    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique.load(atomic::Ordering::Acquire)
    }

    /// Removes duplicates in a single linear pass over adjacent pairs.
    pub fn unique(&self) -> &Self {
        self.dedup(&mut self.inner.write());
        self
    }

    fn dedup(&self, values: &mut VecDeque<T>) {
        let removed = window::dedup_adjacent(values, self.comparator);
        tracing::trace!(removed = removed, "Removed duplicates from sorted array");
    }

    /// Re-sorts the backing sequence.
    ///
    /// Only needed after writes through an aliased handle.
    pub fn sort(&self) -> &Self {
        self.normalize(&mut self.inner.write());
        self
    }

    /// Replaces the whole backing sequence with `values`, sorted.
    pub fn set_array(&self, values: Vec<T>) -> &Self {
        let mut guard = self.inner.write();
        *guard = VecDeque::from(values);
        self.normalize(&mut guard);
        drop(guard);
        self
    }

    fn normalize(&self, values: &mut VecDeque<T>) {
        values.make_contiguous().sort_by(self.comparator);
        if self.is_unique() {
            window::dedup_adjacent(values, self.comparator);
        }
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

    /// Runs `f` with exclusive access to the backing sequence, then restores
    /// the ordering (and uniqueness, if on) before releasing the lock.
    ///
    /// `f` must not call back into this array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwarray::SortedArray;
    ///
    /// let array: SortedArray<i32> = SortedArray::from_vec(vec![1, 2, 3]);
    /// array.write_with(|values| values.push_front(10));
    /// assert_eq!(array.to_vec(), vec![1, 2, 3, 10]);
    /// ```
    pub fn write_with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut VecDeque<T>) -> R,
    {
        let mut guard = self.inner.write();
        let result = f(&mut guard);
        self.normalize(&mut guard);
        result
    }
}

// =============================================================================
// Removal
// =============================================================================

impl<T, M: LockMode> SortedArray<T, M> {
    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&self, index: usize) -> T {
        window::remove_at(&mut self.inner.write(), index)
    }

    /// Removes and returns the smallest element, or `None` if empty.
    #[inline]
    pub fn pop_left(&self) -> Option<T> {
        self.inner.write().pop_front()
    }

    /// Removes and returns the largest element, or `None` if empty.
    #[inline]
    pub fn pop_right(&self) -> Option<T> {
        self.inner.write().pop_back()
    }

    /// Removes and returns a uniformly chosen element, or `None` if empty.
    pub fn pop_rand(&self) -> Option<T> {
        window::pop_random(&mut self.inner.write(), 1).pop()
    }

    /// Removes and returns up to `amount` uniformly chosen elements.
    pub fn pop_rands(&self, amount: usize) -> Vec<T> {
        window::pop_random(&mut self.inner.write(), amount)
    }

    /// Removes and returns up to `amount` elements from the front.
    pub fn pop_lefts(&self, amount: usize) -> Vec<T> {
        window::pop_front_many(&mut self.inner.write(), amount)
    }

    /// Removes and returns up to `amount` elements from the back.
    pub fn pop_rights(&self, amount: usize) -> Vec<T> {
        window::pop_back_many(&mut self.inner.write(), amount)
    }

    /// Removes every element.
    pub fn clear(&self) -> &Self {
        self.inner.write().clear();
        self
    }
}

// =============================================================================
// Reads
// =============================================================================

impl<T, M: LockMode> SortedArray<T, M> {
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

    /// See [`Array::range`](crate::Array::range).
    #[must_use]
    pub fn range(&self, start: isize, end: Option<isize>) -> Vec<T>
    where
        T: Clone,
    {
        let guard = self.inner.read();
        window::copy_window(&guard, window::range_bounds(guard.len(), start, end))
    }

    /// See [`Array::sub_slice`](crate::Array::sub_slice).
    #[must_use]
    pub fn sub_slice(&self, offset: isize, size: Option<isize>) -> Vec<T>
    where
        T: Clone,
    {
        let guard = self.inner.read();
        window::copy_window(&guard, window::sub_slice_bounds(guard.len(), offset, size))
    }

    /// See [`Array::chunk`](crate::Array::chunk).
    #[must_use]
    pub fn chunk(&self, size: usize) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        window::chunks(&self.inner.read(), size)
    }

    /// See [`Array::slice`](crate::Array::slice).
    #[inline]
    #[must_use]
    pub fn slice(&self) -> M::View<T>
    where
        T: Clone,
    {
        M::view(&self.inner)
    }

    /// Returns a copy of all elements, in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().iter().cloned().collect()
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

impl<T: Ord, M: LockMode> Default for SortedArray<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy keeping the comparator, uniqueness flag and lock mode.
impl<T: Clone, M: LockMode> Clone for SortedArray<T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: M::share(self.inner.read().clone()),
            comparator: self.comparator,
            unique: AtomicBool::new(self.is_unique()),
        }
    }
}

impl<T: Ord, M: LockMode> FromIterator<T> for SortedArray<T, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug, M: LockMode> fmt::Debug for SortedArray<T, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SortedArray")
            .field("values", &*self.inner.read())
            .field("unique", &self.is_unique())
            .finish()
    }
}

impl<T: fmt::Display, M: LockMode> fmt::Display for SortedArray<T, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        window::display(&self.inner.read(), formatter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, M: LockMode> serde::Serialize for SortedArray<T, M> {
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
impl<'de, T, M> serde::Deserialize<'de> for SortedArray<T, M>
where
    T: serde::Deserialize<'de> + Ord,
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
