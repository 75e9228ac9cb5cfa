//! Merging elements from any container variant or raw sequence.
//!
//! Both [`Array::merge`] and [`SortedArray::merge`] accept anything that
//! implements [`MergeSource`]: either container in either lock mode, with any
//! element type, as well as `Vec`, `VecDeque`, slices and arrays.
//!
//! Every source element goes through [`coerce`](crate::convert::coerce), so a
//! value that cannot be converted becomes the target type's default instead of
//! aborting the merge.
//!
//! # Examples
//!
//! ```rust
//! use rwarray::{Array, SortedArray};
//!
//! let numbers: Array<i32> = Array::from_vec(vec![9]);
//! let words: SortedArray<String> = SortedArray::from_vec(vec!["1".into(), "2".into(), "3".into()]);
//!
//! numbers.merge(&words);
//! assert_eq!(numbers.to_vec(), vec![9, 1, 2, 3]);
//!
//! numbers.merge(&["4", "x"]);
//! assert_eq!(numbers.to_vec(), vec![9, 1, 2, 3, 4, 0]);
//! ```

use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;

use crate::array::Array;
use crate::convert::coerce;
use crate::lock::LockMode;
use crate::sorted::SortedArray;

/// A collection whose elements can be merged into a container.
pub trait MergeSource {
    /// The element type of the source.
    type Item: Display;

    /// Returns a snapshot of the elements, in order.
    fn merge_items(&self) -> Vec<Self::Item>;
}

impl<S: Display + Clone, M: LockMode> MergeSource for Array<S, M> {
    type Item = S;

    fn merge_items(&self) -> Vec<S> {
        self.to_vec()
    }
}

impl<S: Display + Clone, M: LockMode> MergeSource for SortedArray<S, M> {
    type Item = S;

    fn merge_items(&self) -> Vec<S> {
        self.to_vec()
    }
}

impl<S: Display + Clone> MergeSource for [S] {
    type Item = S;

    fn merge_items(&self) -> Vec<S> {
        self.to_vec()
    }
}

impl<S: Display + Clone, const N: usize> MergeSource for [S; N] {
    type Item = S;

    fn merge_items(&self) -> Vec<S> {
        self.to_vec()
    }
}

impl<S: Display + Clone> MergeSource for Vec<S> {
    type Item = S;

    fn merge_items(&self) -> Vec<S> {
        self.clone()
    }
}

impl<S: Display + Clone> MergeSource for VecDeque<S> {
    type Item = S;

    fn merge_items(&self) -> Vec<S> {
        self.iter().cloned().collect()
    }
}

fn converted<Source, T>(source: &Source) -> Vec<T>
where
    Source: MergeSource + ?Sized,
    T: FromStr + Default,
{
    source.merge_items().iter().map(coerce).collect()
}

impl<T, M: LockMode> Array<T, M> {
    /// Appends every element of `source`, converted to `T`.
    ///
    /// The source is snapshotted before this array is locked, so merging an
    /// array into itself is allowed.
    pub fn merge<Source>(&self, source: &Source) -> &Self
    where
        Source: MergeSource + ?Sized,
        T: FromStr + Default,
    {
        let values: Vec<T> = converted(source);
        self.push_right(values)
    }
}

impl<T, M: LockMode> SortedArray<T, M> {
    /// Adds every element of `source`, converted to `T`, at its sorted
    /// position.
    pub fn merge<Source>(&self, source: &Source) -> &Self
    where
        Source: MergeSource + ?Sized,
        T: FromStr + Default,
    {
        let values: Vec<T> = converted(source);
        self.add(values)
    }
}
