//! # rwarray
//!
//! Ordered and sorted sequence containers whose locking strategy is chosen
//! per instance, at construction.
//!
//! ## Overview
//!
//! - [`Array`]: a growable, index-addressable sequence with positional
//!   mutation, windows (`range`, `sub_slice`, `chunk`), padding, filling and
//!   random sampling.
//! - [`SortedArray`]: a sequence kept in comparator order through binary
//!   search, with optional uniqueness.
//! - [`lock`]: the dual-mode lock. [`Synchronized`](lock::Synchronized)
//!   guards a container with a reader/writer lock;
//!   [`Unsynchronized`](lock::Unsynchronized) performs no synchronization at
//!   all and keeps the container on a single thread.
//! - [`merge`]: feeding one container (or a raw sequence) into another, with
//!   best-effort element conversion from [`convert`].
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` / `Deserialize` for both containers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use rwarray::prelude::*;
//!
//! let array: Array<i32> = Array::from_vec(vec![1, 2, 3]);
//! array.pad(7, 0);
//! assert_eq!(array.to_vec(), vec![1, 2, 3, 0, 0, 0, 0]);
//!
//! let sorted: SortedArray<i32> = SortedArray::new();
//! sorted.merge(&array);
//! assert_eq!(sorted.chunk(4), vec![vec![0, 0, 0, 0], vec![1, 2, 3]]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Mutators return `&Self` for chaining; the result is routinely ignored.
#![allow(clippy::return_self_not_must_use)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use rwarray::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array::{Array, UnsyncArray};
    pub use crate::lock::{LockMode, SharedSeq, Synchronized, Unsynchronized};
    pub use crate::merge::MergeSource;
    pub use crate::sorted::{Comparator, SortedArray, UnsyncSortedArray};
}

mod array;
pub mod convert;
pub mod lock;
pub mod merge;
pub mod random;
mod sorted;
mod window;

pub use array::{Array, UnsyncArray};
pub use sorted::{Comparator, SortedArray, UnsyncSortedArray};

static_assertions::assert_impl_all!(Array<i32>: Send, Sync);
static_assertions::assert_impl_all!(SortedArray<String>: Send, Sync);
static_assertions::assert_not_impl_any!(UnsyncArray<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(UnsyncSortedArray<i32>: Send, Sync);
