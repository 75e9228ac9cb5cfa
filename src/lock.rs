//! Dual-mode locking for the containers in this crate.
//!
//! Every container owns its backing sequence behind a lock whose kind is
//! chosen once, at construction, through the container's `M: LockMode` type
//! parameter:
//!
//! - [`Synchronized`]: a real reader/writer lock (`parking_lot::RwLock`)
//!   shared through an `Arc`. Any number of readers, or exactly one writer.
//! - [`Unsynchronized`]: a `RefCell` shared through an `Rc`. No
//!   synchronization primitive is involved at all.
//!
//! Because the mode is a type, a container can never switch modes and the hot
//! paths never branch on a runtime flag.
//!
//! # Thread Safety
//!
//! Containers in [`Synchronized`] mode are `Send + Sync` whenever their
//! elements are. Containers in [`Unsynchronized`] mode are neither `Send` nor
//! `Sync`: the compiler enforces that the caller serializes access by keeping
//! the container on one thread.
//!
//! # Re-entry
//!
//! Locks are not reentrant. Calling back into a container from inside one of
//! its lock-scoped callbacks deadlocks in [`Synchronized`] mode and panics with
//! a borrow fault in [`Unsynchronized`] mode.
//!
//! # Examples
//!
//! ```rust
//! use rwarray::lock::{LockMode, Synchronized};
//! use std::collections::VecDeque;
//!
//! let shared = Synchronized::share(VecDeque::from(vec![1, 2, 3]));
//! shared.write().push_back(4);
//! assert_eq!(shared.read().len(), 4);
//! assert!(Synchronized::IS_SAFE);
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

// =============================================================================
// SequenceLock
// =============================================================================

/// Shared and exclusive access to a guarded value.
///
/// Acquisition happens when a guard is created and release happens when the
/// guard is dropped.
pub trait SequenceLock<T> {
    /// Guard held while shared access is in progress.
    type ReadGuard<'a>: Deref<Target = T>
    where
        Self: 'a;

    /// Guard held while exclusive access is in progress.
    type WriteGuard<'a>: DerefMut<Target = T>
    where
        Self: 'a;

    /// Acquires shared access, blocking until no writer holds the lock.
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Acquires exclusive access, blocking until no other holder remains.
    fn write(&self) -> Self::WriteGuard<'_>;
}

impl<T> SequenceLock<T> for RwLock<T> {
    type ReadGuard<'a>
        = RwLockReadGuard<'a, T>
    where
        Self: 'a;

    type WriteGuard<'a>
        = RwLockWriteGuard<'a, T>
    where
        Self: 'a;

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        Self::read(self)
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        Self::write(self)
    }
}

impl<T> SequenceLock<T> for RefCell<T> {
    type ReadGuard<'a>
        = Ref<'a, T>
    where
        Self: 'a;

    type WriteGuard<'a>
        = RefMut<'a, T>
    where
        Self: 'a;

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        self.borrow()
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        self.borrow_mut()
    }
}

// =============================================================================
// LockMode
// =============================================================================

/// The locking policy of a container, fixed for the container's lifetime.
///
/// This trait is implemented by exactly two marker types, [`Synchronized`]
/// and [`Unsynchronized`].
pub trait LockMode: Sized + 'static {
    /// The lock wrapping the backing value.
    type Lock<T>: SequenceLock<T>;

    /// A shared-ownership handle to a lock; cloning it aliases the value.
    type Shared<T>: Clone + Deref<Target = Self::Lock<T>>;

    /// What materializing the full backing sequence yields in this mode.
    type View<T>;

    /// `true` when this mode performs real synchronization.
    const IS_SAFE: bool;

    /// Wraps `value` in this mode's lock behind a shared handle.
    fn share<T>(value: T) -> Self::Shared<T>;

    /// Materializes the full backing sequence held by `shared`.
    fn view<T: Clone>(shared: &Self::Shared<VecDeque<T>>) -> Self::View<T>;
}

/// Real reader/writer locking. The default mode of every container.
///
/// [`LockMode::view`] returns a defensive `Vec<T>` copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Synchronized;

impl LockMode for Synchronized {
    type Lock<T> = RwLock<T>;
    type Shared<T> = Arc<RwLock<T>>;
    type View<T> = Vec<T>;

    const IS_SAFE: bool = true;

    #[inline]
    fn share<T>(value: T) -> Self::Shared<T> {
        Arc::new(RwLock::new(value))
    }

    fn view<T: Clone>(shared: &Self::Shared<VecDeque<T>>) -> Self::View<T> {
        shared.read().iter().cloned().collect()
    }
}

/// No synchronization at all.
///
/// [`LockMode::view`] returns another handle to the live backing storage, so
/// later mutations through the container are visible through the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unsynchronized;

impl LockMode for Unsynchronized {
    type Lock<T> = RefCell<T>;
    type Shared<T> = Rc<RefCell<T>>;
    type View<T> = Rc<RefCell<VecDeque<T>>>;

    const IS_SAFE: bool = false;

    #[inline]
    fn share<T>(value: T) -> Self::Shared<T> {
        Rc::new(RefCell::new(value))
    }

    #[inline]
    fn view<T: Clone>(shared: &Self::Shared<VecDeque<T>>) -> Self::View<T> {
        Rc::clone(shared)
    }
}

/// The shared backing sequence of a container in mode `M`.
///
/// Passing a clone of this handle to a `from_shared` constructor makes the
/// container and the caller observe each other's mutations.
pub type SharedSeq<T, M = Synchronized> = <M as LockMode>::Shared<VecDeque<T>>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_mode_flags() {
        assert!(Synchronized::IS_SAFE);
        assert!(!Unsynchronized::IS_SAFE);
    }

    #[rstest]
    fn test_synchronized_share_aliases_value() {
        let shared = Synchronized::share(VecDeque::from(vec![1, 2]));
        let alias = Arc::clone(&shared);
        alias.write().push_back(3);
        assert_eq!(shared.read().len(), 3);
    }

    #[rstest]
    fn test_synchronized_view_is_a_copy() {
        let shared = Synchronized::share(VecDeque::from(vec![1, 2]));
        let view = Synchronized::view(&shared);
        shared.write().push_back(3);
        assert_eq!(view, vec![1, 2]);
    }

    #[rstest]
    fn test_unsynchronized_view_is_live() {
        let shared = Unsynchronized::share(VecDeque::from(vec![1, 2]));
        let view = Unsynchronized::view(&shared);
        SequenceLock::write(&*shared).push_back(3);
        assert_eq!(view.borrow().len(), 3);
    }

    #[rstest]
    fn test_concurrent_readers_share_the_lock() {
        let lock = RwLock::new(5);
        let first = SequenceLock::read(&lock);
        let second = SequenceLock::read(&lock);
        assert_eq!(*first + *second, 10);
    }
}
