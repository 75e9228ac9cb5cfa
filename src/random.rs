//! The process-wide random source behind every randomized operation.
//!
//! `rand`, `rands`, `pop_rand`, `pop_rands` and `shuffle` all draw from one
//! shared generator. The generator is created lazily on first use:
//!
//! - If the `RWARRAY_RNG_SEED` environment variable holds a `u64`, a
//!   deterministic `StdRng` is seeded from it.
//! - Otherwise the generator is seeded from OS entropy.
//!
//! Tests (or any caller) can substitute the source at runtime with [`seed`] or
//! [`install`]. Substitution never affects the structural logic of the
//! containers, only which positions get picked.
//!
//! # Examples
//!
//! ```rust
//! use rwarray::Array;
//!
//! rwarray::random::seed(7);
//!
//! let array: Array<i32> = Array::from_vec(vec![1, 2, 3, 4, 5]);
//! let picked = array.rands(3);
//! assert_eq!(picked.len(), 3);
//! assert!(picked.iter().all(|value| (1..=5).contains(value)));
//! ```

use std::env::VarError;
use std::fmt;
use std::sync::LazyLock;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

/// Environment variable read once to seed the process-wide source.
pub const SEED_ENV_VAR: &str = "RWARRAY_RNG_SEED";

type Source = Box<dyn RngCore + Send>;

static SOURCE: LazyLock<Mutex<Source>> = LazyLock::new(|| Mutex::new(initial_source()));

// =============================================================================
// SeedError
// =============================================================================

/// Error returned by [`seed_from_env`] when the seed variable is present but
/// does not hold a valid `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedError {
    /// The raw value found in the environment.
    pub value: String,
    /// Why the value was rejected.
    pub message: String,
}

impl fmt::Display for SeedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "invalid {SEED_ENV_VAR} value {:?}: {}",
            self.value, self.message
        )
    }
}

impl std::error::Error for SeedError {}

// =============================================================================
// Configuration
// =============================================================================

/// Reads the deterministic seed from [`SEED_ENV_VAR`].
///
/// # Errors
///
/// Returns [`SeedError`] if the variable is set but is not a valid `u64`.
///
/// # Examples
///
/// ```rust
/// // Unset in a plain doctest environment.
/// if std::env::var(rwarray::random::SEED_ENV_VAR).is_err() {
///     assert_eq!(rwarray::random::seed_from_env(), Ok(None));
/// }
/// ```
pub fn seed_from_env() -> Result<Option<u64>, SeedError> {
    match std::env::var(SEED_ENV_VAR) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|error| SeedError {
                message: error.to_string(),
                value,
            }),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(SeedError {
            value: raw.to_string_lossy().into_owned(),
            message: "value is not valid unicode".to_string(),
        }),
    }
}

fn initial_source() -> Source {
    match seed_from_env() {
        Ok(Some(seed)) => {
            tracing::info!(seed = seed, "Using deterministic random source");
            Box::new(StdRng::seed_from_u64(seed))
        }
        Ok(None) => Box::new(StdRng::from_os_rng()),
        Err(error) => {
            tracing::warn!(error = %error, "Ignoring invalid random seed");
            Box::new(StdRng::from_os_rng())
        }
    }
}

// =============================================================================
// Substitution
// =============================================================================

/// Replaces the process-wide source with a `StdRng` seeded from `seed`.
pub fn seed(seed: u64) {
    tracing::info!(seed = seed, "Using deterministic random source");
    install(StdRng::seed_from_u64(seed));
}

/// Replaces the process-wide source with `rng`.
pub fn install<R>(rng: R)
where
    R: RngCore + Send + 'static,
{
    *SOURCE.lock() = Box::new(rng);
}

// =============================================================================
// Crate-internal draws
// =============================================================================

/// Uniform index in `0..upper`. `upper` must be non-zero.
pub(crate) fn index(upper: usize) -> usize {
    let mut source = SOURCE.lock();
    let rng: &mut Source = &mut source;
    rng.random_range(0..upper)
}

/// `amount` distinct indices in `0..length`, in random order.
pub(crate) fn sample(length: usize, amount: usize) -> Vec<usize> {
    let mut source = SOURCE.lock();
    let rng: &mut Source = &mut source;
    rand::seq::index::sample(rng, length, amount.min(length)).into_vec()
}

pub(crate) fn shuffle<T>(values: &mut [T]) {
    let mut source = SOURCE.lock();
    let rng: &mut Source = &mut source;
    values.shuffle(rng);
}

// =============================================================================
// Tests
// =============================================================================
