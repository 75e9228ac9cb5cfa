//! Best-effort element conversion used by `merge`.
//!
//! A value is converted by rendering it with [`Display`] and parsing the text
//! with [`FromStr`]. This covers the common cases between numbers, booleans,
//! characters and strings:
//!
//! | Source      | Target   | Result     |
//! |-------------|----------|------------|
//! | `"42"`      | `i32`    | `42`       |
//! | `42`        | `String` | `"42"`     |
//! | `7u8`       | `i64`    | `7`        |
//! | `"abc"`     | `i32`    | `0`        |
//! | `1.5`       | `i32`    | `1`        |
//! | `"-2.7"`    | `i64`    | `-2`       |
//!
//! Text that does not parse as `T` directly but is a finite decimal number is
//! truncated toward zero and parsed again, so fractional sources reach integer
//! targets.
//!
//! [`coerce`] never fails: when parsing fails it yields the target's
//! `Default` value. [`try_coerce`] reports the failure instead.

use std::any::type_name;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Error returned by [`try_coerce`] when the rendered source cannot be parsed
/// as the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// The source value rendered as text.
    pub input: String,
    /// The name of the target type.
    pub target: &'static str,
}

impl Display for ConversionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "cannot convert {:?} to {}", self.input, self.target)
    }
}

impl std::error::Error for ConversionError {}

/// Converts `value` to `T`, reporting a parse failure.
///
/// # Errors
///
/// Returns [`ConversionError`] when the text form of `value` is not a valid
/// `T`.
///
/// # Examples
///
/// ```rust
/// use rwarray::convert::try_coerce;
///
/// assert_eq!(try_coerce::<_, i32>("12"), Ok(12));
/// assert!(try_coerce::<_, i32>("twelve").is_err());
/// ```
pub fn try_coerce<S, T>(value: &S) -> Result<T, ConversionError>
where
    S: Display + ?Sized,
    T: FromStr,
{
    let input = value.to_string();
    if let Ok(parsed) = input.parse::<T>() {
        return Ok(parsed);
    }
    truncated(&input)
        .and_then(|integral| integral.parse::<T>().ok())
        .ok_or_else(|| ConversionError {
            input,
            target: type_name::<T>(),
        })
}

/// The integral part of `input` as text, if `input` is a finite number.
fn truncated(input: &str) -> Option<String> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .map(|number| number.trunc().to_string())
}

/// Converts `value` to `T`, falling back to `T::default()` on failure.
///
/// # Examples
///
/// ```rust
/// use rwarray::convert::coerce;
///
/// assert_eq!(coerce::<_, i32>("12"), 12);
/// assert_eq!(coerce::<_, i32>("twelve"), 0);
/// assert_eq!(coerce::<_, String>(&12), "12");
/// ```
pub fn coerce<S, T>(value: &S) -> T
where
    S: Display + ?Sized,
    T: FromStr + Default,
{
    try_coerce(value).unwrap_or_else(|error| {
        tracing::debug!(error = %error, "Conversion fell back to default value");
        T::default()
    })
}
