//! Error types for the forgetmap library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when map configuration parameters are invalid
//!   (the only configurable parameter is the capacity, which must be positive).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use forgetmap::ForgettingMap;
//! use forgetmap::error::ConfigError;
//!
//! // Fallible constructor for user-configurable parameters
//! let map: Result<ForgettingMap<String, i32>, ConfigError> =
//!     ForgettingMap::try_with_capacity(100);
//! assert!(map.is_ok());
//!
//! // A zero capacity is caught without panicking
//! let bad = ForgettingMap::<String, i32>::try_with_capacity(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when map configuration parameters are invalid.
///
/// Produced by [`ForgettingMap::try_with_capacity`](crate::map::ForgettingMap::try_with_capacity)
/// when the requested capacity is zero. Carries a human-readable description
/// of which parameter failed validation.
///
/// # Example
///
/// ```
/// use forgetmap::ForgettingMap;
///
/// let err = ForgettingMap::<u64, u64>::try_with_capacity(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal map invariants are violated.
///
/// Produced by debug-only `check_invariants` methods on the store and the
/// map. Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
