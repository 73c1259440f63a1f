//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when engine configuration parameters are
//!   invalid (zero sizes, too few queues, zero expiry intervals).
//! - [`KeyError`]: Returned when cache-key composition is invalid
//!   (duplicate named argument).
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::policy::lru::LruCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::new(100);
//! assert!(cache.is_ok());
//!
//! // Invalid size is caught without panicking
//! let bad = LruCache::<String, i32>::new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when engine configuration parameters are invalid.
///
/// Produced by engine constructors such as
/// [`LruCache::new`](crate::policy::lru::LruCache::new) and
/// [`Engine::new`](crate::builder::Engine::new). Carries a human-readable
/// description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use memokit::policy::mq::{MqCache, MqConfig};
///
/// let err = MqCache::<u64, u64>::new(MqConfig::new(8, 4, 2).num_queues(1)).unwrap_err();
/// assert!(err.to_string().contains("num_queues"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::error::ConfigError;
    ///
    /// let err = ConfigError::new("size must be > 0");
    /// assert_eq!(err.to_string(), "size must be > 0");
    /// ```
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::error::ConfigError;
    ///
    /// let err = ConfigError::new("num_queues must be >= 2");
    /// assert_eq!(err.message(), "num_queues must be >= 2");
    /// ```
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
// KeyError
// ---------------------------------------------------------------------------

/// Error returned when cache-key composition is invalid.
///
/// Produced by [`KeyBuilder::finish`](crate::key::KeyBuilder::finish) when
/// the same named argument is supplied more than once. Hashability is
/// enforced at compile time, so this is the only runtime key error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyError(String);

impl KeyError {
    /// Creates a new `KeyError` with the given description.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::error::KeyError;
    ///
    /// let err = KeyError::new("duplicate keyword argument `page`");
    /// assert_eq!(err.to_string(), "duplicate keyword argument `page`");
    /// ```
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::error::KeyError;
    ///
    /// let err = KeyError::new("duplicate keyword argument `x`");
    /// assert_eq!(err.message(), "duplicate keyword argument `x`");
    /// ```
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for KeyError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("size must be > 0");
        assert_eq!(err.to_string(), "size must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad queue count");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad queue count"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- KeyError ---------------------------------------------------------

    #[test]
    fn key_display_shows_message() {
        let err = KeyError::new("duplicate keyword argument `x`");
        assert_eq!(err.to_string(), "duplicate keyword argument `x`");
    }

    #[test]
    fn key_clone_and_eq() {
        let a = KeyError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn key_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<KeyError>();
    }
}
