//! Error types returned by [`LruCache`](crate::LruCache) operations.
//!
//! Every error is synchronous and local to the call that produced it. The cache
//! performs no retries: all operations are deterministic and in-memory, so there
//! is nothing transient to retry.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`CacheError::InvalidConfiguration`] | `try_new(0)`, `init` with a zero capacity |
//! | [`CacheError::MissingKey`] | `get`, `get_mut`, `remove`, `pop` on an absent key |
//! | [`CacheError::EmptyContainer`] | `pop_item` on an empty cache |
//!
//! # Example
//!
//! ```
//! use lru_dict::{CacheError, LruCache};
//!
//! let mut cache: LruCache<&str, i32> = LruCache::try_new(2).unwrap();
//! cache.put("a", 1);
//!
//! match cache.get(&"b") {
//!     Err(CacheError::MissingKey(key)) => assert_eq!(key, "b"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//!
//! assert!(LruCache::<&str, i32>::try_new(0).is_err());
//! ```

use core::fmt;

/// Result alias used throughout the crate.
pub type Result<T, K> = core::result::Result<T, CacheError<K>>;

/// Errors raised by the cache engine.
///
/// `K` is the key type of the cache, so that [`CacheError::MissingKey`] can hand
/// the offending key back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError<K> {
    /// A construction parameter was rejected (e.g. a zero capacity).
    InvalidConfiguration {
        /// Which parameter failed validation.
        reason: &'static str,
    },

    /// The requested key is not resident.
    MissingKey(K),

    /// A positional removal was attempted on a cache with no entries.
    EmptyContainer,
}

impl<K> CacheError<K> {
    /// Returns the key carried by a [`CacheError::MissingKey`] error.
    pub fn key(&self) -> Option<&K> {
        match self {
            CacheError::MissingKey(key) => Some(key),
            _ => None,
        }
    }

    /// Consumes the error and returns the missing key, if any.
    pub fn into_key(self) -> Option<K> {
        match self {
            CacheError::MissingKey(key) => Some(key),
            _ => None,
        }
    }

    /// Returns `true` for [`CacheError::MissingKey`].
    pub fn is_missing_key(&self) -> bool {
        matches!(self, CacheError::MissingKey(_))
    }
}

impl<K: fmt::Debug> fmt::Display for CacheError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {}", reason)
            }
            CacheError::MissingKey(key) => write!(f, "key not found: {:?}", key),
            CacheError::EmptyContainer => write!(f, "cache is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl<K: fmt::Debug> std::error::Error for CacheError<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        let err: CacheError<&str> = CacheError::InvalidConfiguration {
            reason: "capacity must be greater than zero",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: capacity must be greater than zero"
        );

        let err = CacheError::MissingKey("apple");
        assert_eq!(err.to_string(), "key not found: \"apple\"");

        let err: CacheError<u32> = CacheError::EmptyContainer;
        assert_eq!(err.to_string(), "cache is empty");
    }

    #[test]
    fn test_key_accessors() {
        let err = CacheError::MissingKey(7u32);
        assert!(err.is_missing_key());
        assert_eq!(err.key(), Some(&7));
        assert_eq!(err.into_key(), Some(7));

        let err: CacheError<u32> = CacheError::EmptyContainer;
        assert!(!err.is_missing_key());
        assert_eq!(err.key(), None);
        assert_eq!(err.into_key(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CacheError<u32>>();
    }
}
