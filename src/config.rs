//! Cache Configuration
//!
//! Configuration structs have public fields for simple instantiation and are
//! validated when the cache is built, so an invalid configuration is reported
//! as a [`CacheError::InvalidConfiguration`] instead of a panic.
//!
//! # Sizing
//!
//! `capacity` is an entry count, not a byte budget. Each resident entry costs
//! the size of its key (stored twice: once in the index, once in the slot), its
//! value, and roughly 40 bytes of index and link overhead.
//!
//! # Examples
//!
//! ```
//! use lru_dict::config::LruCacheConfig;
//! use lru_dict::LruCache;
//!
//! let config = LruCacheConfig { capacity: 1000 };
//! let cache: LruCache<String, i32> = LruCache::init(config, None).unwrap();
//! assert_eq!(cache.cap(), 1000);
//!
//! let config = LruCacheConfig { capacity: 0 };
//! assert!(LruCache::<String, i32>::init(config, None).is_err());
//! ```

use crate::error::{CacheError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Fields
///
/// - `capacity`: Maximum number of resident entries. Must be greater than zero
///   at construction; it may later be lowered to zero with
///   [`LruCache::resize`](crate::LruCache::resize).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Creates a configuration from a capacity that is known to be non-zero.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: capacity.get(),
        }
    }

    /// Checks the configuration, returning the validated capacity.
    pub fn validate<K>(&self) -> Result<NonZeroUsize, K> {
        NonZeroUsize::new(self.capacity).ok_or(CacheError::InvalidConfiguration {
            reason: "capacity must be greater than zero",
        })
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self::new(capacity)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
