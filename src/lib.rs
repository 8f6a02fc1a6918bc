#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Core Types
//!
//! | Type | Role |
//! |------|------|
//! | [`LruCache`] | The bounded map and its recency order |
//! | [`LruCacheConfig`](config::LruCacheConfig) | Validated construction parameters |
//! | [`EvictionCallback`] | Boxed `FnMut(K, V)` run for every evicted entry |
//! | [`CacheError`] | `InvalidConfiguration`, `MissingKey`, `EmptyContainer` |
//! | [`CacheEntry`] | A resident key/value pair |
//! | [`CacheMetrics`] | Counter snapshot shared with other cache implementations |
//!
//! ## Operation Reference
//!
//! | Operation | Promotes | Counts hit/miss | Can evict | Callback |
//! |-----------|----------|-----------------|-----------|----------|
//! | `get` / `get_mut` / `get_or` | on hit | yes | no | no |
//! | `contains` | no | no | no | no |
//! | `put` (new key) | yes | no | yes | on eviction |
//! | `put` (resident key) | yes | no | no | no |
//! | `remove` | n/a | no | no | no |
//! | `pop` / `pop_or` | n/a | yes | no | no |
//! | `pop_item` / `pop_lru` / `pop_mru` | n/a | no | no | no |
//! | `peek_first` / `peek_last` | no | no | no | no |
//! | `keys` / `values` / `iter` | no | no | no | no |
//! | `resize` | no | no | yes | on eviction |
//! | `clear` | n/a | resets | no | no |
//!
//! ## Basic Usage
//!
//! ```rust
//! use lru_dict::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! cache.get(&"a").unwrap(); // "a" is now the most recently used
//! cache.put("d", 4);        // evicts "b"
//!
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["d", "a", "c"]);
//! assert_eq!(cache.peek_last(), Some((&"c", &3)));
//! assert_eq!(cache.stats(), (1, 0));
//! ```
//!
//! ## Eviction Callback
//!
//! ```rust
//! use lru_dict::LruCache;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let mut cache = LruCache::try_new(2)
//!     .unwrap()
//!     .with_callback(move |key, value| tx.send((key, value)).unwrap());
//!
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three");
//! assert_eq!(rx.try_recv(), Ok((1, "one")));
//!
//! cache.resize(1);
//! assert_eq!(rx.try_recv(), Ok((2, "two")));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | ✓ | Use hashbrown for the index (works without `std`) |
//! | `nightly` | | Enable nightly-only hashbrown optimizations |
//! | `std` | | Implement `std::error::Error` for [`CacheError`] |
//!
//! Without `hashbrown` the index falls back to `std::collections::HashMap`.
//!
//! ## Thread Safety
//!
//! The cache is `Send` when its keys, values and hasher are, but every method
//! that changes recency order takes `&mut self`. Share it behind a lock:
//!
//! ```rust
//! use lru_dict::LruCache;
//! use std::sync::{Arc, Mutex};
//! use std::thread;
//!
//! let cache = Arc::new(Mutex::new(LruCache::<u64, u64>::try_new(64).unwrap()));
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.lock().unwrap().put(t * 100 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.lock().unwrap().len(), 64);
//! ```

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;


/// Resident key/value pair stored in each recency slot.
pub mod entry;

/// Arena-backed doubly linked list holding the recency order.
///
/// Internal infrastructure: slots are addressed by index, and the cache keeps
/// each key's slot id in its index.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Error type shared by every fallible cache operation.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a bounded map that evicts the least recently used entry when an
/// insert pushes it past capacity.
pub mod lru;

/// Cache metrics system.
///
/// Hit, miss, insertion and eviction counters, reported through the
/// [`CacheMetrics`] trait.
pub mod metrics;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use lru::{EvictionCallback, LruCache};
pub use metrics::CacheMetrics;
