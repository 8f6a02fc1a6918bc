//! Least Recently Used (LRU) Cache Implementation
//!
//! A bounded, dict-like cache: it maps keys to values like a `HashMap`, but holds at
//! most `cap()` entries. Once an insert pushes the entry count past that bound, the
//! entry that has gone longest without being read or written is evicted, and the
//! optional eviction callback is invoked with the evicted key and value.
//!
//! # Algorithm
//!
//! Two structures are kept in lockstep:
//!
//! - an **index** (`HashMap<K, SlotId>`) giving O(1) lookup of a key's slot
//! - a **recency list** threading every resident slot from most recently used
//!   (head) to least recently used (tail)
//!
//! ```text
//!   index                       recency list
//!   ┌─────┬────────┐
//!   │ "a" │ slot 2 │──┐    head ─► [slot 2: a] ◄─► [slot 0: c] ◄─► [slot 1: b] ◄─ tail
//!   │ "b" │ slot 1 │  │               ▲                                  │
//!   │ "c" │ slot 0 │  └───────────────┘                          evicted next
//!   └─────┴────────┘
//! ```
//!
//! - A hit on `get` promotes the slot to the head.
//! - `put` on a resident key overwrites the value in place and promotes the slot.
//! - `put` on a new key links a new slot at the head, then evicts the tail if the
//!   entry count now exceeds the capacity.
//! - An evicted slot is unlinked from the list and dropped from the index *before*
//!   the callback runs, so the callback never observes a half-removed entry.
//!
//! # Performance Characteristics
//!
//! | Operation | Time |
//! |-----------|------|
//! | `get` / `put` / `remove` / `pop` | O(1) |
//! | `pop_item` / `peek_first` / `peek_last` | O(1) |
//! | `resize` | O(evicted entries) |
//! | `keys` / `values` / `iter` | O(n) |
//!
//! # Thread Safety
//!
//! This implementation is not internally synchronized. Every method that can change
//! recency order takes `&mut self`, so sharing a cache across threads requires an
//! external lock such as `Mutex<LruCache<K, V>>`. The eviction callback runs
//! synchronously on the calling thread, inside that lock.

use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::error::{CacheError, Result};
use crate::list::{self, List, SlotId};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the number of index buckets reserved up front. Larger caches
/// grow their index on demand.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// Function invoked with the key and value of every evicted entry.
///
/// A callback that needs to report failure does so by panicking. The entry has
/// already been removed when the callback runs, so the cache stays consistent
/// while the panic unwinds through the `put` or `resize` call that triggered it.
pub type EvictionCallback<K, V> = Box<dyn FnMut(K, V) + Send>;

/// A bounded map that evicts its least recently used entry on overflow.
///
/// # Examples
///
/// ```
/// use lru_dict::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing an entry makes it the most recently used
/// assert_eq!(cache.get(&"apple"), Ok(&1));
///
/// // Adding beyond capacity evicts the least recently used entry
/// cache.put("cherry", 3);
/// assert!(!cache.contains(&"banana"));
/// assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["cherry", "apple"]);
/// assert_eq!(cache.stats(), (1, 0));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    capacity: usize,
    list: List<CacheEntry<K, V>>,
    map: HashMap<K, SlotId, S>,
    metrics: LruCacheMetrics,
    callback: Option<EvictionCallback<K, V>>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::InvalidConfiguration`] when `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, K> {
        Self::init(LruCacheConfig { capacity }, None)
    }

    /// Creates a cache from a configuration and an optional eviction callback.
    ///
    /// ```
    /// use lru_dict::config::LruCacheConfig;
    /// use lru_dict::LruCache;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let evicted = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&evicted);
    ///
    /// let mut cache: LruCache<&'static str, i32> = LruCache::init(
    ///     LruCacheConfig { capacity: 1 },
    ///     Some(Box::new(move |k: &'static str, v: i32| {
    ///         sink.lock().unwrap().push((k, v))
    ///     })),
    /// )
    /// .unwrap();
    ///
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// assert_eq!(*evicted.lock().unwrap(), [("a", 1)]);
    /// ```
    pub fn init(config: LruCacheConfig, callback: Option<EvictionCallback<K, V>>) -> Result<Self, K> {
        let cap = config.validate()?;
        let mut cache = Self::new(cap);
        cache.callback = callback;
        Ok(cache)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache holding at most `cap` entries, hashing keys with `hash_builder`.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let reserve = cap.get().min(MAX_PREALLOCATED_ENTRIES);
        LruCache {
            capacity: cap.get(),
            list: List::with_capacity(reserve),
            map: HashMap::with_capacity_and_hasher(reserve, hash_builder),
            metrics: LruCacheMetrics::new(),
            callback: None,
        }
    }

    /// Maximum number of resident entries.
    #[inline]
    pub fn cap(&self) -> usize {
        self.capacity
    }

    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no entries are resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `(hits, misses)` recorded since construction or the last `clear`.
    #[inline]
    pub fn stats(&self) -> (u64, u64) {
        (self.metrics.core.cache_hits, self.metrics.core.cache_misses)
    }

    /// Full metrics snapshot for this cache.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Presence check. Does not promote the entry or touch the hit/miss counters.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the value for `key`, promoting it to most recently used.
    ///
    /// A hit increments the hit counter. A miss increments the miss counter and
    /// fails with [`CacheError::MissingKey`].
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.lookup(key)
            .map(|entry| &entry.value)
            .ok_or_else(|| CacheError::MissingKey(key.to_owned()))
    }

    /// Like [`get`](Self::get) but returns a mutable reference to the value.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.lookup(key)
            .map(|entry| &mut entry.value)
            .ok_or_else(|| CacheError::MissingKey(key.to_owned()))
    }

    /// Like [`get`](Self::get) but returns `default` instead of failing on a miss.
    ///
    /// Promotion and hit/miss accounting are the same as for `get`.
    pub fn get_or<'a, Q>(&'a mut self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lookup(key).map_or(default, |entry| &entry.value)
    }

    /// Removes `key` and returns its value.
    ///
    /// This is an explicit deletion, not an eviction: the callback is not invoked
    /// and the hit/miss counters are untouched. Fails with
    /// [`CacheError::MissingKey`] if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        match self.unlink(key) {
            Some(entry) => {
                self.metrics.core.record_removal();
                Ok(entry.value)
            }
            None => Err(CacheError::MissingKey(key.to_owned())),
        }
    }

    /// Removes `key` and returns its value, counting the lookup as a hit or miss.
    ///
    /// Fails with [`CacheError::MissingKey`] if the key is absent. The callback is
    /// not invoked.
    pub fn pop<Q>(&mut self, key: &Q) -> Result<V, K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.take(key)
            .ok_or_else(|| CacheError::MissingKey(key.to_owned()))
    }

    /// Removes `key` and returns its value, or `default` if it is absent.
    ///
    /// A hit increments the hit counter; a miss increments the miss counter.
    pub fn pop_or<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.take(key).unwrap_or(default)
    }

    /// Removes and returns the entry at one end of the recency order.
    ///
    /// With `least_recent` the tail (least recently used) entry is removed,
    /// otherwise the head. Fails with [`CacheError::EmptyContainer`] if the cache
    /// holds nothing. Neither the callback nor the hit/miss counters are involved.
    pub fn pop_item(&mut self, least_recent: bool) -> Result<(K, V), K> {
        let entry = if least_recent {
            self.list.pop_back()
        } else {
            self.list.pop_front()
        }
        .ok_or(CacheError::EmptyContainer)?;

        self.map.remove(&entry.key);
        self.metrics.core.record_removal();
        Ok(entry.into_pair())
    }

    /// Removes and returns the least recently used entry.
    #[inline]
    pub fn pop_lru(&mut self) -> Result<(K, V), K> {
        self.pop_item(true)
    }

    /// Removes and returns the most recently used entry.
    #[inline]
    pub fn pop_mru(&mut self) -> Result<(K, V), K> {
        self.pop_item(false)
    }

    /// Most recently used entry, without changing the order.
    pub fn peek_first(&self) -> Option<(&K, &V)> {
        self.list.front().map(CacheEntry::as_pair)
    }

    /// Least recently used entry, without changing the order.
    pub fn peek_last(&self) -> Option<(&K, &V)> {
        self.list.back().map(CacheEntry::as_pair)
    }

    /// Changes the capacity, evicting least recently used entries until the
    /// cache fits. Returns the number of entries evicted.
    ///
    /// Each eviction invokes the callback, oldest entry first. The new capacity
    /// is stored only after shrinking completes. Growing never evicts. A capacity
    /// of zero is accepted and empties the cache; while it stays at zero every
    /// `put` is evicted immediately.
    pub fn resize(&mut self, capacity: usize) -> usize {
        let mut evicted = 0usize;
        while self.map.len() > capacity && self.evict_lru() {
            evicted += 1;
        }
        self.capacity = capacity;
        self.metrics.record_resize(evicted as u64);
        debug!(capacity, evicted, "resized lru cache");
        evicted
    }

    /// Drops every entry and resets all counters. The callback is not invoked.
    pub fn clear(&mut self) {
        let dropped = self.map.len();
        self.map.clear();
        self.list.clear();
        self.metrics.reset();
        debug!(dropped, "cleared lru cache");
    }

    /// Installs the eviction callback, replacing any previous one.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(K, V) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Builder-style variant of [`set_callback`](Self::set_callback).
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(K, V) + Send + 'static,
    {
        self.set_callback(callback);
        self
    }

    /// Removes the eviction callback, returning it.
    pub fn clear_callback(&mut self) -> Option<EvictionCallback<K, V>> {
        self.callback.take()
    }

    /// Returns `true` if an eviction callback is installed.
    #[inline]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Values from most to least recently used.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// `(key, value)` pairs from most to least recently used.
    ///
    /// The iterator borrows the cache, so the sequence it yields is exactly the
    /// resident set at the time of the call. Iterating does not promote entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Finds `key`, promotes it and records the hit or miss.
    fn lookup<Q>(&mut self, key: &Q) -> Option<&mut CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(id) => {
                self.list.move_to_front(id);
                self.metrics.core.record_hit();
                self.list.get_mut(id)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Counted removal shared by `pop` and `pop_or`.
    fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.unlink(key) {
            Some(entry) => {
                self.metrics.core.record_hit();
                self.metrics.core.record_removal();
                Some(entry.value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Drops `key` from the index and the list together.
    fn unlink<Q>(&mut self, key: &Q) -> Option<CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.remove(key)?;
        self.list.remove(id)
    }

    /// Evicts the tail entry and notifies the callback. Returns `false` when
    /// there was nothing to evict.
    fn evict_lru(&mut self) -> bool {
        let Some(entry) = self.list.pop_back() else {
            return false;
        };
        self.map.remove(&entry.key);
        self.metrics.core.record_eviction();
        trace!(len = self.map.len(), "evicted least recently used entry");

        // Both structures are consistent again before user code runs.
        if let Some(callback) = self.callback.as_mut() {
            let (key, value) = entry.into_pair();
            callback(key, value);
        }
        true
    }

    /// Asserts that the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.list.check_invariants();
        assert_eq!(self.map.len(), self.list.len(), "index vs list cardinality");
        for (key, &id) in self.map.iter() {
            let entry = self.list.get(id).expect("index points at a free slot");
            assert!(entry.key == *key, "index key differs from slot key");
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// Overwriting a resident key replaces its value in place and returns the old
    /// value; it counts as neither a hit nor a miss and never evicts. Inserting a
    /// new key links it at the head first, then evicts the least recently used
    /// entry if the cache is now over capacity, so `len() <= cap()` holds on return.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            self.list.move_to_front(id);
            self.metrics.core.record_update();
            return self.list.get_mut(id).map(|entry| entry.replace_value(value));
        }

        let id = self.list.push_front(CacheEntry::new(key.clone(), value));
        self.map.insert(key, id);
        self.metrics.core.record_insertion();

        if self.map.len() > self.capacity {
            self.evict_lru();
        }
        None
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entries<'a, K, V>(&'a List<CacheEntry<K, V>>);

        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entries<'_, K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.0.iter().map(CacheEntry::as_pair))
                    .finish()
            }
        }

        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len())
            .field("entries", &Entries(&self.list))
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs, most recently used first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, CacheEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(CacheEntry::as_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(CacheEntry::as_pair)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Iterator over keys, most recently used first.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Iterator over values, most recently used first.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values")
            .field("remaining", &self.inner.len())
            .finish()
    }
}
