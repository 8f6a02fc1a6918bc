//! Cache Metrics
//!
//! Per-instance counters for the cache engine, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap` so that output order is deterministic
//! (stable across runs, which keeps test assertions and logged snapshots
//! comparable).
//!
//! The hit/miss pair is also exposed directly through
//! [`LruCache::stats`](crate::LruCache::stats). Which operations move which
//! counter:
//!
//! | Operation | hits | misses | other |
//! |-----------|------|--------|-------|
//! | `get`, `get_mut`, `get_or`, `pop`, `pop_or` | on hit | on miss | `removals` for `pop*` hits |
//! | `put` | | | `insertions` or `updates`; `evictions` on overflow |
//! | `remove`, `pop_item` | | | `removals` |
//! | `resize` | | | `evictions`, `resizes` |
//! | `contains`, `peek_*`, iteration | | | |
//! | `clear` | reset | reset | everything reset |

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters common to every cache engine.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Keyed lookups made against the cache (hits + misses).
    pub requests: u64,

    /// Keyed lookups that found a resident entry.
    pub cache_hits: u64,

    /// Keyed lookups that found nothing.
    pub cache_misses: u64,

    /// New keys written into the cache.
    pub insertions: u64,

    /// Overwrites of an already resident key.
    pub updates: u64,

    /// Entries removed by the engine to honour its capacity.
    pub evictions: u64,

    /// Entries removed explicitly by the caller.
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a keyed lookup that found its entry.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a keyed lookup that did not find its entry.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
        self.cache_misses += 1;
    }

    /// Records a new key being written.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records the value of a resident key being replaced.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity-driven eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records a caller-initiated removal.
    #[inline]
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Hit rate in `0.0..=1.0`, or `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Miss rate in `0.0..=1.0`, or `0.0` before any lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// LRU-specific metrics (extends [`CoreCacheMetrics`]).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache engines
    pub core: CoreCacheMetrics,

    /// Number of `resize` calls.
    pub resizes: u64,

    /// Evictions caused by shrinking the capacity (a subset of `core.evictions`).
    pub shrink_evictions: u64,
}

impl LruCacheMetrics {
    /// Creates zeroed LRU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a capacity change that evicted `evicted` entries.
    pub fn record_resize(&mut self, evicted: u64) {
        self.resizes += 1;
        self.shrink_evictions += evicted;
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("resizes".to_string(), self.resizes as f64);
        metrics.insert("shrink_evictions".to_string(), self.shrink_evictions as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

/// Uniform metrics reporting interface.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, keys sorted alphabetically.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// A static string identifying the eviction policy (e.g. `"LRU"`).
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_fresh_metrics_are_zero() {
        let metrics = LruCacheMetrics::new();
        assert_eq!(metrics.core, CoreCacheMetrics::new());
        assert_eq!(metrics.core.hit_rate(), 0.0);
        assert_eq!(metrics.core.miss_rate(), 0.0);
    }

    #[test]
    fn test_hit_and_miss_accounting() {
        let mut core = CoreCacheMetrics::new();
        core.record_hit();
        core.record_hit();
        core.record_hit();
        core.record_miss();

        assert_eq!(core.requests, 4);
        assert_eq!(core.cache_hits, 3);
        assert_eq!(core.cache_misses, 1);
        assert_eq!(core.hit_rate(), 0.75);
        assert_eq!(core.miss_rate(), 0.25);
    }

    #[test]
    fn test_btreemap_is_sorted_and_complete() {
        let mut metrics = LruCacheMetrics::new();
        metrics.core.record_insertion();
        metrics.core.record_update();
        metrics.core.record_eviction();
        metrics.core.record_removal();
        metrics.core.record_miss();
        metrics.record_resize(1);

        let map = metrics.metrics();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);

        assert_eq!(map.get("insertions"), Some(&1.0));
        assert_eq!(map.get("updates"), Some(&1.0));
        assert_eq!(map.get("evictions"), Some(&1.0));
        assert_eq!(map.get("removals"), Some(&1.0));
        assert_eq!(map.get("cache_misses"), Some(&1.0));
        assert_eq!(map.get("eviction_rate"), Some(&1.0));
        assert_eq!(map.get("resizes"), Some(&1.0));
        assert_eq!(map.get("shrink_evictions"), Some(&1.0));
        assert_eq!(metrics.algorithm_name(), "LRU");
    }

    #[test]
    fn test_eviction_rate_omitted_without_requests() {
        let mut metrics = CoreCacheMetrics::new();
        metrics.record_eviction();
        assert!(!metrics.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_reset() {
        let mut metrics = LruCacheMetrics::new();
        metrics.core.record_hit();
        metrics.record_resize(3);
        metrics.reset();
        assert_eq!(metrics, LruCacheMetrics::new());
    }
}
