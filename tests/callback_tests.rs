//! Eviction Callback Tests
//!
//! Covers when the callback fires, what it receives, and the state of the cache
//! while and after it runs, including when it panics.

use lru_dict::LruCache;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Log<K, V> = Arc<Mutex<Vec<(K, V)>>>;

fn logged_lru<K, V>(cap: usize) -> (LruCache<K, V>, Log<K, V>)
where
    K: std::hash::Hash + Eq + Clone + std::fmt::Debug + Send + 'static,
    V: Send + 'static,
{
    let log: Log<K, V> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let cache = LruCache::try_new(cap)
        .unwrap()
        .with_callback(move |k, v| sink.lock().push((k, v)));
    (cache, log)
}

#[test]
fn test_callback_fires_once_per_overflowing_put() {
    let (mut cache, log) = logged_lru(2);
    cache.put("a", 1);
    cache.put("b", 2);
    assert!(log.lock().is_empty());

    cache.put("c", 3);
    cache.put("d", 4);
    assert_eq!(*log.lock(), [("a", 1), ("b", 2)]);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_callback_skipped_for_overwrite() {
    let (mut cache, log) = logged_lru(2);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("a", 10);
    cache.put("b", 20);
    assert!(log.lock().is_empty());
}

#[test]
fn test_callback_skipped_for_explicit_removal() {
    let (mut cache, log) = logged_lru(3);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);

    cache.remove(&1).unwrap();
    cache.pop(&2).unwrap();
    assert_eq!(cache.pop_or(&9, 0), 0);
    cache.pop_lru().unwrap();
    cache.put(4, 4);
    cache.clear();

    assert!(log.lock().is_empty());
}

#[test]
fn test_resize_reports_evictions_oldest_first() {
    let (mut cache, log) = logged_lru(5);
    for i in 0..5 {
        cache.put(i, i * i);
    }
    let _ = cache.get(&0);
    let _ = cache.get(&2);

    cache.resize(2);
    assert_eq!(*log.lock(), [(1, 1), (3, 9), (4, 16)]);
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), [2, 0]);
}

#[test]
fn test_callback_receives_ownership() {
    let drops = Arc::new(AtomicUsize::new(0));

    struct Tracked(Arc<AtomicUsize>);
    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let kept: Arc<Mutex<Vec<Tracked>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&kept);
    let mut cache = LruCache::try_new(1)
        .unwrap()
        .with_callback(move |_key: u32, value: Tracked| sink.lock().push(value));

    cache.put(1, Tracked(Arc::clone(&drops)));
    cache.put(2, Tracked(Arc::clone(&drops)));
    assert_eq!(drops.load(Ordering::SeqCst), 0, "evicted value moved into callback");
    assert_eq!(kept.lock().len(), 1);

    kept.lock().clear();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    drop(cache);
    assert_eq!(drops.load(Ordering::SeqCst), 2);
}

#[test]
fn test_panicking_callback_leaves_cache_consistent() {
    let mut cache = LruCache::try_new(2).unwrap().with_callback(|key: &'static str, _: i32| {
        if key == "boom" {
            panic!("callback failed for {}", key);
        }
    });
    cache.put("boom", 1);
    cache.put("b", 2);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        cache.put("c", 3);
    }));
    assert!(result.is_err(), "callback panic propagates to the caller");

    // eviction finished before the callback ran
    assert!(!cache.contains(&"boom"));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["c", "b"]);

    // and the cache keeps working
    cache.put("d", 4);
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["d", "c"]);
    assert_eq!(cache.get(&"d"), Ok(&4));
}

#[test]
fn test_panicking_callback_during_resize() {
    let mut cache = LruCache::try_new(3).unwrap().with_callback(|key: u8, _: u8| {
        if key == 2 {
            panic!("cannot evict {}", key);
        }
    });
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);

    let result = panic::catch_unwind(AssertUnwindSafe(|| cache.resize(1)));
    assert!(result.is_err());

    // 1 and 2 are gone, the capacity change never landed
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), [3]);
    assert_eq!(cache.cap(), 3);
}

#[test]
fn test_replace_and_clear_callback() {
    let (mut cache, first) = logged_lru(1);
    cache.put('a', 1);
    cache.put('b', 2);

    let second: Log<char, i32> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&second);
    cache.set_callback(move |k, v| sink.lock().push((k, v)));
    cache.put('c', 3);

    assert_eq!(*first.lock(), [('a', 1)]);
    assert_eq!(*second.lock(), [('b', 2)]);

    let previous = cache.clear_callback();
    assert!(previous.is_some());
    assert!(!cache.has_callback());
    cache.put('d', 4);
    assert_eq!(second.lock().len(), 1);
}

#[test]
fn test_shared_cache_behind_external_lock() {
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let cache = Mutex::new(LruCache::try_new(16).unwrap().with_callback(
        move |_: u64, _: u64| {
            counter.fetch_add(1, Ordering::Relaxed);
        },
    ));

    let mut pool = scoped_threadpool::Pool::new(4);
    pool.scoped(|scope| {
        for t in 0..4u64 {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..100u64 {
                    cache.lock().put(t * 1000 + i, i);
                }
            });
        }
    });

    let cache = cache.into_inner();
    assert_eq!(cache.len(), 16);
    assert_eq!(evictions.load(Ordering::Relaxed), 400 - 16);
}
