//! Cache Entry Type
//!
//! A `CacheEntry<K, V>` is the payload of one slot in the recency list: the
//! resident key together with its value. The key is stored alongside the value
//! so that evicting the tail slot can also drop the slot's index entry without
//! a search.
//!
//! # Lifecycle
//!
//! - Created exactly once, when a new key is inserted.
//! - Mutated in place when the value is overwritten.
//! - Destroyed exactly once, by removal, eviction, resize or clear. In every path
//!   the entry is detached from the list and the index before it is handed out.

use core::fmt;

/// A resident key/value pair.
///
/// # Examples
///
/// ```
/// use lru_dict::CacheEntry;
///
/// let entry = CacheEntry::new("key", 42);
/// assert_eq!(entry.key, "key");
/// assert_eq!(entry.value, 42);
///
/// let (key, value) = entry.into_pair();
/// assert_eq!((key, value), ("key", 42));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new cache entry.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Borrows the entry as a `(key, value)` pair.
    #[inline]
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Consumes the entry, returning the `(key, value)` pair.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn test_new_entry() {
        let entry = CacheEntry::new("apple", 1);
        assert_eq!(entry.key, "apple");
        assert_eq!(entry.value, 1);
    }

    #[test]
    fn test_replace_value() {
        let mut entry = CacheEntry::new("apple", String::from("red"));
        let old = entry.replace_value(String::from("green"));
        assert_eq!(old, "red");
        assert_eq!(entry.value, "green");
        assert_eq!(entry.as_pair(), (&"apple", &String::from("green")));
    }

    #[test]
    fn test_into_pair() {
        let entry = CacheEntry::new(3u8, 'c');
        assert_eq!(entry.into_pair(), (3, 'c'));
    }

    #[test]
    fn test_debug_impl() {
        let entry = CacheEntry::new("k", 9);
        let debug_str = format!("{:?}", entry);
        assert!(debug_str.contains("CacheEntry"));
        assert!(debug_str.contains("\"k\""));
        assert!(debug_str.contains('9'));
    }
}
