//! Static (no-eviction) cache engine.
//!
//! A plain key/value store with hit/miss accounting and no eviction: entries
//! stay until `clear`. `max_size` reports [`Capacity::Unbounded`].
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                     |
//! |-----------|----------|---------------------------|
//! | `get`     | O(1) avg | map lookup + counter      |
//! | `put`     | O(1) avg | map insert, never evicts  |
//! | `clear`   | O(n)     | the only way entries die  |
//!
//! ## When to Use
//!
//! **Use the static cache when:**
//! - The argument domain is small and closed (memoized pure functions over
//!   an enum, a lookup table built on demand)
//! - `clear` provides the lifecycle bound instead of a capacity
//!
//! **Avoid the static cache when:**
//! - The key space is unbounded: `current_size` grows monotonically and
//!   nothing reclaims memory (use TLRU for time-based reclamation or any
//!   bounded policy)
//!
//! ## Thread Safety
//!
//! - [`StaticCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::{CacheEngine, Capacity};

/// Cache engine with no eviction and no size limit.
///
/// # Example
///
/// ```
/// use memokit::policy::unbounded::StaticCache;
/// use memokit::traits::{CacheEngine, Capacity};
///
/// let mut cache = StaticCache::new();
/// for i in 0..1000 {
///     cache.put(i, i * i);
/// }
///
/// assert_eq!(cache.len(), 1000);
/// assert_eq!(cache.capacity(), Capacity::Unbounded);
/// assert_eq!(cache.get(&31), Some(&961));
/// ```
#[derive(Debug)]
pub struct StaticCache<K, V> {
    store: FxHashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K, V> StaticCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty static cache. There is nothing to configure, so
    /// construction cannot fail.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::unbounded::StaticCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let cache: StaticCache<u32, u32> = StaticCache::new();
    /// assert!(cache.is_empty());
    /// assert!(cache.capacity().is_unbounded());
    /// ```
    pub fn new() -> Self {
        Self {
            store: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K, V> Default for StaticCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheEngine<K, V> for StaticCache<K, V>
where
    K: Eq + Hash,
{
    /// Looks up a key, counting the hit or miss.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::unbounded::StaticCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = StaticCache::new();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// assert_eq!(cache.get(&2), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.store.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts or updates. Nothing is ever evicted.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::unbounded::StaticCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = StaticCache::new();
    /// for i in 0..100 {
    ///     cache.put(i, i * i);
    /// }
    ///
    /// assert_eq!(cache.len(), 100); // grows until clear
    /// ```
    fn put(&mut self, key: K, value: V) {
        self.store.insert(key, value);
    }

    fn clear(&mut self) {
        self.store.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Unbounded
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn misses(&self) -> u64 {
        self.misses
    }
}
