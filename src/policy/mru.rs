//! Most Recently Used (MRU) cache engine.
//!
//! The inverse of LRU: hits still move an entry to the most-recently-used
//! position, but overflow evicts the *current MRU* before the new entry is
//! installed.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time     | Notes                      |
//! |------------|----------|----------------------------|
//! | `get`      | O(1) avg | index lookup + list splice |
//! | `put`      | O(1) avg | may unlink one victim      |
//! | `peek_mru` | O(1)     | reads the list front       |
//! | `clear`    | O(n)     | drops every entry          |
//!
//! ## When to Use
//!
//! **Use MRU when:**
//! - The most recent item is the least likely to be needed again
//! - Cyclic scans cover a set slightly larger than the cache (classic
//!   looping-file-scan workloads)
//!
//! **Avoid MRU when:**
//! - The workload has ordinary temporal locality (use LRU)
//! - Access patterns are unknown (LRU degrades more gracefully)
//!
//! ## Thread Safety
//!
//! - [`MruCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Wikipedia: Cache replacement policies

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Most-recently-used cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::mru::MruCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = MruCache::new(2).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c"); // evicts 2, the most recently used
///
/// assert_eq!(cache.get(&1), Some(&"a"));
/// assert_eq!(cache.get(&2), None);
/// ```
#[derive(Debug)]
pub struct MruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    queue: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MRU cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mru::MruCache;
    ///
    /// let cache: MruCache<u32, String> = MruCache::new(128).unwrap();
    /// assert!(MruCache::<u32, u32>::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::new("size must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(size, Default::default()),
            queue: IntrusiveList::with_capacity(size),
            capacity: size,
            hits: 0,
            misses: 0,
        })
    }

    /// Returns the most recently used entry (the next victim) without
    /// removing it.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mru::MruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MruCache::new(3).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.peek_mru(), Some((&1, &"a")));
    /// assert_eq!(cache.len(), 2); // nothing removed
    /// ```
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.queue.front().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> CacheEngine<K, V> for MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key, splicing it to the most-recently-used position.
    ///
    /// A hit makes the key the *next victim*: that is the point of MRU.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mru::MruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a")); // 1 is now MRU
    /// cache.put(3, "c"); // so 1 is the victim
    /// assert_eq!(cache.get(&1), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&id) => {
                self.hits += 1;
                self.queue.move_to_front(id);
                self.queue.get(id).map(|entry| &entry.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Evicts the current MRU when full, then installs the new entry.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mru::MruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c"); // evicts 2, the most recent resident
    ///
    /// assert_eq!(cache.get(&2), None);
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// ```
    fn put(&mut self, key: K, value: V) {
        if let Some(id) = self.index.remove(&key) {
            self.queue.remove(id);
        }

        // Evict the current MRU before installing the new entry
        if self.index.len() >= self.capacity {
            if let Some(victim) = self.queue.pop_front() {
                self.index.remove(&victim.key);
            }
        }

        let id = self.queue.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
    }

    fn clear(&mut self) {
        self.index.clear();
        self.queue.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.capacity)
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn misses(&self) -> u64 {
        self.misses
    }
}
