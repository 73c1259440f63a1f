//! # First-In First-Out (FIFO) Cache Engine
//!
//! Keys are evicted in order of arrival when the cache is full; accessing a
//! key never changes its eviction rank.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                      FifoCache<K, V>                        │
//!   │                                                             │
//!   │   index: FxHashMap<K, SlotId>                               │
//!   │   queue: IntrusiveList<Entry { key, value }>                │
//!   │                                                             │
//!   │   front ─► [D] ◄──► [C] ◄──► [B] ◄──► [A] ◄── back          │
//!   │          newest                      oldest = victim        │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Replacing an existing key unlinks it and re-links it at the newest end
//! (a replace is a fresh insertion).
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                              |
//! |-----------|----------|------------------------------------|
//! | `get`     | O(1) avg | index lookup only, no reordering   |
//! | `put`     | O(1) avg | unlinks at most one victim         |
//! | `clear`   | O(n)     | drops every entry                  |
//! | Per-entry | -        | key clone + list node + index slot |
//!
//! ## When to Use
//!
//! **Use FIFO when:**
//! - Entry age is the best predictor of staleness
//! - Predictable, access-independent eviction order matters
//! - Hit-path bookkeeping must cost nothing
//!
//! **Avoid FIFO when:**
//! - The workload has temporal locality (use LRU)
//! - Access frequency should protect entries (use LFU)
//!
//! ## Thread Safety
//!
//! - [`FifoCache`]: Not thread-safe, designed for single-threaded use
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

/// First-in first-out cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::fifo::FifoCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = FifoCache::new(2).unwrap();
/// cache.put("x", 10);
/// cache.put("y", 20);
///
/// // A hit does not spare "x" from FIFO eviction
/// assert_eq!(cache.get(&"x"), Some(&10));
/// cache.put("z", 30);
///
/// assert_eq!(cache.get(&"x"), None);
/// assert!(cache.len() == 2);
/// ```
#[derive(Debug)]
pub struct FifoCache<K, V> {
    index: FxHashMap<K, SlotId>,
    queue: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a FIFO cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    ///
    /// let cache: FifoCache<u32, String> = FifoCache::new(128).unwrap();
    /// assert!(FifoCache::<u32, u32>::new(0).is_err());
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

    /// Returns the oldest entry (the next FIFO victim) without removing it.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = FifoCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    ///
    /// assert_eq!(cache.peek_oldest(), Some((&1, &"a")));
    /// assert_eq!(cache.len(), 2); // nothing removed
    /// ```
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.queue.back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> CacheEngine<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key without touching its eviction rank.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = FifoCache::new(2).unwrap();
    /// cache.put("x", 1);
    ///
    /// assert_eq!(cache.get(&"x"), Some(&1));
    /// assert_eq!(cache.get(&"y"), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&id) => {
                self.hits += 1;
                self.queue.get(id).map(|entry| &entry.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts at the newest end, evicting the oldest arrival when full.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = FifoCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c"); // evicts 1, the oldest arrival
    ///
    /// assert_eq!(cache.get(&1), None);
    /// assert_eq!(cache.get(&2), Some(&"b"));
    /// ```
    fn put(&mut self, key: K, value: V) {
        // Replace = remove then insert fresh
        if let Some(id) = self.index.remove(&key) {
            self.queue.remove(id);
        }

        if self.index.len() >= self.capacity {
            if let Some(victim) = self.queue.pop_back() {
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
