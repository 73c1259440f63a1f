//! # Least Recently Used (LRU) Cache Engine
//!
//! The workhorse policy: a hit moves the entry to the most-recently-used
//! position, and overflow evicts the entry untouched for the longest time.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   ┌───────────────────────────────┐                              │
//!   │   │  index: FxHashMap<K, SlotId>  │                              │
//!   │   │                               │                              │
//!   │   │  ┌─────────┬──────────┐       │                              │
//!   │   │  │   Key   │  SlotId  │       │                              │
//!   │   │  ├─────────┼──────────┤       │                              │
//!   │   │  │  k_1    │  id_1 ───┼───┐   │                              │
//!   │   │  │  k_2    │  id_2 ───┼─┐ │   │                              │
//!   │   │  └─────────┴──────────┘ │ │   │                              │
//!   │   └──────────────────────────┼─┼──┘                              │
//!   │                              ▼ ▼                                 │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  queue: IntrusiveList<Entry { key, value }>              │   │
//!   │   │                                                          │   │
//!   │   │  front ─► [id_2] ◄──► [id_1] ◄── back                    │   │
//!   │   │           (MRU)              (LRU victim)                │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation   | Complexity | Effect                                    |
//! |-------------|------------|-------------------------------------------|
//! | `get` (hit) | O(1)       | splice entry to MRU position              |
//! | `put` (new) | O(1)       | insert at MRU; evict LRU if full          |
//! | `put` (dup) | O(1)       | remove then insert fresh at MRU           |
//! | `touch`     | O(1)       | refresh recency without reading the value |
//! | `peek_lru`  | O(1)       | inspect the victim candidate              |
//!
//! ## Design Rationale
//!
//! This implementation was built on the crate's own `SlotArena`-backed
//! [`IntrusiveList`] rather than a standalone LRU crate for:
//!
//! - **Uniform plumbing**: the same list and arena primitives back every
//!   policy in the family, so the engines differ only in protocol.
//! - **Stable handles**: the index holds generation-tagged `SlotId`s; a
//!   handle that survives an eviction stops resolving instead of aliasing a
//!   reused slot.
//! - **No raw pointers**: every splice is an arena-checked link update.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time     | Notes                             |
//! |------------|----------|-----------------------------------|
//! | `get`      | O(1) avg | index lookup + list splice        |
//! | `put`      | O(1) avg | may unlink one victim             |
//! | `touch`    | O(1) avg | splice only, counters untouched   |
//! | `peek`     | O(1) avg | no reordering                     |
//! | `peek_lru` | O(1)     | reads the list tail               |
//! | `clear`    | O(n)     | drops every entry                 |
//!
//! ## When to Use
//!
//! **Use LRU when:**
//! - The workload has temporal locality (recently used implies soon reused)
//! - A general-purpose default is needed
//!
//! **Avoid LRU when:**
//! - One-time scans flood the cache (use SLRU, 2Q or MQ)
//! - Stable hot spots should survive bursts of cold keys (use LFU)
//!
//! ## Thread Safety
//!
//! - [`LruCache`]: Not thread-safe, designed for single-threaded use
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

/// Least-recently-used cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = LruCache::new(3).unwrap();
/// cache.put('a', 1);
/// cache.put('b', 2);
/// cache.put('c', 3);
///
/// // Touching 'a' spares it; 'b' becomes the victim
/// assert_eq!(cache.get(&'a'), Some(&1));
/// cache.put('d', 4);
///
/// assert_eq!(cache.get(&'b'), None);
/// assert!(cache.get(&'a').is_some());
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    queue: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(128).unwrap();
    /// assert!(LruCache::<u32, u32>::new(0).is_err());
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

    /// Marks a key as recently used without reading its value.
    ///
    /// Returns `true` if the key was present. Does not count as a `get`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    ///
    /// assert!(cache.touch(&1)); // 2 is now the LRU
    /// cache.put(3, "c");
    ///
    /// assert!(cache.peek(&1).is_some());
    /// assert!(cache.peek(&2).is_none());
    /// assert_eq!(cache.hits(), 0); // touch is uncounted
    /// assert!(!cache.touch(&99));
    /// ```
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.queue.move_to_front(id),
            None => false,
        }
    }

    /// Returns the least recently used entry without removing it.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    ///
    /// assert_eq!(cache.peek_lru(), Some((&1, &"a")));
    /// cache.get(&1); // 1 refreshed
    /// assert_eq!(cache.peek_lru(), Some((&2, &"b")));
    /// ```
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.queue.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Looks up a value without refreshing its recency.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    ///
    /// assert_eq!(cache.peek(&1), Some(&"a"));
    /// cache.put(3, "c"); // 1 is still the LRU victim
    ///
    /// assert_eq!(cache.peek(&1), None);
    /// assert_eq!(cache.hits(), 0); // peek is uncounted
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.queue.get(id).map(|entry| &entry.value)
    }
}

impl<K, V> CacheEngine<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key, splicing it to the most-recently-used position.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a")); // 1 is now MRU
    /// cache.put(3, "c"); // so 2 is the victim
    /// assert_eq!(cache.get(&2), None);
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

    /// Inserts at the MRU position, evicting the LRU entry when full.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c"); // evicts 1, untouched the longest
    ///
    /// assert_eq!(cache.get(&1), None);
    /// assert_eq!(cache.len(), 2);
    /// ```
    fn put(&mut self, key: K, value: V) {
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
