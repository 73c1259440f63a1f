//! # Least Frequently Used (LFU) Cache Engine
//!
//! Evicts the entry with the lowest access count; ties go to the oldest
//! arrival at that count. Built on the O(1) frequency-list scheme: a
//! [`FreqChain`] keeps buckets of equal-frequency entries in an ascending
//! adjacency-linked chain, so promotion is a constant-time splice.
//!
//! ## Structure
//!
//! ```text
//!   index: K → { chain handle, value }
//!   chain: lowest ─► (freq 1)[...] ◄──► (freq 2)[...] ◄──► ... ◄─ highest
//!
//!   get  → chain.touch(handle): frequency + 1
//!   put  → new keys enter at frequency 1
//!   full → chain.pop_lowest(): the LFU victim
//! ```
//!
//! Insertion counts as the first access, so a fresh key has frequency 1.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time     | Notes                                 |
//! |------------|----------|---------------------------------------|
//! | `get`      | O(1) avg | bucket splice, adjacency only         |
//! | `put`      | O(1) avg | victim read off the lowest bucket     |
//! | `peek_lfu` | O(1)     | lowest bucket's oldest arrival        |
//! | `clear`    | O(n)     | drops chain and index                 |
//!
//! ## When to Use
//!
//! **Use LFU when:**
//! - Hot spots are stable over time and should survive bursts of cold keys
//! - Popularity, not recency, predicts reuse
//!
//! **Avoid LFU when:**
//! - The working set shifts: old entries with large counts linger (cache
//!   pollution) because frequency never decays here
//! - Recency is the better signal (use LRU)
//!
//! ## Thread Safety
//!
//! - [`LfuCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Ketan Shah, Anirban Mitra, Dhruv Matani: "An O(1) algorithm for
//!   implementing the LFU cache eviction scheme"

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{FreqChain, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

#[derive(Debug)]
struct Slot<V> {
    id: SlotId,
    value: V,
}

/// Least-frequently-used cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::lfu::LfuCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = LfuCache::new(2).unwrap();
/// cache.put('a', 1);
/// cache.put('b', 2);
/// cache.get(&'a'); // 'a' now at frequency 2
///
/// cache.put('c', 3); // 'b' (frequency 1) is the victim
///
/// assert_eq!(cache.get(&'b'), None);
/// assert!(cache.get(&'a').is_some());
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V> {
    index: FxHashMap<K, Slot<V>>,
    chain: FreqChain<K>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lfu::LfuCache;
    ///
    /// let cache: LfuCache<u32, String> = LfuCache::new(128).unwrap();
    /// assert!(LfuCache::<u32, u32>::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::new("size must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(size, Default::default()),
            chain: FreqChain::new(),
            capacity: size,
            hits: 0,
            misses: 0,
        })
    }

    /// Returns the access frequency of a key, if present.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lfu::LfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LfuCache::new(4).unwrap();
    /// cache.put(1, "a");
    /// assert_eq!(cache.frequency(&1), Some(1)); // insertion counts
    ///
    /// cache.get(&1);
    /// assert_eq!(cache.frequency(&1), Some(2));
    /// assert_eq!(cache.frequency(&9), None);
    /// ```
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let slot = self.index.get(key)?;
        self.chain.frequency(slot.id)
    }

    /// Returns the current victim candidate and its frequency.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lfu::LfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LfuCache::new(4).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.get(&2);
    ///
    /// assert_eq!(cache.peek_lfu(), Some((&1, 1)));
    /// ```
    pub fn peek_lfu(&self) -> Option<(&K, u64)> {
        self.chain.peek_lowest()
    }
}

impl<K, V> CacheEngine<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key, promoting it one frequency bucket on a hit.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lfu::LfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LfuCache::new(4).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// assert_eq!(cache.frequency(&1), Some(2));
    /// assert_eq!(cache.get(&9), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(slot) => slot.id,
            None => {
                self.misses += 1;
                return None;
            }
        };
        self.hits += 1;
        self.chain.touch(id);
        self.index.get(key).map(|slot| &slot.value)
    }

    /// Inserts at frequency 1, evicting the least frequent entry when full
    /// (oldest arrival breaks ties).
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lfu::LfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LfuCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.get(&1); // 1 at frequency 2, 2 at frequency 1
    /// cache.put(3, "c"); // evicts 2
    ///
    /// assert_eq!(cache.get(&2), None);
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// ```
    fn put(&mut self, key: K, value: V) {
        // Replace = remove then insert fresh (frequency resets to 1)
        if let Some(slot) = self.index.remove(&key) {
            self.chain.remove(slot.id);
        }

        if self.index.len() >= self.capacity {
            if let Some((victim, _)) = self.chain.pop_lowest() {
                self.index.remove(&victim);
            }
        }

        let id = self.chain.insert(key.clone());
        self.index.insert(key, Slot { id, value });
    }

    fn clear(&mut self) {
        self.index.clear();
        self.chain.clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(LfuCache::<u32, u32>::new(0).is_err());
    }

    #[test]
    fn insertion_counts_as_first_access() {
        let mut cache = LfuCache::new(4).unwrap();
        cache.put(1, "a");
        assert_eq!(cache.frequency(&1), Some(1));
        cache.get(&1);
        assert_eq!(cache.frequency(&1), Some(2));
    }

    #[test]
    fn evicts_lowest_frequency() {
        let mut cache = LfuCache::new(2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1);
        cache.get(&1);
        cache.get(&2);
        // freq: 1 → 3, 2 → 2
        cache.put(3, "c");

        assert_eq!(cache.frequency(&2), None);
        assert!(cache.get(&1).is_some());
        assert!(cache.get(&3).is_some());
    }

    #[test]
    fn ties_evict_oldest_arrival() {
        let mut cache = LfuCache::new(3).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        // All at frequency 1; 1 arrived first
        cache.put(4, "d");

        assert_eq!(cache.get(&1), None);
        assert!(cache.get(&2).is_some());
        assert!(cache.get(&3).is_some());
    }

    #[test]
    fn replace_resets_frequency() {
        let mut cache = LfuCache::new(2).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&1);
        assert_eq!(cache.frequency(&1), Some(3));

        cache.put(1, "a2");
        assert_eq!(cache.frequency(&1), Some(1));
        assert_eq!(cache.get(&1), Some(&"a2"));
    }

    #[test]
    fn peek_lfu_matches_next_victim() {
        let mut cache = LfuCache::new(3).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1);

        assert_eq!(cache.peek_lfu(), Some((&2, 1)));
        cache.put(3, "c");
        cache.put(4, "d");
        assert_eq!(cache.frequency(&2), None);
    }

    #[test]
    fn misses_do_not_change_frequencies() {
        let mut cache = LfuCache::new(2).unwrap();
        cache.put(1, "a");
        cache.get(&2);
        cache.get(&3);
        assert_eq!(cache.frequency(&1), Some(1));
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn counters_and_clear() {
        let mut cache = LfuCache::new(2).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&9);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        cache.clear();
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
        assert!(cache.is_empty());
        assert_eq!(cache.peek_lfu(), None);
    }
}
