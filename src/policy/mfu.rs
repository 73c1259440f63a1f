//! Most Frequently Used (MFU) cache engine.
//!
//! The mirror image of LFU over the same [`FreqChain`]: overflow evicts from
//! the *highest* frequency bucket, tie-breaking on the oldest arrival at
//! that frequency, symmetric with LFU's discipline.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time     | Notes                             |
//! |------------|----------|-----------------------------------|
//! | `get`      | O(1) avg | bucket splice, adjacency only     |
//! | `put`      | O(1) avg | victim read off the highest bucket|
//! | `peek_mfu` | O(1)     | highest bucket's oldest arrival   |
//! | `clear`    | O(n)     | drops chain and index             |
//!
//! ## When to Use
//!
//! MFU is counterintuitive for most workloads but earns its keep in niches:
//!
//! **Use MFU when:**
//! - A burst of accesses signals a key is finished with (anti-burst
//!   eviction, one-pass aggregation keys)
//! - Benchmarking: a deliberate worst-case-ish baseline for comparisons
//!
//! **Avoid MFU when:**
//! - Temporal locality exists; MFU evicts exactly the keys most workloads
//!   want to keep (use LRU, LFU or SLRU)
//!
//! ## Thread Safety
//!
//! - [`MfuCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Wikipedia: Cache replacement policies

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

/// Most-frequently-used cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::mfu::MfuCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = MfuCache::new(2).unwrap();
/// cache.put('a', 1);
/// cache.put('b', 2);
/// cache.get(&'a'); // 'a' now has the higher frequency
///
/// cache.put('c', 3); // so 'a' is the victim
///
/// assert_eq!(cache.get(&'a'), None);
/// assert!(cache.get(&'b').is_some());
/// ```
#[derive(Debug)]
pub struct MfuCache<K, V> {
    index: FxHashMap<K, Slot<V>>,
    chain: FreqChain<K>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> MfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MFU cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mfu::MfuCache;
    ///
    /// let cache: MfuCache<u32, String> = MfuCache::new(128).unwrap();
    /// assert!(MfuCache::<u32, u32>::new(0).is_err());
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
    /// use memokit::policy::mfu::MfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MfuCache::new(4).unwrap();
    /// cache.put(1, "a");
    /// cache.get(&1);
    ///
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
    /// use memokit::policy::mfu::MfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MfuCache::new(4).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.get(&2);
    ///
    /// assert_eq!(cache.peek_mfu(), Some((&2, 2)));
    /// ```
    pub fn peek_mfu(&self) -> Option<(&K, u64)> {
        self.chain.peek_highest()
    }
}

impl<K, V> CacheEngine<K, V> for MfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key, promoting it one frequency bucket on a hit.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mfu::MfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MfuCache::new(4).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// assert_eq!(cache.frequency(&1), Some(2));
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

    /// Inserts at frequency 1, evicting the most frequent entry when full
    /// (oldest arrival breaks ties).
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mfu::MfuCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MfuCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.get(&1); // 1 now has the top frequency
    /// cache.put(3, "c"); // so 1 is the victim
    ///
    /// assert_eq!(cache.get(&1), None);
    /// assert_eq!(cache.get(&2), Some(&"b"));
    /// ```
    fn put(&mut self, key: K, value: V) {
        if let Some(slot) = self.index.remove(&key) {
            self.chain.remove(slot.id);
        }

        if self.index.len() >= self.capacity {
            if let Some((victim, _)) = self.chain.pop_highest() {
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
