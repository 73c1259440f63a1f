//! Not-Most-Recently-Used (NMRU) cache engine.
//!
//! Overflow picks a victim uniformly at random from every resident key
//! *except* the most recent one, which sits in a protected slot. The slot
//! holds whichever key was inserted or hit last; if it is the only key, it
//! is the victim.
//!
//! ## Structure
//!
//! ```text
//!   mru: Option<(K, V)>            the protected slot
//!   pool: K → (position, value)    everything else
//!   keys: [ ... ]                  dense vector over the pool for O(1)
//!                                  uniform selection (swap-remove)
//! ```
//!
//! The RNG is an embedded XorShift64; construct with
//! [`NmruCache::with_seed`] for deterministic eviction in tests.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                                  |
//! |-----------|----------|----------------------------------------|
//! | `get`     | O(1) avg | pool hit swaps key into the MRU slot   |
//! | `put`     | O(1) avg | swap-remove eviction from the pool     |
//! | `clear`   | O(n)     | drops every entry                      |
//!
//! ## When to Use
//!
//! **Use NMRU when:**
//! - The key just used is near-certain to be used again immediately, but
//!   everything older is equally disposable
//! - RR's behavior is wanted with a floor: the active key never vanishes
//!   between its miss-compute and the next call
//!
//! **Avoid NMRU when:**
//! - More than one key is hot at a time (use LRU or SLRU)
//! - Reproducible victim order matters beyond a fixed seed
//!
//! ## Thread Safety
//!
//! - [`NmruCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Wikipedia: Cache replacement policies

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::policy::rr::XorShift64;
use crate::traits::{CacheEngine, Capacity};

/// Not-most-recently-used cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::nmru::NmruCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = NmruCache::with_seed(3, 11).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c");
/// cache.put(4, "d"); // victim drawn from {1, 2}; 3 is protected
///
/// assert!(cache.get(&3).is_some());
/// assert!(cache.get(&4).is_some());
/// assert_eq!(cache.len(), 3);
/// ```
#[derive(Debug)]
pub struct NmruCache<K, V> {
    pool: FxHashMap<K, (usize, V)>,
    keys: Vec<K>,
    mru: Option<(K, V)>,
    capacity: usize,
    rng: XorShift64,
    hits: u64,
    misses: u64,
}

impl<K, V> NmruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an NMRU cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::nmru::NmruCache;
    ///
    /// let cache: NmruCache<u32, String> = NmruCache::new(128).unwrap();
    /// assert!(NmruCache::<u32, u32>::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_seed(size, size as u64)
    }

    /// Creates an NMRU cache with an explicit RNG seed.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::nmru::NmruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let cache = NmruCache::<u32, u32>::with_seed(8, 42).unwrap();
    /// assert!(cache.is_empty());
    /// ```
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::new("size must be > 0"));
        }
        Ok(Self {
            pool: FxHashMap::with_capacity_and_hasher(size, Default::default()),
            keys: Vec::with_capacity(size),
            mru: None,
            capacity: size,
            rng: XorShift64::new(seed),
            hits: 0,
            misses: 0,
        })
    }

    /// Returns the currently protected key, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::nmru::NmruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = NmruCache::with_seed(3, 1).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// assert_eq!(cache.protected_key(), Some(&2));
    ///
    /// cache.get(&1); // a hit takes over the protected slot
    /// assert_eq!(cache.protected_key(), Some(&1));
    /// ```
    pub fn protected_key(&self) -> Option<&K> {
        self.mru.as_ref().map(|(key, _)| key)
    }

    fn mru_matches(&self, key: &K) -> bool {
        self.mru.as_ref().map(|(k, _)| k == key).unwrap_or(false)
    }

    /// Removes `key` from the pool, keeping the dense vector compact.
    fn take_from_pool(&mut self, key: &K) -> Option<V> {
        let (pos, value) = self.pool.remove(key)?;
        let last = self.keys.len() - 1;
        self.keys.swap(pos, last);
        if pos != last {
            let moved = self.keys[pos].clone();
            if let Some((indexed_pos, _)) = self.pool.get_mut(&moved) {
                *indexed_pos = pos;
            }
        }
        self.keys.pop();
        Some(value)
    }

    fn push_to_pool(&mut self, key: K, value: V) {
        let pos = self.keys.len();
        self.keys.push(key.clone());
        self.pool.insert(key, (pos, value));
    }

    /// Demotes the protected entry into the pool and installs a new one.
    fn promote(&mut self, key: K, value: V) {
        if let Some((old_key, old_value)) = self.mru.take() {
            self.push_to_pool(old_key, old_value);
        }
        self.mru = Some((key, value));
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.keys.len(), self.pool.len());
        for (pos, key) in self.keys.iter().enumerate() {
            let (indexed_pos, _) = self.pool.get(key).expect("key missing from pool");
            assert_eq!(*indexed_pos, pos);
            assert!(!self.mru_matches(key), "protected key duplicated in pool");
        }
    }
}

impl<K, V> CacheEngine<K, V> for NmruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key; a pool hit moves it into the protected slot.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::nmru::NmruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = NmruCache::with_seed(3, 7).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a")); // 1 is now protected
    /// assert_eq!(cache.get(&9), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        if self.mru_matches(key) {
            self.hits += 1;
            return self.mru.as_ref().map(|(_, value)| value);
        }
        match self.take_from_pool(key) {
            Some(value) => {
                self.hits += 1;
                // The accessed key becomes the protected one
                self.promote(key.clone(), value);
                self.mru.as_ref().map(|(_, value)| value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts, evicting a random non-protected key when full. The new key
    /// takes the protected slot.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::nmru::NmruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = NmruCache::with_seed(2, 7).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c"); // victim is 1, the only unprotected key
    ///
    /// assert_eq!(cache.get(&1), None);
    /// assert_eq!(cache.get(&3), Some(&"c"));
    /// ```
    fn put(&mut self, key: K, value: V) {
        if self.mru_matches(&key) {
            self.mru = Some((key, value));
            return;
        }
        if self.take_from_pool(&key).is_some() {
            // Replace: fresh insertion, so the key takes the protected slot
            self.promote(key, value);
            return;
        }

        if self.len() >= self.capacity {
            if self.keys.is_empty() {
                // Lone resident: the protected key itself is the victim
                self.mru = None;
            } else {
                let victim_idx = (self.rng.next() as usize) % self.keys.len();
                let victim = self.keys[victim_idx].clone();
                self.take_from_pool(&victim);
            }
        }
        self.promote(key, value);
    }

    fn clear(&mut self) {
        self.pool.clear();
        self.keys.clear();
        self.mru = None;
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.pool.len() + usize::from(self.mru.is_some())
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
