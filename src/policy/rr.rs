//! # Random Replacement (RR) Cache Engine
//!
//! Victims are selected uniformly at random when capacity is reached.
//! Accessing a key never changes its eviction probability, which makes RR a
//! useful baseline: no bookkeeping on hits, O(1) everything, and immune to
//! adversarial access patterns by construction.
//!
//! ## Victim selection
//!
//! ```text
//!   keys: [A, B, C, D]          index: K → (position, value)
//!
//!   evict:
//!     1. i = rng() % len                 e.g. i = 1 (B)
//!     2. swap keys[i] with keys[last]    [A, D, C, B]
//!     3. fix D's position in the index
//!     4. pop B, remove from index
//! ```
//!
//! The dense key vector plus reverse index gives O(1) uniform selection and
//! O(1) removal. The RNG is an embedded XorShift64 so eviction sequences
//! are deterministic for a given seed; tests construct with [`RrCache::with_seed`].
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                                   |
//! |-----------|----------|-----------------------------------------|
//! | `get`     | O(1) avg | pure lookup, no bookkeeping             |
//! | `put`     | O(1) avg | swap-remove eviction, no list structure |
//! | `clear`   | O(n)     | drops every entry                       |
//! | Per-entry | -        | one key clone + vector slot             |
//!
//! ## When to Use
//!
//! **Use RR when:**
//! - A baseline for comparing smarter policies is needed
//! - Access patterns are adversarial or genuinely uniform
//! - Minimal per-access overhead beats hit-rate tuning
//!
//! **Avoid RR when:**
//! - Temporal locality exists (use LRU): RR offers no guarantee that a
//!   just-used key survives the next insertion
//! - Stable hot spots should be protected (use LFU)
//!
//! ## Implementation Notes
//!
//! - `Vec<K>` + reverse index in the map enables swap-remove in O(1)
//! - XorShift64 state avoids system-time dependencies, so eviction is
//!   reproducible under a fixed seed
//!
//! ## Thread Safety
//!
//! - [`RrCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Wikipedia: Cache replacement policies

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

/// Minimal XorShift64 PRNG for victim selection.
///
/// Deterministic for a given seed and free of system-time dependencies.
#[derive(Debug, Clone)]
pub(crate) struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub(crate) fn new(seed: u64) -> Self {
        // State must be non-zero for XorShift to cycle
        let state = seed ^ 0x9e37_79b9_7f4a_7c15;
        Self {
            state: if state == 0 { 0x9e37_79b9_7f4a_7c15 } else { state },
        }
    }

    pub(crate) fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Random-replacement cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::rr::RrCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = RrCache::with_seed(2, 7).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c"); // one of {1, 2} was evicted, uniformly at random
///
/// assert_eq!(cache.len(), 2);
/// assert!(cache.get(&3).is_some());
/// ```
#[derive(Debug)]
pub struct RrCache<K, V> {
    index: FxHashMap<K, (usize, V)>,
    keys: Vec<K>,
    capacity: usize,
    rng: XorShift64,
    hits: u64,
    misses: u64,
}

impl<K, V> RrCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an RR cache holding at most `size` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::rr::RrCache;
    ///
    /// let cache: RrCache<u32, String> = RrCache::new(128).unwrap();
    /// assert!(RrCache::<u32, u32>::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_seed(size, size as u64)
    }

    /// Creates an RR cache with an explicit RNG seed, for deterministic
    /// eviction sequences in tests.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::rr::RrCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let cache = RrCache::<u32, u32>::with_seed(8, 42).unwrap();
    /// assert!(cache.is_empty());
    /// ```
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::new("size must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(size, Default::default()),
            keys: Vec::with_capacity(size),
            capacity: size,
            rng: XorShift64::new(seed),
            hits: 0,
            misses: 0,
        })
    }

    fn evict_random(&mut self) {
        if self.keys.is_empty() {
            return;
        }
        let last = self.keys.len() - 1;
        let victim_idx = (self.rng.next() as usize) % self.keys.len();

        self.keys.swap(victim_idx, last);
        if victim_idx != last {
            let moved = self.keys[victim_idx].clone();
            if let Some((pos, _)) = self.index.get_mut(&moved) {
                *pos = victim_idx;
            }
        }
        if let Some(victim) = self.keys.pop() {
            self.index.remove(&victim);
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.keys.len(), self.index.len());
        for (pos, key) in self.keys.iter().enumerate() {
            let (indexed_pos, _) = self.index.get(key).expect("key missing from index");
            assert_eq!(*indexed_pos, pos);
        }
    }
}

impl<K, V> CacheEngine<K, V> for RrCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key. Hits change nothing but the counters: access has no
    /// effect on eviction probability.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::rr::RrCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = RrCache::with_seed(4, 1).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// assert_eq!(cache.get(&9), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some((_, value)) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts or updates, evicting a uniformly random entry when full.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::rr::RrCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = RrCache::with_seed(2, 1).unwrap();
    /// cache.put(1, "a");
    /// cache.put(1, "b"); // replace: a plain value swap
    /// assert_eq!(cache.get(&1), Some(&"b"));
    ///
    /// for i in 2..10 {
    ///     cache.put(i, "x");
    /// }
    /// assert_eq!(cache.len(), 2); // capacity held through random eviction
    /// ```
    fn put(&mut self, key: K, value: V) {
        // No ordering metadata: a replace is a plain value swap
        if let Some((_, stored)) = self.index.get_mut(&key) {
            *stored = value;
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_random();
        }

        let pos = self.keys.len();
        self.keys.push(key.clone());
        self.index.insert(key, (pos, value));
    }

    fn clear(&mut self) {
        self.index.clear();
        self.keys.clear();
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
        assert!(RrCache::<u32, u32>::new(0).is_err());
    }

    #[test]
    fn xorshift_is_deterministic_per_seed() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        for _ in 0..16 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn capacity_is_enforced() {
        let mut cache = RrCache::with_seed(4, 1).unwrap();
        for i in 0..32 {
            cache.put(i, i * 10);
            assert!(cache.len() <= 4);
            cache.debug_validate_invariants();
        }
        assert_eq!(cache.len(), 4);
        // The newest insertion always survives its own put
        assert_eq!(cache.get(&31), Some(&310));
    }

    #[test]
    fn replace_keeps_size_and_updates_value() {
        let mut cache = RrCache::with_seed(2, 1).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(1, "a2");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"a2"));
        assert_eq!(cache.get(&2), Some(&"b"));
    }

    #[test]
    fn same_seed_evicts_same_victims() {
        let run = |seed: u64| {
            let mut cache = RrCache::with_seed(8, seed).unwrap();
            for i in 0..64u32 {
                cache.put(i, ());
            }
            let mut survivors: Vec<_> = (0..64u32).filter(|i| cache.get(i).is_some()).collect();
            survivors.sort_unstable();
            survivors
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn eviction_covers_all_positions_eventually() {
        // With enough churn, both early and late insertions get evicted
        let mut cache = RrCache::with_seed(4, 99).unwrap();
        for i in 0..4 {
            cache.put(i, ());
        }
        for i in 4..200 {
            cache.put(i, ());
        }
        let early_survivors = (0..4).filter(|i| cache.index.contains_key(i)).count();
        assert!(early_survivors == 0, "ancient keys should be long gone");
    }

    #[test]
    fn counters_and_clear() {
        let mut cache = RrCache::with_seed(2, 3).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&9);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        cache.clear();
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
        assert!(cache.is_empty());
        cache.debug_validate_invariants();
    }
}
