//! # Full 2Q Cache Engine (with ghost out-queue)
//!
//! The full 2Q algorithm: three structures, one of which holds no values.
//!
//! ```text
//!   put(new) ──► secondary-in (FIFO, cap A2)
//!                    │ overflow: key only, value dropped
//!                    ▼
//!                secondary-out (ghost FIFO, cap A3) ── overflow ──► gone
//!                    │ put of a ghost key
//!                    ▼
//!                primary (LRU, cap A1) ── overflow ──► gone
//! ```
//!
//! Hits behave asymmetrically:
//! - primary hit: move to MRU;
//! - secondary-in hit: **no movement** (a second access soon after arrival
//!   proves nothing about reuse);
//! - ghost key `get`: a genuine **miss** (there is no value to return), but
//!   the ghost stays recorded, so the `put` that follows the miss installs
//!   the key directly into primary - the ghost hit is what qualifies a key
//!   as hot.
//!
//! `current_size` counts only value-bearing entries (primary +
//! secondary-in); `max_size` is the composite `A1 + A2 + A3`.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                                      |
//! |-----------|----------|--------------------------------------------|
//! | `get`     | O(1) avg | primary splice; secondary-in/ghost: lookup |
//! | `put`     | O(1) avg | at most one transfer + one ghost drop      |
//! | `clear`   | O(n)     | drops all three structures                 |
//! | Per-ghost | -        | key clone only, no value retained          |
//!
//! ## When to Use
//!
//! **Use 2Q-full when:**
//! - Scan resistance must be strong: a key earns primary residence only by
//!   coming back *after* aging out of secondary-in
//! - Value memory is precious; the reuse signal is tracked with keys alone
//!
//! **Avoid 2Q-full when:**
//! - Misses are cheap to tolerate but ghost-window re-computation is not:
//!   a ghost hit still costs one full recompute before the key lands hot
//! - A simpler reuse signal suffices (use 2Q-simple or SLRU)
//!
//! ## Thread Safety
//!
//! - [`TwoQFullCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Johnson, Shasha: "2Q: A Low Overhead High Performance Buffer
//!   Management Replacement Algorithm"

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{GhostList, IntrusiveList, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

/// Which value-bearing queue an entry currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// LRU queue of keys that came back after falling out of secondary-in.
    Primary,
    /// FIFO queue receiving all new keys.
    SecondaryIn,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Full 2Q cache engine with a ghost out-queue.
///
/// # Example
///
/// ```
/// use memokit::policy::two_q_full::TwoQFullCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = TwoQFullCache::new(2, 2, 2).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c"); // 1 transferred to the ghost queue
/// cache.put(4, "d"); // 2 transferred to the ghost queue
///
/// assert_eq!(cache.get(&1), None); // ghost: a miss...
/// cache.put(1, "a");               // ...but this lands in primary
/// assert!(cache.ghost_contains(&2));
/// assert!(!cache.ghost_contains(&1));
/// ```
#[derive(Debug)]
pub struct TwoQFullCache<K, V> {
    index: FxHashMap<K, (Zone, SlotId)>,
    primary: IntrusiveList<Entry<K, V>>,
    secondary_in: IntrusiveList<Entry<K, V>>,
    ghost: GhostList<K>,
    primary_cap: usize,
    secondary_in_cap: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> TwoQFullCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a full 2Q cache with the given primary, secondary-in and
    /// secondary-out sizes.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if any size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q_full::TwoQFullCache;
    /// use memokit::traits::{CacheEngine, Capacity};
    ///
    /// let cache: TwoQFullCache<u32, u32> = TwoQFullCache::new(4, 2, 4).unwrap();
    /// assert_eq!(cache.capacity(), Capacity::Bounded(10));
    ///
    /// assert!(TwoQFullCache::<u32, u32>::new(0, 2, 4).is_err());
    /// ```
    pub fn new(
        primary_size: usize,
        secondary_in_size: usize,
        secondary_out_size: usize,
    ) -> Result<Self, ConfigError> {
        if primary_size == 0 {
            return Err(ConfigError::new("primary_size must be > 0"));
        }
        if secondary_in_size == 0 {
            return Err(ConfigError::new("secondary_in_size must be > 0"));
        }
        if secondary_out_size == 0 {
            return Err(ConfigError::new("secondary_out_size must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(
                primary_size + secondary_in_size,
                Default::default(),
            ),
            primary: IntrusiveList::with_capacity(primary_size),
            secondary_in: IntrusiveList::with_capacity(secondary_in_size),
            ghost: GhostList::new(secondary_out_size),
            primary_cap: primary_size,
            secondary_in_cap: secondary_in_size,
            hits: 0,
            misses: 0,
        })
    }

    /// Reports which value-bearing queue holds `key`, if resident.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q_full::{TwoQFullCache, Zone};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQFullCache::new(2, 2, 2).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.zone_of(&1), Some(Zone::SecondaryIn));
    /// assert_eq!(cache.zone_of(&9), None);
    /// ```
    pub fn zone_of(&self, key: &K) -> Option<Zone> {
        self.index.get(key).map(|&(zone, _)| zone)
    }

    /// Returns `true` if `key` is tracked in the ghost out-queue.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q_full::TwoQFullCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b"); // 1 transferred to the ghost queue
    ///
    /// assert!(cache.ghost_contains(&1));
    /// assert!(!cache.ghost_contains(&2));
    /// ```
    pub fn ghost_contains(&self, key: &K) -> bool {
        self.ghost.contains(key)
    }

    /// Number of keys currently in the ghost out-queue.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q_full::TwoQFullCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
    /// cache.put(1, "a");
    /// assert_eq!(cache.ghost_len(), 0);
    ///
    /// cache.put(2, "b"); // 1 ghosted
    /// assert_eq!(cache.ghost_len(), 1);
    /// ```
    pub fn ghost_len(&self) -> usize {
        self.ghost.len()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(
            self.index.len(),
            self.primary.len() + self.secondary_in.len()
        );
        assert!(self.primary.len() <= self.primary_cap);
        assert!(self.secondary_in.len() <= self.secondary_in_cap);
        self.ghost.debug_validate_invariants();
    }
}

impl<K, V> CacheEngine<K, V> for TwoQFullCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key. Primary hits splice to MRU; secondary-in hits stay
    /// put; ghost keys miss.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q_full::TwoQFullCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
    /// cache.put(1, "a");
    /// assert_eq!(cache.get(&1), Some(&"a")); // stays in secondary-in
    ///
    /// cache.put(2, "b"); // 1 ghosted
    /// assert_eq!(cache.get(&1), None); // ghost keys have no value
    /// assert!(cache.ghost_contains(&1)); // the record survives the miss
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&(Zone::Primary, id)) => {
                self.hits += 1;
                self.primary.move_to_front(id);
                self.primary.get(id).map(|entry| &entry.value)
            }
            Some(&(Zone::SecondaryIn, id)) => {
                // A hit, but the entry stays in place
                self.hits += 1;
                self.secondary_in.get(id).map(|entry| &entry.value)
            }
            None => {
                // Ghost keys miss too: there is no value to hand back. The
                // ghost record survives so the follow-up put lands hot.
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key: ghost keys land directly in primary, everything else
    /// enters secondary-in (transferring its oldest to the ghost if full).
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q_full::{TwoQFullCache, Zone};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b"); // 1 ghosted
    /// cache.put(1, "a"); // ghost-informed placement
    ///
    /// assert_eq!(cache.zone_of(&1), Some(Zone::Primary));
    /// assert!(!cache.ghost_contains(&1));
    /// ```
    fn put(&mut self, key: K, value: V) {
        // Replace = remove then insert fresh: a live key re-enters below
        if let Some((zone, id)) = self.index.remove(&key) {
            match zone {
                Zone::Primary => self.primary.remove(id),
                Zone::SecondaryIn => self.secondary_in.remove(id),
            };
        }

        if self.ghost.take(&key).is_some() {
            // Ghost-informed placement: straight into primary
            if self.primary.len() >= self.primary_cap {
                if let Some(victim) = self.primary.pop_back() {
                    self.index.remove(&victim.key);
                }
            }
            let id = self.primary.push_front(Entry {
                key: key.clone(),
                value,
            });
            self.index.insert(key, (Zone::Primary, id));
            return;
        }

        if self.secondary_in.len() >= self.secondary_in_cap {
            if let Some(old) = self.secondary_in.pop_back() {
                self.index.remove(&old.key);
                // Key survives as a ghost; the value is discarded here
                self.ghost.record(old.key, ());
            }
        }
        let id = self.secondary_in.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, (Zone::SecondaryIn, id));
    }

    fn clear(&mut self) {
        self.index.clear();
        self.primary.clear();
        self.secondary_in.clear();
        self.ghost.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        // Ghosts carry no values and do not count
        self.index.len()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.primary_cap + self.secondary_in_cap + self.ghost.capacity())
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
    fn zero_sizes_are_rejected() {
        assert!(TwoQFullCache::<u32, u32>::new(0, 1, 1).is_err());
        assert!(TwoQFullCache::<u32, u32>::new(1, 0, 1).is_err());
        assert!(TwoQFullCache::<u32, u32>::new(1, 1, 0).is_err());
    }

    #[test]
    fn secondary_in_overflow_transfers_to_ghost() {
        let mut cache = TwoQFullCache::new(2, 2, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert_eq!(cache.zone_of(&1), None);
        assert!(cache.ghost_contains(&1));
        assert_eq!(cache.len(), 2); // ghost does not count
        cache.debug_validate_invariants();
    }

    #[test]
    fn ghost_get_is_a_miss() {
        let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b"); // 1 ghosted

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.misses(), 1);
        assert!(cache.ghost_contains(&1)); // record survives the miss
    }

    #[test]
    fn ghost_put_lands_in_primary() {
        let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b"); // 1 ghosted

        cache.put(1, "a");
        assert_eq!(cache.zone_of(&1), Some(Zone::Primary));
        assert!(!cache.ghost_contains(&1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn secondary_in_hit_does_not_move() {
        let mut cache = TwoQFullCache::new(2, 2, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.zone_of(&1), Some(Zone::SecondaryIn));

        // 1 is still the secondary-in oldest: next overflow takes it
        cache.put(3, "c");
        assert_eq!(cache.zone_of(&1), None);
        assert!(cache.ghost_contains(&1));
    }

    #[test]
    fn primary_overflow_evicts_lru_outright() {
        let mut cache = TwoQFullCache::new(1, 1, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b"); // 1 ghosted
        cache.put(1, "a"); // 1 → primary
        cache.put(3, "c"); // 2 ghosted
        cache.put(2, "b"); // 2 → primary; 1 evicted outright

        assert_eq!(cache.zone_of(&1), None);
        assert!(!cache.ghost_contains(&1)); // gone for good, not re-ghosted
        assert_eq!(cache.zone_of(&2), Some(Zone::Primary));
    }

    #[test]
    fn ghost_overflow_drops_oldest_ghost() {
        let mut cache = TwoQFullCache::new(2, 1, 1).unwrap();
        cache.put(1, "a");
        cache.put(2, "b"); // ghost: [1]
        cache.put(3, "c"); // ghost: [2], 1 dropped

        assert!(!cache.ghost_contains(&1));
        assert!(cache.ghost_contains(&2));
        assert_eq!(cache.ghost_len(), 1);
    }

    #[test]
    fn primary_hits_refresh_recency() {
        let mut cache = TwoQFullCache::new(2, 1, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(1, "a"); // 1 → primary
        cache.put(3, "c");
        cache.put(2, "b"); // 2 → primary; primary = [2 MRU, 1 LRU]
        cache.get(&1); // primary = [1 MRU, 2 LRU]
        cache.put(4, "d");
        cache.put(3, "c"); // 3 → primary; evicts 2

        assert_eq!(cache.zone_of(&2), None);
        assert_eq!(cache.zone_of(&1), Some(Zone::Primary));
    }

    #[test]
    fn replace_of_live_key_reenters_secondary_in() {
        let mut cache = TwoQFullCache::new(2, 2, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b"); // both fit in secondary-in
        cache.put(1, "a2");

        assert_eq!(cache.zone_of(&1), Some(Zone::SecondaryIn));
        assert_eq!(cache.get(&1), Some(&"a2"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn max_size_is_composite() {
        let cache = TwoQFullCache::<u32, u32>::new(2, 3, 4).unwrap();
        assert_eq!(cache.capacity(), Capacity::Bounded(9));
    }

    #[test]
    fn counters_and_clear() {
        let mut cache = TwoQFullCache::new(1, 1, 1).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&9);
        cache.put(2, "b"); // 1 ghosted
        cache.clear();

        assert_eq!((cache.hits(), cache.misses()), (0, 0));
        assert!(cache.is_empty());
        assert_eq!(cache.ghost_len(), 0);
        cache.debug_validate_invariants();
    }
}
