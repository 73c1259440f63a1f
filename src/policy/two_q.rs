//! Simple 2Q cache engine.
//!
//! Two hard-capped queues: a FIFO **secondary** that receives every new key
//! and an LRU **primary** that holds keys hit while in secondary. Unlike
//! SLRU, the primary evicts outright when full during promotion; entries are
//! never demoted back.
//!
//! ```text
//!   put(new) ──► secondary (FIFO, cap Ps) ── overflow ──► evicted
//!                    │ hit
//!                    ▼
//!                primary (LRU, cap Pp) ── overflow on promote ──► evicted
//! ```
//!
//! `max_size` is the sum of both queue capacities.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                                     |
//! |-----------|----------|-------------------------------------------|
//! | `get`     | O(1) avg | primary hit: splice; secondary: promote   |
//! | `put`     | O(1) avg | at most one secondary eviction            |
//! | `clear`   | O(n)     | drops both queues                         |
//!
//! ## When to Use
//!
//! **Use 2Q-simple when:**
//! - Scan resistance is wanted with a hard bound on each queue
//! - SLRU's demotion churn is undesirable (here a primary overflow is a
//!   clean eviction, not a shuffle back to probationary)
//!
//! **Avoid 2Q-simple when:**
//! - Demoted-but-warm keys deserve a second stay (use SLRU)
//! - A deeper reuse signal is needed before promotion (use 2Q-full)
//!
//! ## Thread Safety
//!
//! - [`TwoQCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Johnson, Shasha: "2Q: A Low Overhead High Performance Buffer
//!   Management Replacement Algorithm"

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

/// Which queue an entry currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queue {
    /// LRU queue of keys hit at least once while in secondary.
    Primary,
    /// FIFO queue receiving all new keys.
    Secondary,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Simple 2Q cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::two_q::{Queue, TwoQCache};
/// use memokit::traits::CacheEngine;
///
/// let mut cache = TwoQCache::new(2, 2).unwrap();
/// cache.put(1, "a");
/// assert_eq!(cache.queue_of(&1), Some(Queue::Secondary));
///
/// cache.get(&1); // promoted
/// assert_eq!(cache.queue_of(&1), Some(Queue::Primary));
/// ```
#[derive(Debug)]
pub struct TwoQCache<K, V> {
    index: FxHashMap<K, (Queue, SlotId)>,
    primary: IntrusiveList<Entry<K, V>>,
    secondary: IntrusiveList<Entry<K, V>>,
    primary_cap: usize,
    secondary_cap: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> TwoQCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a 2Q cache with the given primary and secondary sizes.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if either size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q::TwoQCache;
    /// use memokit::traits::{CacheEngine, Capacity};
    ///
    /// let cache: TwoQCache<u32, u32> = TwoQCache::new(8, 4).unwrap();
    /// assert_eq!(cache.capacity(), Capacity::Bounded(12));
    ///
    /// assert!(TwoQCache::<u32, u32>::new(0, 4).is_err());
    /// ```
    pub fn new(primary_size: usize, secondary_size: usize) -> Result<Self, ConfigError> {
        if primary_size == 0 {
            return Err(ConfigError::new("primary_size must be > 0"));
        }
        if secondary_size == 0 {
            return Err(ConfigError::new("secondary_size must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(
                primary_size + secondary_size,
                Default::default(),
            ),
            primary: IntrusiveList::with_capacity(primary_size),
            secondary: IntrusiveList::with_capacity(secondary_size),
            primary_cap: primary_size,
            secondary_cap: secondary_size,
            hits: 0,
            misses: 0,
        })
    }

    /// Reports which queue holds `key`, if resident.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q::{Queue, TwoQCache};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQCache::new(2, 2).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.queue_of(&1), Some(Queue::Secondary));
    /// assert_eq!(cache.queue_of(&9), None);
    /// ```
    pub fn queue_of(&self, key: &K) -> Option<Queue> {
        self.index.get(key).map(|&(queue, _)| queue)
    }

    /// Moves a secondary entry into primary, evicting the primary LRU if
    /// needed.
    fn promote(&mut self, id: SlotId) -> Option<SlotId> {
        let entry = self.secondary.remove(id)?;

        if self.primary.len() >= self.primary_cap {
            if let Some(victim) = self.primary.pop_back() {
                self.index.remove(&victim.key);
            }
        }

        let key = entry.key.clone();
        let new_id = self.primary.push_front(entry);
        self.index.insert(key, (Queue::Primary, new_id));
        Some(new_id)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.primary.len() + self.secondary.len());
        assert!(self.primary.len() <= self.primary_cap);
        assert!(self.secondary.len() <= self.secondary_cap);
    }
}

impl<K, V> CacheEngine<K, V> for TwoQCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key; a secondary hit promotes it into primary, evicting
    /// the primary LRU outright if primary is full.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q::{Queue, TwoQCache};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQCache::new(2, 2).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// assert_eq!(cache.queue_of(&1), Some(Queue::Primary));
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&(Queue::Primary, id)) => {
                self.hits += 1;
                self.primary.move_to_front(id);
                self.primary.get(id).map(|entry| &entry.value)
            }
            Some(&(Queue::Secondary, id)) => {
                self.hits += 1;
                let new_id = self.promote(id)?;
                self.primary.get(new_id).map(|entry| &entry.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts into the secondary queue, evicting its oldest entry if it is
    /// full.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::two_q::TwoQCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = TwoQCache::new(2, 2).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c"); // secondary full: 1 evicted in FIFO order
    ///
    /// assert_eq!(cache.get(&1), None);
    /// assert_eq!(cache.get(&2), Some(&"b"));
    /// ```
    fn put(&mut self, key: K, value: V) {
        if let Some((queue, id)) = self.index.remove(&key) {
            match queue {
                Queue::Primary => self.primary.remove(id),
                Queue::Secondary => self.secondary.remove(id),
            };
        }

        if self.secondary.len() >= self.secondary_cap {
            if let Some(victim) = self.secondary.pop_back() {
                self.index.remove(&victim.key);
            }
        }

        let id = self.secondary.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, (Queue::Secondary, id));
    }

    fn clear(&mut self) {
        self.index.clear();
        self.primary.clear();
        self.secondary.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.primary_cap + self.secondary_cap)
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
        assert!(TwoQCache::<u32, u32>::new(0, 2).is_err());
        assert!(TwoQCache::<u32, u32>::new(2, 0).is_err());
    }

    #[test]
    fn secondary_overflow_evicts_fifo() {
        let mut cache = TwoQCache::new(2, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c"); // secondary full: 1 evicted

        assert_eq!(cache.queue_of(&1), None);
        assert_eq!(cache.queue_of(&2), Some(Queue::Secondary));
        assert_eq!(cache.queue_of(&3), Some(Queue::Secondary));
        cache.debug_validate_invariants();
    }

    #[test]
    fn secondary_hit_promotes_immediately() {
        let mut cache = TwoQCache::new(2, 2).unwrap();
        cache.put(1, "a");
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.queue_of(&1), Some(Queue::Primary));

        // 1 no longer occupies secondary space
        cache.put(2, "b");
        cache.put(3, "c");
        assert_eq!(cache.queue_of(&2), Some(Queue::Secondary));
        assert_eq!(cache.queue_of(&3), Some(Queue::Secondary));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn primary_overflow_evicts_lru_outright() {
        let mut cache = TwoQCache::new(2, 2).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.put(2, "b");
        cache.get(&2);
        cache.put(3, "c");
        cache.get(&3); // primary full: 1 (LRU) evicted, not demoted

        assert_eq!(cache.queue_of(&1), None);
        assert_eq!(cache.queue_of(&2), Some(Queue::Primary));
        assert_eq!(cache.queue_of(&3), Some(Queue::Primary));
        cache.debug_validate_invariants();
    }

    #[test]
    fn primary_hits_refresh_recency() {
        let mut cache = TwoQCache::new(2, 2).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.put(2, "b");
        cache.get(&2);
        cache.get(&1); // 1 back to primary MRU
        cache.put(3, "c");
        cache.get(&3); // evicts 2

        assert_eq!(cache.queue_of(&2), None);
        assert_eq!(cache.queue_of(&1), Some(Queue::Primary));
    }

    #[test]
    fn replace_reenters_secondary() {
        let mut cache = TwoQCache::new(2, 2).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.put(1, "a2");

        assert_eq!(cache.queue_of(&1), Some(Queue::Secondary));
        assert_eq!(cache.get(&1), Some(&"a2"));
        assert_eq!(cache.queue_of(&1), Some(Queue::Primary));
    }

    #[test]
    fn counters_and_clear() {
        let mut cache = TwoQCache::new(1, 1).unwrap();
        cache.put(1, "a");
        cache.get(&1);
        cache.get(&9);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        cache.clear();
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), Capacity::Bounded(2));
    }
}
