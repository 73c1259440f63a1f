//! # Segmented LRU (SLRU) Cache Engine
//!
//! Two segments over one cache: a **probationary** segment ordered by
//! arrival and a **protected** segment ordered by recency. New keys earn
//! their way in: they start probationary, and only a hit promotes them to
//! protected. One-shot keys therefore wash out of probationary without ever
//! displacing the proven working set.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                        SlruCache<K, V>                            │
//!   │                                                                   │
//!   │  index: K → (Segment, SlotId)                                     │
//!   │                                                                   │
//!   │  probationary (arrival order)        protected (recency, cap Q)   │
//!   │  front ─► [E] ◄──► [D] ◄── back      front ─► [B] ◄──► [A] ◄─ back│
//!   │         newest      oldest ──evict          MRU        LRU ──┐    │
//!   │                        ▲                                     │    │
//!   │                        │            demote when protected    │    │
//!   │                        └────────────── overflows on promote ─┘    │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Capacity accounting is global: the cache holds `P + Q` entries, and the
//! probationary segment absorbs whatever protected does not use. Eviction
//! happens only when a new key arrives with the cache full, and always takes
//! the probationary oldest. The protected segment is bounded at `Q` by
//! demotion: promoting into a full protected segment pushes its LRU back to
//! the probationary newest end (demotion never evicts).
//!
//! ## Performance Characteristics
//!
//! | Operation | Time     | Notes                                  |
//! |-----------|----------|----------------------------------------|
//! | `get`     | O(1) avg | protected hit: splice; probationary hit: promote (+ possible demotion) |
//! | `put`     | O(1) avg | at most one probationary eviction      |
//! | `clear`   | O(n)     | drops both segments                    |
//!
//! ## When to Use
//!
//! **Use SLRU when:**
//! - One-time scans would flood a plain LRU; unreferenced keys wash out of
//!   probationary without touching the proven working set
//! - A second access is a meaningful signal of reuse
//!
//! **Avoid SLRU when:**
//! - Every key really is used once (plain FIFO is cheaper)
//! - Popularity counts matter more than a one-bit reuse signal (use LFU)
//!
//! ## Thread Safety
//!
//! - [`SlruCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Karedla, Love, Wherry: "Caching Strategies to Improve Disk System
//!   Performance"

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

/// Which segment an entry currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Arrival-ordered entry segment; eviction source.
    Probationary,
    /// Recency-ordered segment for keys that have been hit.
    Protected,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Segmented-LRU cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::slru::{Segment, SlruCache};
/// use memokit::traits::CacheEngine;
///
/// let mut cache = SlruCache::new(2, 2).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1); // 1 promoted to protected
///
/// assert_eq!(cache.segment_of(&1), Some(Segment::Protected));
/// assert_eq!(cache.segment_of(&2), Some(Segment::Probationary));
/// ```
#[derive(Debug)]
pub struct SlruCache<K, V> {
    index: FxHashMap<K, (Segment, SlotId)>,
    probationary: IntrusiveList<Entry<K, V>>,
    protected: IntrusiveList<Entry<K, V>>,
    protected_cap: usize,
    probationary_cap: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> SlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an SLRU cache with the given protected and probationary
    /// sizes; total capacity is their sum.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if either size is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::slru::SlruCache;
    /// use memokit::traits::{CacheEngine, Capacity};
    ///
    /// let cache: SlruCache<u32, u32> = SlruCache::new(8, 4).unwrap();
    /// assert_eq!(cache.capacity(), Capacity::Bounded(12));
    ///
    /// assert!(SlruCache::<u32, u32>::new(0, 4).is_err());
    /// assert!(SlruCache::<u32, u32>::new(8, 0).is_err());
    /// ```
    pub fn new(protected_size: usize, probationary_size: usize) -> Result<Self, ConfigError> {
        if protected_size == 0 {
            return Err(ConfigError::new("protected_size must be > 0"));
        }
        if probationary_size == 0 {
            return Err(ConfigError::new("probationary_size must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(
                protected_size + probationary_size,
                Default::default(),
            ),
            probationary: IntrusiveList::with_capacity(probationary_size),
            protected: IntrusiveList::with_capacity(protected_size),
            protected_cap: protected_size,
            probationary_cap: probationary_size,
            hits: 0,
            misses: 0,
        })
    }

    /// Reports which segment holds `key`, if resident.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::slru::{Segment, SlruCache};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = SlruCache::new(2, 2).unwrap();
    /// cache.put(1, "a");
    /// assert_eq!(cache.segment_of(&1), Some(Segment::Probationary));
    ///
    /// cache.get(&1);
    /// assert_eq!(cache.segment_of(&1), Some(Segment::Protected));
    /// assert_eq!(cache.segment_of(&9), None);
    /// ```
    pub fn segment_of(&self, key: &K) -> Option<Segment> {
        self.index.get(key).map(|&(segment, _)| segment)
    }

    /// Moves an entry from probationary into protected, demoting the
    /// protected LRU back to probationary if needed.
    fn promote(&mut self, id: SlotId) -> Option<SlotId> {
        let entry = self.probationary.remove(id)?;

        if self.protected.len() >= self.protected_cap {
            if let Some(demoted) = self.protected.pop_back() {
                let demoted_key = demoted.key.clone();
                let new_id = self.probationary.push_front(demoted);
                self.index
                    .insert(demoted_key, (Segment::Probationary, new_id));
            }
        }

        let key = entry.key.clone();
        let new_id = self.protected.push_front(entry);
        self.index.insert(key, (Segment::Protected, new_id));
        Some(new_id)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(
            self.index.len(),
            self.probationary.len() + self.protected.len()
        );
        assert!(self.protected.len() <= self.protected_cap);
        assert!(self.index.len() <= self.protected_cap + self.probationary_cap);
    }
}

impl<K, V> CacheEngine<K, V> for SlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key; a probationary hit promotes it into protected.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::slru::{Segment, SlruCache};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = SlruCache::new(2, 2).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a")); // promoted
    /// assert_eq!(cache.segment_of(&1), Some(Segment::Protected));
    /// assert_eq!(cache.get(&9), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&(Segment::Protected, id)) => {
                self.hits += 1;
                self.protected.move_to_front(id);
                self.protected.get(id).map(|entry| &entry.value)
            }
            Some(&(Segment::Probationary, id)) => {
                self.hits += 1;
                let new_id = self.promote(id)?;
                self.protected.get(new_id).map(|entry| &entry.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts into probationary, evicting its oldest entry only when the
    /// whole cache is full.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::slru::SlruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = SlruCache::new(1, 1).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b"); // total 2 = P + Q, nothing evicted
    /// cache.put(3, "c"); // full: evicts 1, the probationary oldest
    ///
    /// assert_eq!(cache.segment_of(&1), None);
    /// assert_eq!(cache.len(), 2);
    /// ```
    fn put(&mut self, key: K, value: V) {
        // Replace = remove then insert fresh (re-enters probationary)
        if let Some((segment, id)) = self.index.remove(&key) {
            match segment {
                Segment::Probationary => self.probationary.remove(id),
                Segment::Protected => self.protected.remove(id),
            };
        }

        // Global accounting: evict only when the whole cache is full; the
        // victim is always the probationary oldest
        if self.index.len() >= self.protected_cap + self.probationary_cap {
            if let Some(victim) = self.probationary.pop_back() {
                self.index.remove(&victim.key);
            }
        }

        let id = self.probationary.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, (Segment::Probationary, id));
    }

    fn clear(&mut self) {
        self.index.clear();
        self.probationary.clear();
        self.protected.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.protected_cap + self.probationary_cap)
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn misses(&self) -> u64 {
        self.misses
    }
}
