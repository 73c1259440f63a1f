//! # Time-aware LRU (TLRU) Cache Engine
//!
//! LRU with expiry deadlines: entries die of old age even if capacity never
//! forces them out. Two ordering structures reference the same entry set,
//! so each entry carries two list handles.
//!
//! ## Architecture
//!
//! ```text
//!   entries: SlotArena<TlruEntry { key, value, deadline,
//!                                  recency node, expiry node }>
//!
//!   recency list (LRU)      front ─► [C] ◄──► [A] ◄──► [B] ◄── back
//!                                    MRU              LRU ──► capacity victim
//!
//!   expiry list             front ─► [C] ◄──► [B] ◄──► [A] ◄── back
//!   (deadline order)                newest            earliest ──► sweeps first
//! ```
//!
//! Deadlines are monotone along the expiry list by construction: with
//! `reset_on_access` the list is access-ordered (refreshed entries move to
//! the newest end), otherwise it is insertion-ordered and deadlines are
//! fixed at insert. Either way only the list's oldest end can expire next,
//! so the sweep at the start of every operation inspects just that end.
//!
//! Time is an access-tick counter (`access_based = true`) or wall-clock
//! seconds. Capacity may be `None`: the cache is then unbounded and entries
//! leave only by expiry or `clear`.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time           | Notes                                  |
//! |-----------|----------------|----------------------------------------|
//! | `get`     | O(1) amortized | sweep pops expired entries first       |
//! | `put`     | O(1) amortized | sweep + at most one capacity eviction  |
//! | `clear`   | O(n)           | drops both lists and restarts the clock|
//! | Per-entry | -              | two list nodes + deadline              |
//!
//! The sweep inspects only the expiry list's oldest end; each removal was
//! paid for by the insert or refresh that scheduled it, so expiry work
//! amortizes to O(1) per access.
//!
//! ## When to Use
//!
//! **Use TLRU when:**
//! - Cached results go stale on their own (sessions, DNS-style answers,
//!   rate-limit windows) and must not be served past a deadline
//! - With `reset_on_access = false`: staleness is absolute from insertion
//! - With `reset_on_access = true`: idleness, not age, is what expires keys
//!
//! **Use the unbounded mode when:**
//! - Expiry alone bounds memory acceptably; there is no capacity ceiling,
//!   so the high-water mark is the widest set of entries younger than
//!   `expire_time`
//!
//! **Avoid TLRU when:**
//! - Entries never go stale (plain LRU skips the second list and the sweep)
//! - Wall-clock mode is paired with sub-second lifetimes; ticks are whole
//!   seconds
//!
//! ## Thread Safety
//!
//! - [`TlruCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Wikipedia: Cache replacement policies (time-aware variants)

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::clock::TickClock;
use crate::ds::{IntrusiveList, SlotArena, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

/// Configuration for [`TlruCache`].
///
/// # Example
///
/// ```
/// use memokit::policy::tlru::TlruConfig;
///
/// let config = TlruConfig::new(3, 100).access_based(true).reset_on_access(false);
/// assert_eq!(config.size, Some(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TlruConfig {
    /// Entry capacity; `None` disables capacity eviction entirely.
    pub size: Option<usize>,
    /// Expiry interval: accesses (access-based) or seconds (wall-clock).
    pub expire_time: u64,
    /// `true`: time advances one tick per access. `false`: wall-clock
    /// seconds. Defaults to wall-clock.
    pub access_based: bool,
    /// Whether a hit pushes the deadline out by another interval.
    /// Defaults to `true`.
    pub reset_on_access: bool,
}

impl TlruConfig {
    /// Creates a bounded configuration with wall-clock time and
    /// reset-on-access behavior.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::TlruConfig;
    ///
    /// let config = TlruConfig::new(64, 30);
    /// assert_eq!(config.size, Some(64));
    /// assert!(!config.access_based);
    /// assert!(config.reset_on_access);
    /// ```
    pub fn new(size: usize, expire_time: u64) -> Self {
        Self {
            size: Some(size),
            expire_time,
            access_based: false,
            reset_on_access: true,
        }
    }

    /// Creates an unbounded configuration: entries leave only by expiry.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::TlruConfig;
    ///
    /// let config = TlruConfig::unbounded(60);
    /// assert_eq!(config.size, None);
    /// ```
    pub fn unbounded(expire_time: u64) -> Self {
        Self {
            size: None,
            expire_time,
            access_based: false,
            reset_on_access: true,
        }
    }

    /// Selects access-based or wall-clock time.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::TlruConfig;
    ///
    /// let config = TlruConfig::new(8, 5).access_based(true);
    /// assert!(config.access_based);
    /// ```
    pub fn access_based(mut self, access_based: bool) -> Self {
        self.access_based = access_based;
        self
    }

    /// Selects whether hits refresh deadlines.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::TlruConfig;
    ///
    /// let config = TlruConfig::new(8, 5).reset_on_access(false);
    /// assert!(!config.reset_on_access);
    /// ```
    pub fn reset_on_access(mut self, reset_on_access: bool) -> Self {
        self.reset_on_access = reset_on_access;
        self
    }
}

#[derive(Debug)]
struct TlruEntry<K, V> {
    key: K,
    value: V,
    deadline: u64,
    recency_node: Option<SlotId>,
    expiry_node: Option<SlotId>,
}

/// Time-aware LRU cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::tlru::{TlruCache, TlruConfig};
/// use memokit::traits::CacheEngine;
///
/// // Expire after 2 accesses without a refresh
/// let config = TlruConfig::new(8, 2).access_based(true).reset_on_access(true);
/// let mut cache = TlruCache::new(config).unwrap();
///
/// cache.put(1, "a");
/// cache.get(&1);   // refreshed
/// cache.get(&99);  // idle tick
/// cache.get(&99);  // idle tick: 1's deadline passes
/// assert_eq!(cache.get(&1), None);
/// ```
#[derive(Debug)]
pub struct TlruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    entries: SlotArena<TlruEntry<K, V>>,
    recency: IntrusiveList<SlotId>,
    expiry: IntrusiveList<SlotId>,
    clock: TickClock,
    size: Option<usize>,
    expire_time: u64,
    reset_on_access: bool,
    hits: u64,
    misses: u64,
}

impl<K, V> TlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a TLRU cache from `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `expire_time` is zero or `size` is `Some(0)`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::{TlruCache, TlruConfig};
    ///
    /// let cache = TlruCache::<u32, u32>::new(TlruConfig::new(64, 30));
    /// assert!(cache.is_ok());
    ///
    /// let bad = TlruCache::<u32, u32>::new(TlruConfig::new(64, 0));
    /// assert!(bad.is_err());
    /// ```
    pub fn new(config: TlruConfig) -> Result<Self, ConfigError> {
        if config.expire_time == 0 {
            return Err(ConfigError::new("expire_time must be > 0"));
        }
        if config.size == Some(0) {
            return Err(ConfigError::new("size must be > 0 or unbounded"));
        }
        let reserve = config.size.unwrap_or(0);
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            entries: SlotArena::with_capacity(reserve),
            recency: IntrusiveList::with_capacity(reserve),
            expiry: IntrusiveList::with_capacity(reserve),
            clock: TickClock::new(config.access_based),
            size: config.size,
            expire_time: config.expire_time,
            reset_on_access: config.reset_on_access,
            hits: 0,
            misses: 0,
        })
    }

    /// Returns the expiry deadline of a live key.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::{TlruCache, TlruConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let config = TlruConfig::new(4, 10).access_based(true);
    /// let mut cache = TlruCache::new(config).unwrap();
    ///
    /// cache.put(1, "a"); // tick 1
    /// assert_eq!(cache.deadline_of(&1), Some(11));
    /// assert_eq!(cache.deadline_of(&9), None);
    /// ```
    pub fn deadline_of(&self, key: &K) -> Option<u64> {
        let &eid = self.index.get(key)?;
        self.entries.get(eid).map(|entry| entry.deadline)
    }

    /// Removes an entry from both lists and the index.
    fn remove_entry(&mut self, eid: SlotId) {
        if let Some(entry) = self.entries.remove(eid) {
            if let Some(node) = entry.recency_node {
                self.recency.remove(node);
            }
            if let Some(node) = entry.expiry_node {
                self.expiry.remove(node);
            }
            self.index.remove(&entry.key);
        }
    }

    /// Evicts everything whose deadline has passed. Deadlines are monotone
    /// along the expiry list, so only its oldest end needs inspection.
    fn sweep(&mut self, now: u64) {
        loop {
            let eid = match self.expiry.back() {
                Some(&eid) => eid,
                None => break,
            };
            let expired = self
                .entries
                .get(eid)
                .map(|entry| entry.deadline < now)
                .unwrap_or(false);
            if !expired {
                break;
            }
            self.remove_entry(eid);
        }
    }

    fn insert_entry(&mut self, key: K, value: V, now: u64) {
        let eid = self.entries.insert(TlruEntry {
            key: key.clone(),
            value,
            deadline: now + self.expire_time,
            recency_node: None,
            expiry_node: None,
        });
        let recency_node = self.recency.push_front(eid);
        let expiry_node = self.expiry.push_front(eid);
        if let Some(entry) = self.entries.get_mut(eid) {
            entry.recency_node = Some(recency_node);
            entry.expiry_node = Some(expiry_node);
        }
        self.index.insert(key, eid);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.entries.len());
        assert_eq!(self.recency.len(), self.entries.len());
        assert_eq!(self.expiry.len(), self.entries.len());
        if let Some(cap) = self.size {
            assert!(self.entries.len() <= cap);
        }
        // Deadlines are monotone from expiry front (latest) to back (earliest)
        let mut previous: Option<u64> = None;
        for &eid in self.expiry.iter() {
            let deadline = self.entries.get(eid).expect("entry missing").deadline;
            if let Some(previous) = previous {
                assert!(deadline <= previous, "expiry list out of order");
            }
            previous = Some(deadline);
        }
    }
}

impl<K, V> CacheEngine<K, V> for TlruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key: ticks the clock, sweeps expired entries, then
    /// refreshes recency (and the deadline, with `reset_on_access`).
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::{TlruCache, TlruConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let config = TlruConfig::new(4, 2).access_based(true).reset_on_access(false);
    /// let mut cache = TlruCache::new(config).unwrap();
    ///
    /// cache.put(1, "a"); // tick 1, deadline 3
    /// assert_eq!(cache.get(&1), Some(&"a")); // tick 2
    /// assert_eq!(cache.get(&1), Some(&"a")); // tick 3: 3 < 3 is false
    /// assert_eq!(cache.get(&1), None); // tick 4: expired mid-access
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.advance();
        self.sweep(now);

        let eid = match self.index.get(key) {
            Some(&eid) => eid,
            None => {
                self.misses += 1;
                return None;
            }
        };
        self.hits += 1;

        let (recency_node, expiry_node) = match self.entries.get(eid) {
            Some(entry) => (entry.recency_node, entry.expiry_node),
            None => return None,
        };
        if let Some(node) = recency_node {
            self.recency.move_to_front(node);
        }
        if self.reset_on_access {
            if let Some(entry) = self.entries.get_mut(eid) {
                entry.deadline = now + self.expire_time;
            }
            if let Some(node) = expiry_node {
                self.expiry.move_to_front(node);
            }
        }

        self.entries.get(eid).map(|entry| &entry.value)
    }

    /// Inserts with a fresh deadline; capacity overflow evicts the recency
    /// LRU, independently of expiry.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::tlru::{TlruCache, TlruConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let config = TlruConfig::new(2, 100).access_based(true);
    /// let mut cache = TlruCache::new(config).unwrap();
    ///
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.get(&1); // 2 is now the recency LRU
    /// cache.put(3, "c"); // capacity eviction takes 2
    ///
    /// assert_eq!(cache.deadline_of(&2), None);
    /// assert!(cache.deadline_of(&1).is_some());
    /// ```
    fn put(&mut self, key: K, value: V) {
        let now = self.clock.advance();
        self.sweep(now);

        // Replace = remove then insert fresh
        if let Some(&eid) = self.index.get(&key) {
            self.remove_entry(eid);
        }

        if let Some(cap) = self.size {
            if self.index.len() >= cap {
                if let Some(&victim) = self.recency.back() {
                    self.remove_entry(victim);
                }
            }
        }

        self.insert_entry(key, value, now);
    }

    fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.recency.clear();
        self.expiry.clear();
        self.clock.reset();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> Capacity {
        match self.size {
            Some(cap) => Capacity::Bounded(cap),
            None => Capacity::Unbounded,
        }
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn misses(&self) -> u64 {
        self.misses
    }
}
