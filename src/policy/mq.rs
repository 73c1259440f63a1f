//! # Multi-Queue (MQ) Cache Engine
//!
//! N LRU queues of rising temperature plus a ghost history buffer, after
//! "The Multi-Queue Replacement Algorithm for Second Level Buffer Caches".
//! Each entry carries an access-frequency counter and an expiry deadline;
//! a promotion function maps frequency to queue level.
//!
//! ## Architecture
//!
//! ```text
//!   Q3 (hottest)  front ─► [..] ◄──► [..] ◄── back ──┐ deadline passed:
//!   Q2            front ─► [..] ◄─────────── back ◄──┘ demote one level,
//!   Q1            front ─► [..] ◄──► [..] ◄── back      deadline reset
//!   Q0 (coldest)  front ─► [..] ◄─────────── back ──► evict when full
//!                                                        │ (key, freq)
//!                                                        ▼
//!   history: ghost FIFO of (key, last frequency), cap H ──► dropped
//! ```
//!
//! ## Per-access protocol
//!
//! 1. Tick the clock (every `get` and `put`; one tick per access in
//!    access-based mode, wall seconds otherwise).
//! 2. Age: scan queue backs from `Q(N-1)` down to `Q1`; while a back entry's
//!    deadline has passed, demote it one level and reset its deadline.
//!    Only queue ends are inspected, so the work is amortized O(1).
//! 3. Perform the operation:
//!    - hit: `frequency += 1`, move to the newest end of
//!      `Q(max(f(frequency), current))`; hits never demote. Deadline reset.
//!    - put of a history key: resume at `frequency + 1` in `Q(f(freq))`.
//!    - put of a new key: `frequency = 1`, enter `Q(f(1))`.
//! 4. Overflow evicts the oldest entry of the lowest non-empty queue into
//!    the history buffer (key and frequency only; the value is dropped).
//!
//! History keys are not live: `get` on one is a miss. `current_size` counts
//! live entries only; `max_size = size + buffer_size`.
//!
//! The promotion function must be monotone non-decreasing in frequency;
//! this is documented, not verified.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time               | Notes                                |
//! |-----------|--------------------|--------------------------------------|
//! | `get`     | O(1) amortized     | aging may demote several queue heads |
//! | `put`     | O(1) amortized     | eviction scans queue levels, N small |
//! | `clear`   | O(n)               | drops queues, history and clock      |
//!
//! Each demotion during aging corresponds to an earlier access that
//! inserted or refreshed that entry, so the aging work amortizes to O(1)
//! per access; a single call demotes at most one head per level.
//!
//! ## When to Use
//!
//! **Use MQ when:**
//! - Hit temperatures span orders of magnitude (second-level buffer caches
//!   behind an upstream cache that absorbs raw recency)
//! - Frequency should decay: unlike LFU, an idle entry slides back down the
//!   queue levels as its deadlines lapse
//!
//! **Avoid MQ when:**
//! - One recency or frequency signal suffices (LRU/LFU are simpler and
//!   cheaper per access)
//! - Tuning appetite is low: queue count, expiry interval and promotion
//!   function all shape behavior
//!
//! ## Thread Safety
//!
//! - [`MqCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization
//!
//! ## References
//!
//! - Zhou, Philbin, Li: "The Multi-Queue Replacement Algorithm for Second
//!   Level Buffer Caches"

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::clock::TickClock;
use crate::ds::{GhostList, IntrusiveList, SlotArena, SlotId};
use crate::error::ConfigError;
use crate::traits::{CacheEngine, Capacity};

/// Default promotion function: `⌊log₂ frequency⌋`.
///
/// Frequencies 1, 2-3, 4-7, 8-15, ... map to queues 0, 1, 2, 3, ...
///
/// # Example
///
/// ```
/// use memokit::policy::mq::log2_queue;
///
/// assert_eq!(log2_queue(1), 0);
/// assert_eq!(log2_queue(3), 1);
/// assert_eq!(log2_queue(8), 3);
/// ```
pub fn log2_queue(frequency: u64) -> usize {
    (63 - frequency.max(1).leading_zeros()) as usize
}

/// Configuration for [`MqCache`].
///
/// # Example
///
/// ```
/// use memokit::policy::mq::MqConfig;
///
/// let config = MqConfig::new(64, 32, 16)
///     .num_queues(4)
///     .queue_func(|freq| (freq / 4) as usize)
///     .access_based(true);
/// assert_eq!(config.num_queues, 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MqConfig {
    /// Live-entry capacity. Overflow spills into the history buffer.
    pub size: usize,
    /// History (ghost) buffer capacity.
    pub buffer_size: usize,
    /// Expiry interval: accesses (access-based) or seconds (wall-clock).
    pub expire_time: u64,
    /// Number of queues; at least 2.
    pub num_queues: usize,
    /// Maps an entry's frequency to its queue level; must be monotone
    /// non-decreasing. The result is clamped to `num_queues - 1`.
    pub queue_func: fn(u64) -> usize,
    /// `true`: time advances one tick per access. `false`: wall-clock
    /// seconds.
    pub access_based: bool,
}

impl MqConfig {
    /// Creates a configuration with the defaults of the paper's setup:
    /// 8 queues, `⌊log₂ freq⌋` promotion, access-based time.
    pub fn new(size: usize, buffer_size: usize, expire_time: u64) -> Self {
        Self {
            size,
            buffer_size,
            expire_time,
            num_queues: 8,
            queue_func: log2_queue,
            access_based: true,
        }
    }

    /// Sets the number of queues.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::MqConfig;
    ///
    /// let config = MqConfig::new(16, 8, 50).num_queues(4);
    /// assert_eq!(config.num_queues, 4);
    /// ```
    pub fn num_queues(mut self, num_queues: usize) -> Self {
        self.num_queues = num_queues;
        self
    }

    /// Sets the promotion function.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::MqConfig;
    ///
    /// let config = MqConfig::new(16, 8, 50).queue_func(|freq| (freq / 2) as usize);
    /// assert_eq!((config.queue_func)(6), 3);
    /// ```
    pub fn queue_func(mut self, queue_func: fn(u64) -> usize) -> Self {
        self.queue_func = queue_func;
        self
    }

    /// Selects access-based or wall-clock time.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::MqConfig;
    ///
    /// let config = MqConfig::new(16, 8, 50).access_based(false);
    /// assert!(!config.access_based);
    /// ```
    pub fn access_based(mut self, access_based: bool) -> Self {
        self.access_based = access_based;
        self
    }
}

#[derive(Debug)]
struct MqEntry<K, V> {
    key: K,
    value: V,
    freq: u64,
    deadline: u64,
    queue: usize,
    node: Option<SlotId>,
}

/// Multi-queue cache engine.
///
/// # Example
///
/// ```
/// use memokit::policy::mq::{MqCache, MqConfig};
/// use memokit::traits::CacheEngine;
///
/// let mut cache = MqCache::new(MqConfig::new(4, 4, 100).num_queues(4)).unwrap();
/// cache.put(1, "a");
/// assert_eq!(cache.queue_of(&1), Some(0)); // frequency 1 → Q0
///
/// cache.get(&1);
/// assert_eq!(cache.queue_of(&1), Some(1)); // frequency 2 → Q1
/// ```
#[derive(Debug)]
pub struct MqCache<K, V> {
    index: FxHashMap<K, SlotId>,
    entries: SlotArena<MqEntry<K, V>>,
    queues: Vec<IntrusiveList<SlotId>>,
    history: GhostList<K, u64>,
    clock: TickClock,
    size: usize,
    buffer_size: usize,
    expire_time: u64,
    queue_func: fn(u64) -> usize,
    hits: u64,
    misses: u64,
}

impl<K, V> MqCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MQ cache from `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `size`, `buffer_size` or `expire_time` is zero,
    /// or `num_queues < 2`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    ///
    /// let cache = MqCache::<u32, u32>::new(MqConfig::new(64, 32, 100));
    /// assert!(cache.is_ok());
    ///
    /// let bad = MqCache::<u32, u32>::new(MqConfig::new(64, 32, 100).num_queues(1));
    /// assert!(bad.is_err());
    /// ```
    pub fn new(config: MqConfig) -> Result<Self, ConfigError> {
        if config.size == 0 {
            return Err(ConfigError::new("size must be > 0"));
        }
        if config.buffer_size == 0 {
            return Err(ConfigError::new("buffer_size must be > 0"));
        }
        if config.expire_time == 0 {
            return Err(ConfigError::new("expire_time must be > 0"));
        }
        if config.num_queues < 2 {
            return Err(ConfigError::new("num_queues must be >= 2"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(config.size, Default::default()),
            entries: SlotArena::with_capacity(config.size),
            queues: (0..config.num_queues).map(|_| IntrusiveList::new()).collect(),
            history: GhostList::new(config.buffer_size),
            clock: TickClock::new(config.access_based),
            size: config.size,
            buffer_size: config.buffer_size,
            expire_time: config.expire_time,
            queue_func: config.queue_func,
            hits: 0,
            misses: 0,
        })
    }

    /// Reports the queue level currently holding `key`, if live.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MqCache::new(MqConfig::new(4, 4, 1_000)).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.queue_of(&1), Some(0)); // frequency 1 → Q0
    /// assert_eq!(cache.queue_of(&9), None);
    /// ```
    pub fn queue_of(&self, key: &K) -> Option<usize> {
        let &eid = self.index.get(key)?;
        self.entries.get(eid).map(|entry| entry.queue)
    }

    /// Returns the access frequency of a live key.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MqCache::new(MqConfig::new(4, 4, 1_000)).unwrap();
    /// cache.put(1, "a");
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.frequency(&1), Some(2));
    /// assert_eq!(cache.frequency(&9), None);
    /// ```
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let &eid = self.index.get(key)?;
        self.entries.get(eid).map(|entry| entry.freq)
    }

    /// Returns `true` if `key` sits in the history buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MqCache::new(MqConfig::new(1, 4, 1_000)).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b"); // 1 evicted into history
    ///
    /// assert!(cache.history_contains(&1));
    /// assert!(!cache.history_contains(&2));
    /// ```
    pub fn history_contains(&self, key: &K) -> bool {
        self.history.contains(key)
    }

    /// Number of keys in the history buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MqCache::new(MqConfig::new(1, 4, 1_000)).unwrap();
    /// cache.put(1, "a");
    /// assert_eq!(cache.history_len(), 0);
    ///
    /// cache.put(2, "b"); // 1 evicted into history
    /// assert_eq!(cache.history_len(), 1);
    /// ```
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn queue_for(&self, freq: u64) -> usize {
        (self.queue_func)(freq).min(self.queues.len() - 1)
    }

    /// Demotes expired entries, inspecting only queue ends top-down.
    fn age(&mut self, now: u64) {
        for level in (1..self.queues.len()).rev() {
            loop {
                let eid = match self.queues[level].back() {
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

                self.queues[level].pop_back();
                let node = self.queues[level - 1].push_front(eid);
                if let Some(entry) = self.entries.get_mut(eid) {
                    entry.queue = level - 1;
                    entry.node = Some(node);
                    entry.deadline = now + self.expire_time;
                }
            }
        }
    }

    /// Places an entry at the newest end of `level`, updating its links.
    fn enqueue(&mut self, eid: SlotId, level: usize, now: u64) {
        let node = self.queues[level].push_front(eid);
        if let Some(entry) = self.entries.get_mut(eid) {
            entry.queue = level;
            entry.node = Some(node);
            entry.deadline = now + self.expire_time;
        }
    }

    /// Unlinks an entry from its current queue.
    fn unlink(&mut self, eid: SlotId) {
        let (level, node) = match self.entries.get(eid) {
            Some(entry) => (entry.queue, entry.node),
            None => return,
        };
        if let Some(node) = node {
            self.queues[level].remove(node);
        }
    }

    /// Evicts the oldest entry of the lowest non-empty queue into history.
    fn evict_one(&mut self) {
        for level in 0..self.queues.len() {
            let eid = match self.queues[level].pop_back() {
                Some(eid) => eid,
                None => continue,
            };
            if let Some(entry) = self.entries.remove(eid) {
                self.index.remove(&entry.key);
                // Value dropped; the key survives with its frequency
                self.history.record(entry.key, entry.freq);
            }
            return;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let queued: usize = self.queues.iter().map(|queue| queue.len()).sum();
        assert_eq!(queued, self.index.len());
        assert_eq!(self.entries.len(), self.index.len());
        assert!(self.index.len() <= self.size);
        assert!(self.history.len() <= self.buffer_size);
        self.history.debug_validate_invariants();
    }
}

impl<K, V> CacheEngine<K, V> for MqCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Looks up a key: ticks the clock, ages queue heads, then bumps the
    /// entry's frequency and re-queues it. History keys miss.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MqCache::new(MqConfig::new(4, 4, 1_000)).unwrap();
    /// cache.put(1, "a");
    ///
    /// assert_eq!(cache.get(&1), Some(&"a"));
    /// assert_eq!(cache.queue_of(&1), Some(1)); // frequency 2 → Q1
    /// assert_eq!(cache.get(&9), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.advance();
        self.age(now);

        let eid = match self.index.get(key) {
            Some(&eid) => eid,
            None => {
                // History keys are ghosts: no value to return
                self.misses += 1;
                return None;
            }
        };
        self.hits += 1;

        let (freq, current) = match self.entries.get(eid) {
            Some(entry) => (entry.freq + 1, entry.queue),
            None => return None,
        };
        // Hits never demote, whatever the promotion function says
        let target = self.queue_for(freq).max(current);

        self.unlink(eid);
        if let Some(entry) = self.entries.get_mut(eid) {
            entry.freq = freq;
        }
        self.enqueue(eid, target, now);

        self.entries.get(eid).map(|entry| &entry.value)
    }

    /// Inserts a key. History keys resume their frequency climb; overflow
    /// evicts the oldest entry of the lowest non-empty queue into history.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::mq::{MqCache, MqConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = MqCache::new(MqConfig::new(2, 4, 1_000)).unwrap();
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// cache.put(3, "c"); // evicts 1, the coldest entry
    ///
    /// assert_eq!(cache.len(), 2);
    /// assert!(cache.history_contains(&1));
    /// ```
    fn put(&mut self, key: K, value: V) {
        let now = self.clock.advance();
        self.age(now);

        // Replace = remove then insert fresh
        if let Some(eid) = self.index.remove(&key) {
            self.unlink(eid);
            self.entries.remove(eid);
        }

        // A history key resumes one past its recorded frequency
        let freq = match self.history.take(&key) {
            Some(previous) => previous + 1,
            None => 1,
        };

        if self.index.len() >= self.size {
            self.evict_one();
        }

        let eid = self.entries.insert(MqEntry {
            key: key.clone(),
            value,
            freq,
            deadline: 0,
            queue: 0,
            node: None,
        });
        let level = self.queue_for(freq);
        self.enqueue(eid, level, now);
        self.index.insert(key, eid);
    }

    fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        for queue in &mut self.queues {
            queue.clear();
        }
        self.history.clear();
        self.clock.reset();
        self.hits = 0;
        self.misses = 0;
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> Capacity {
        Capacity::Bounded(self.size + self.buffer_size)
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

    fn small(size: usize) -> MqCache<u32, u32> {
        // Long expiry so aging stays out of the way unless a test wants it
        MqCache::new(MqConfig::new(size, 4, 1_000).num_queues(4)).unwrap()
    }

    #[test]
    fn config_validation() {
        assert!(MqCache::<u32, u32>::new(MqConfig::new(0, 4, 10)).is_err());
        assert!(MqCache::<u32, u32>::new(MqConfig::new(4, 0, 10)).is_err());
        assert!(MqCache::<u32, u32>::new(MqConfig::new(4, 4, 0)).is_err());
        assert!(MqCache::<u32, u32>::new(MqConfig::new(4, 4, 10).num_queues(1)).is_err());
        assert!(MqCache::<u32, u32>::new(MqConfig::new(4, 4, 10).num_queues(2)).is_ok());
    }

    #[test]
    fn log2_queue_levels() {
        assert_eq!(log2_queue(1), 0);
        assert_eq!(log2_queue(2), 1);
        assert_eq!(log2_queue(3), 1);
        assert_eq!(log2_queue(4), 2);
        assert_eq!(log2_queue(15), 3);
        assert_eq!(log2_queue(16), 4);
    }

    #[test]
    fn new_keys_enter_coldest_queue() {
        let mut cache = small(4);
        cache.put(1, 10);
        assert_eq!(cache.queue_of(&1), Some(0));
        assert_eq!(cache.frequency(&1), Some(1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn hits_climb_queues_with_frequency() {
        let mut cache = small(4);
        cache.put(1, 10);
        cache.get(&1); // freq 2 → Q1
        assert_eq!(cache.queue_of(&1), Some(1));
        cache.get(&1); // freq 3 → Q1
        assert_eq!(cache.queue_of(&1), Some(1));
        cache.get(&1); // freq 4 → Q2
        assert_eq!(cache.queue_of(&1), Some(2));
        assert_eq!(cache.frequency(&1), Some(4));
    }

    #[test]
    fn queue_level_is_clamped() {
        let mut cache: MqCache<u32, u32> =
            MqCache::new(MqConfig::new(4, 4, 1_000).num_queues(2)).unwrap();
        cache.put(1, 10);
        for _ in 0..40 {
            cache.get(&1);
        }
        assert_eq!(cache.queue_of(&1), Some(1)); // num_queues - 1
    }

    #[test]
    fn eviction_takes_lowest_queue_and_records_history() {
        let mut cache = small(2);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.get(&2); // 2 → Q1; 1 stays the Q0 victim
        cache.put(3, 30);

        assert_eq!(cache.queue_of(&1), None);
        assert!(cache.history_contains(&1));
        assert_eq!(cache.len(), 2);
        cache.debug_validate_invariants();
    }

    #[test]
    fn history_get_is_a_miss() {
        let mut cache = small(1);
        cache.put(1, 10);
        cache.put(2, 20); // 1 → history

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.misses(), 1);
        assert!(cache.history_contains(&1));
    }

    #[test]
    fn history_put_resumes_frequency() {
        let mut cache = small(1);
        cache.put(1, 10);
        cache.get(&1);
        cache.get(&1); // freq 3
        cache.put(2, 20); // 1 → history with freq 3

        cache.put(1, 11); // resumes at freq 4 → Q2
        assert_eq!(cache.frequency(&1), Some(4));
        assert_eq!(cache.queue_of(&1), Some(2));
        assert!(!cache.history_contains(&1));
    }

    #[test]
    fn history_overflow_drops_oldest() {
        let mut cache: MqCache<u32, u32> =
            MqCache::new(MqConfig::new(1, 2, 1_000).num_queues(2)).unwrap();
        cache.put(1, 10);
        cache.put(2, 20); // history: [1]
        cache.put(3, 30); // history: [1, 2]
        cache.put(4, 40); // history: [2, 3], 1 dropped

        assert!(!cache.history_contains(&1));
        assert!(cache.history_contains(&2));
        assert!(cache.history_contains(&3));
        assert_eq!(cache.history_len(), 2);
    }

    #[test]
    fn idle_entries_age_down_queue_by_queue() {
        let mut cache: MqCache<u32, u32> =
            MqCache::new(MqConfig::new(4, 4, 3).num_queues(4)).unwrap();
        cache.put(1, 10);
        cache.get(&1); // tick 2: freq 2 → Q1, deadline 5
        cache.put(2, 20); // tick 3
        cache.get(&2); // tick 4
        cache.get(&2); // tick 5
        assert_eq!(cache.queue_of(&1), Some(1));
        cache.get(&2); // tick 6: 1's deadline (5) has passed → demoted to Q0

        assert_eq!(cache.queue_of(&1), Some(0));
        cache.debug_validate_invariants();
    }

    #[test]
    fn hits_never_demote() {
        // A promotion function that would send everything to Q0
        let mut cache: MqCache<u32, u32> =
            MqCache::new(MqConfig::new(4, 4, 1_000).num_queues(4).queue_func(|_| 0)).unwrap();
        cache.put(1, 10);
        cache.get(&1);
        assert_eq!(cache.queue_of(&1), Some(0));

        // Manually promoted entries stay put under a flat function
        let mut climb: MqCache<u32, u32> =
            MqCache::new(MqConfig::new(4, 4, 1_000).num_queues(4)).unwrap();
        climb.put(1, 10);
        climb.get(&1);
        climb.get(&1);
        climb.get(&1); // Q2
        assert_eq!(climb.queue_of(&1), Some(2));
    }

    #[test]
    fn replace_resets_metadata() {
        let mut cache = small(4);
        cache.put(1, 10);
        cache.get(&1);
        cache.get(&1);
        assert_eq!(cache.frequency(&1), Some(3));

        cache.put(1, 11);
        assert_eq!(cache.frequency(&1), Some(1));
        assert_eq!(cache.queue_of(&1), Some(0));
        assert_eq!(cache.get(&1), Some(&11));
    }

    #[test]
    fn max_size_is_composite() {
        let cache = small(2);
        assert_eq!(cache.capacity(), Capacity::Bounded(6)); // 2 + buffer 4
    }

    #[test]
    fn counters_and_clear() {
        let mut cache = small(2);
        cache.put(1, 10);
        cache.get(&1);
        cache.get(&9);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));

        cache.clear();
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
        assert!(cache.is_empty());
        assert_eq!(cache.history_len(), 0);
        cache.debug_validate_invariants();

        // Clock restarted: fresh entries behave like a new cache
        cache.put(1, 10);
        assert_eq!(cache.queue_of(&1), Some(0));
    }
}
