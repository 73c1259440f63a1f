//! Bounded FIFO buffer of ghost entries.
//!
//! A ghost entry is a key retained after eviction, without its value, so a
//! later access can be recognized and influence placement. The 2Q-full
//! secondary-out queue stores bare keys; the MQ history buffer stores each
//! key's last-known frequency as metadata.
//!
//! Insertion order is preserved; when the buffer is full, recording a new
//! key drops the oldest. Lookup and removal are O(1) through a side index.
//!
//! ## Operations
//!
//! | Operation  | Description                             | Complexity |
//! |------------|-----------------------------------------|------------|
//! | `record`   | add key + metadata, drop oldest if full | O(1) avg   |
//! | `take`     | remove key, return its metadata         | O(1) avg   |
//! | `contains` | check if a key is tracked               | O(1) avg   |
//! | `oldest`   | peek the next key to fall off           | O(1)       |
//!
//! ## Use Cases
//!
//! - **2Q-full secondary-out**: bare keys (`M = ()`) whose reappearance
//!   qualifies them for the primary queue
//! - **MQ history**: keys with their last-known frequency, so a re-put
//!   resumes the frequency climb instead of starting cold
//!
//! ## Example Usage
//!
//! ```
//! use memokit::ds::GhostList;
//!
//! let mut history: GhostList<&str, u64> = GhostList::new(2);
//! history.record("a", 3);
//! history.record("b", 1);
//! history.record("c", 9); // capacity 2: "a" falls off
//!
//! assert!(!history.contains(&"a"));
//! assert_eq!(history.take(&"b"), Some(1));
//! assert!(history.contains(&"c"));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
struct Ghost<K, M> {
    key: K,
    meta: M,
}

/// Bounded FIFO list of keys (no values) with per-key metadata.
#[derive(Debug)]
pub struct GhostList<K, M = ()> {
    list: IntrusiveList<Ghost<K, M>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K, M> GhostList<K, M>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ghost list holding at most `capacity` keys.
    ///
    /// A capacity of 0 creates a no-op list that ignores all records.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    /// Records a key, dropping and returning the oldest ghost on overflow.
    ///
    /// Re-recording a present key only replaces its metadata; its position
    /// is unchanged.
    pub fn record(&mut self, key: K, meta: M) -> Option<(K, M)> {
        if self.capacity == 0 {
            return None;
        }
        if let Some(&id) = self.index.get(&key) {
            if let Some(ghost) = self.list.get_mut(id) {
                ghost.meta = meta;
            }
            return None;
        }

        let dropped = if self.list.len() >= self.capacity {
            self.pop_oldest()
        } else {
            None
        };

        let id = self.list.push_front(Ghost {
            key: key.clone(),
            meta,
        });
        self.index.insert(key, id);
        dropped
    }

    /// Removes a key and returns its metadata, if tracked.
    pub fn take(&mut self, key: &K) -> Option<M> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|ghost| ghost.meta)
    }

    /// Returns `true` if the key is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the oldest tracked key, if any.
    pub fn oldest(&self) -> Option<&K> {
        self.list.back().map(|ghost| &ghost.key)
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the configured maximum number of ghosts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every ghost.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    fn pop_oldest(&mut self) -> Option<(K, M)> {
        let ghost = self.list.pop_back()?;
        self.index.remove(&ghost.key);
        Some((ghost.key, ghost.meta))
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for (key, &id) in &self.index {
            let ghost = self.list.get(id).expect("ghost missing from list");
            assert!(&ghost.key == key);
        }
    }
}
