//! Frequency-node chain for the LFU/MFU engines.
//!
//! Entries are grouped by access count into **frequency buckets** kept in a
//! doubly linked chain in ascending frequency order. Each bucket owns a
//! doubly linked list of the entries currently at that frequency, newest at
//! the head. Each entry carries a back-reference to its bucket.
//!
//! Frequencies only ever step by +1 at access time, so chain adjacency is
//! enough to find the destination bucket in O(1); no map from frequency to
//! bucket is needed.
//!
//! ## Architecture
//!
//! ```text
//!   lowest ─► ┌─────────┐ ◄──► ┌─────────┐ ◄──► ┌─────────┐ ◄─ highest
//!             │ freq: 1 │      │ freq: 2 │      │ freq: 5 │
//!             └────┬────┘      └────┬────┘      └────┬────┘
//!                  │                │                │
//!              [C]─[B]─[A]        [D]              [E]─[F]
//!             head    tail
//!            (newest)(oldest: tie-break victim)
//!
//!   touch(D): detach D from freq-2; freq-3 absent and D was alone,
//!             so the emptied bucket is re-labelled 3 in place.
//!   touch(B): detach B from freq-1; freq-2 adjacent → splice B in there.
//! ```
//!
//! Eviction takes a bucket tail: the oldest arrival at that frequency, at
//! either chain end (`pop_lowest` for LFU, `pop_highest` for MFU).
//!
//! ## Operations
//!
//! | Operation     | Description                               | Complexity |
//! |---------------|-------------------------------------------|------------|
//! | `insert`      | new entry at frequency 1                  | O(1)       |
//! | `touch`       | promote one bucket, splice by adjacency   | O(1)       |
//! | `remove`      | detach entry, drop its bucket if emptied  | O(1)       |
//! | `pop_lowest`  | LFU victim: lowest bucket's oldest entry  | O(1)       |
//! | `pop_highest` | MFU victim: highest bucket's oldest entry | O(1)       |
//! | `frequency`   | read an entry's current count             | O(1)       |
//!
//! ## Use Cases
//!
//! - **LFU**: evict from the low end, promote on every hit
//! - **MFU**: evict from the high end, same promotion path
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct EntryNode<K> {
    key: K,
    bucket: SlotId,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug)]
struct BucketNode {
    freq: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

/// Ascending chain of frequency buckets with arrival-ordered entry lists.
#[derive(Debug)]
pub struct FreqChain<K> {
    entries: SlotArena<EntryNode<K>>,
    buckets: SlotArena<BucketNode>,
    lowest: Option<SlotId>,
    highest: Option<SlotId>,
}

impl<K> FreqChain<K> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            buckets: SlotArena::new(),
            lowest: None,
            highest: None,
        }
    }

    /// Returns the number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a key at frequency 1 and returns its handle.
    pub fn insert(&mut self, key: K) -> SlotId {
        let bucket = match self.lowest {
            Some(bid) if self.bucket_freq(bid) == Some(1) => bid,
            next => self.insert_bucket(1, None, next),
        };
        let id = self.entries.insert(EntryNode {
            key,
            bucket,
            prev: None,
            next: None,
        });
        self.attach_entry(bucket, id);
        id
    }

    /// Promotes an entry to frequency + 1, returning the new frequency.
    ///
    /// At `u64::MAX` the frequency saturates and only the entry's arrival
    /// position refreshes.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let bid = self.entries.get(id)?.bucket;
        let freq = self.bucket_freq(bid)?;
        if freq == u64::MAX {
            self.detach_entry(id);
            self.attach_entry(bid, id);
            return Some(freq);
        }

        let next_bid = self.buckets.get(bid).and_then(|b| b.next);
        let next_freq = next_bid.and_then(|n| self.bucket_freq(n));

        self.detach_entry(id);
        let emptied = self.bucket_is_empty(bid);

        let target = match next_bid {
            Some(n) if next_freq == Some(freq + 1) => {
                if emptied {
                    self.remove_bucket(bid);
                }
                n
            }
            _ => {
                if emptied {
                    // Re-label the emptied bucket in place; ascending order
                    // is preserved because the successor is > freq + 1.
                    if let Some(b) = self.buckets.get_mut(bid) {
                        b.freq = freq + 1;
                    }
                    bid
                } else {
                    self.insert_bucket(freq + 1, Some(bid), next_bid)
                }
            }
        };
        self.attach_entry(target, id);
        Some(freq + 1)
    }

    /// Removes an entry, returning its key and final frequency.
    pub fn remove(&mut self, id: SlotId) -> Option<(K, u64)> {
        let bid = self.entries.get(id)?.bucket;
        let freq = self.bucket_freq(bid)?;
        self.detach_entry(id);
        if self.bucket_is_empty(bid) {
            self.remove_bucket(bid);
        }
        self.entries.remove(id).map(|e| (e.key, freq))
    }

    /// Evicts the oldest arrival at the lowest frequency (LFU victim).
    pub fn pop_lowest(&mut self) -> Option<(K, u64)> {
        let bid = self.lowest?;
        let eid = self.buckets.get(bid)?.tail?;
        self.remove(eid)
    }

    /// Evicts the oldest arrival at the highest frequency (MFU victim).
    pub fn pop_highest(&mut self) -> Option<(K, u64)> {
        let bid = self.highest?;
        let eid = self.buckets.get(bid)?.tail?;
        self.remove(eid)
    }

    /// Returns the LFU victim candidate without removing it.
    pub fn peek_lowest(&self) -> Option<(&K, u64)> {
        let bucket = self.buckets.get(self.lowest?)?;
        let entry = self.entries.get(bucket.tail?)?;
        Some((&entry.key, bucket.freq))
    }

    /// Returns the MFU victim candidate without removing it.
    pub fn peek_highest(&self) -> Option<(&K, u64)> {
        let bucket = self.buckets.get(self.highest?)?;
        let entry = self.entries.get(bucket.tail?)?;
        Some((&entry.key, bucket.freq))
    }

    /// Returns an entry's current frequency.
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        let bid = self.entries.get(id)?.bucket;
        self.bucket_freq(bid)
    }

    /// Drops every entry and bucket.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
        self.lowest = None;
        self.highest = None;
    }

    fn bucket_freq(&self, bid: SlotId) -> Option<u64> {
        self.buckets.get(bid).map(|b| b.freq)
    }

    fn bucket_is_empty(&self, bid: SlotId) -> bool {
        self.buckets
            .get(bid)
            .map(|b| b.head.is_none())
            .unwrap_or(false)
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<SlotId>, next: Option<SlotId>) -> SlotId {
        let bid = self.buckets.insert(BucketNode {
            freq,
            prev,
            next,
            head: None,
            tail: None,
        });
        match prev {
            Some(p) => {
                if let Some(pb) = self.buckets.get_mut(p) {
                    pb.next = Some(bid);
                }
            }
            None => self.lowest = Some(bid),
        }
        match next {
            Some(n) => {
                if let Some(nb) = self.buckets.get_mut(n) {
                    nb.prev = Some(bid);
                }
            }
            None => self.highest = Some(bid),
        }
        bid
    }

    fn remove_bucket(&mut self, bid: SlotId) {
        if let Some(bucket) = self.buckets.remove(bid) {
            match bucket.prev {
                Some(p) => {
                    if let Some(pb) = self.buckets.get_mut(p) {
                        pb.next = bucket.next;
                    }
                }
                None => self.lowest = bucket.next,
            }
            match bucket.next {
                Some(n) => {
                    if let Some(nb) = self.buckets.get_mut(n) {
                        nb.prev = bucket.prev;
                    }
                }
                None => self.highest = bucket.prev,
            }
        }
    }

    fn attach_entry(&mut self, bid: SlotId, eid: SlotId) {
        let old_head = self.buckets.get(bid).and_then(|b| b.head);
        if let Some(entry) = self.entries.get_mut(eid) {
            entry.bucket = bid;
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(h) = old_head {
            if let Some(head_entry) = self.entries.get_mut(h) {
                head_entry.prev = Some(eid);
            }
        }
        if let Some(bucket) = self.buckets.get_mut(bid) {
            bucket.head = Some(eid);
            if bucket.tail.is_none() {
                bucket.tail = Some(eid);
            }
        }
    }

    fn detach_entry(&mut self, eid: SlotId) {
        let (bid, prev, next) = match self.entries.get(eid) {
            Some(e) => (e.bucket, e.prev, e.next),
            None => return,
        };
        match prev {
            Some(p) => {
                if let Some(prev_entry) = self.entries.get_mut(p) {
                    prev_entry.next = next;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(bid) {
                    bucket.head = next;
                }
            }
        }
        match next {
            Some(n) => {
                if let Some(next_entry) = self.entries.get_mut(n) {
                    next_entry.prev = prev;
                }
            }
            None => {
                if let Some(bucket) = self.buckets.get_mut(bid) {
                    bucket.tail = prev;
                }
            }
        }
        if let Some(entry) = self.entries.get_mut(eid) {
            entry.prev = None;
            entry.next = None;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut total = 0usize;
        let mut last_freq: Option<u64> = None;
        let mut current = self.lowest;
        let mut prev_bucket = None;

        while let Some(bid) = current {
            let bucket = self.buckets.get(bid).expect("bucket missing");
            assert_eq!(bucket.prev, prev_bucket);
            if let Some(last) = last_freq {
                assert!(bucket.freq > last, "bucket frequencies must ascend");
            }
            assert!(bucket.head.is_some(), "empty bucket left in chain");

            let mut eid = bucket.head;
            let mut prev_entry = None;
            while let Some(id) = eid {
                let entry = self.entries.get(id).expect("entry missing");
                assert_eq!(entry.bucket, bid);
                assert_eq!(entry.prev, prev_entry);
                if entry.next.is_none() {
                    assert_eq!(bucket.tail, Some(id));
                }
                prev_entry = Some(id);
                eid = entry.next;
                total += 1;
                assert!(total <= self.entries.len());
            }

            last_freq = Some(bucket.freq);
            prev_bucket = Some(bid);
            if bucket.next.is_none() {
                assert_eq!(self.highest, Some(bid));
            }
            current = bucket.next;
        }

        assert_eq!(total, self.entries.len());
        if self.lowest.is_none() {
            assert!(self.highest.is_none());
            assert!(self.entries.is_empty());
        }
    }
}

impl<K> Default for FreqChain<K> {
    fn default() -> Self {
        Self::new()
    }
}
