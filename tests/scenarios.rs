// ==============================================
// END-TO-END POLICY SCENARIOS (integration)
// ==============================================
//
// Literal operation sequences with fully pinned-down outcomes, one block per
// policy family. These exercise the engines exactly the way a memoization
// facade would: get, miss, compute, put.

use memokit::policy::fifo::FifoCache;
use memokit::policy::lfu::LfuCache;
use memokit::policy::lru::LruCache;
use memokit::policy::mq::{MqCache, MqConfig};
use memokit::policy::slru::{Segment, SlruCache};
use memokit::policy::tlru::{TlruCache, TlruConfig};
use memokit::policy::two_q_full::{TwoQFullCache, Zone};
use memokit::traits::CacheEngine;

#[test]
fn lru_spares_the_re_accessed_key() {
    let mut cache = LruCache::new(3).unwrap();
    cache.put('a', 1);
    cache.put('b', 2);
    cache.put('c', 3);
    assert_eq!(cache.get(&'a'), Some(&1));
    cache.put('d', 4);

    // b was least recently used at the moment d arrived
    assert!(cache.peek(&'a').is_some());
    assert!(cache.peek(&'b').is_none());
    assert!(cache.peek(&'c').is_some());
    assert!(cache.peek(&'d').is_some());
    assert_eq!(cache.len(), 3);
}

#[test]
fn fifo_ignores_hits_when_choosing_victims() {
    let mut cache = FifoCache::new(2).unwrap();
    cache.put('x', 10);
    cache.put('y', 20);
    assert_eq!(cache.get(&'x'), Some(&10));
    cache.put('z', 30);

    assert_eq!(cache.get(&'x'), None);
    assert_eq!(cache.get(&'y'), Some(&20));
    assert_eq!(cache.get(&'z'), Some(&30));
}

#[test]
fn lfu_evicts_the_lowest_frequency_key() {
    let mut cache = LfuCache::new(2).unwrap();
    cache.put('a', 1);
    cache.put('b', 2);
    cache.get(&'a');
    cache.get(&'a');
    cache.get(&'b');
    // a: freq 3, b: freq 2
    cache.put('c', 3);

    assert_eq!(cache.frequency(&'b'), None);
    assert!(cache.frequency(&'a').is_some());
    assert_eq!(cache.frequency(&'c'), Some(1));
}

#[test]
fn slru_promotes_hits_and_washes_out_probationary() {
    let mut cache = SlruCache::new(2, 2).unwrap();
    cache.put('a', 0);
    cache.put('b', 0);
    cache.put('c', 0);
    cache.put('d', 0);
    cache.get(&'a');
    cache.get(&'b');
    cache.put('e', 0);

    // a and b earned protection; c was the probationary oldest when e arrived
    assert_eq!(cache.segment_of(&'a'), Some(Segment::Protected));
    assert_eq!(cache.segment_of(&'b'), Some(Segment::Protected));
    assert_eq!(cache.segment_of(&'c'), None);
    assert_eq!(cache.segment_of(&'d'), Some(Segment::Probationary));
    assert_eq!(cache.segment_of(&'e'), Some(Segment::Probationary));
}

#[test]
fn two_q_full_ghost_round_trip() {
    let mut cache = TwoQFullCache::new(2, 2, 2).unwrap();
    cache.put('a', 1);
    cache.put('b', 2);
    cache.put('c', 3);
    cache.put('d', 4);

    // The two oldest arrivals were transferred to the ghost out-queue
    assert_eq!(cache.zone_of(&'c'), Some(Zone::SecondaryIn));
    assert_eq!(cache.zone_of(&'d'), Some(Zone::SecondaryIn));
    assert!(cache.ghost_contains(&'a'));
    assert!(cache.ghost_contains(&'b'));

    // A ghost key is a miss at the caller boundary...
    assert_eq!(cache.get(&'a'), None);
    assert_eq!(cache.misses(), 1);

    // ...but the recompute-and-put that follows lands in primary
    cache.put('a', 1);
    assert_eq!(cache.zone_of(&'a'), Some(Zone::Primary));
    assert!(!cache.ghost_contains(&'a'));
    assert!(cache.ghost_contains(&'b'));
}

#[test]
fn tlru_expires_mid_access_without_reset() {
    let config = TlruConfig::new(3, 2).access_based(true).reset_on_access(false);
    let mut cache = TlruCache::new(config).unwrap();

    cache.put('a', 1); // tick 1, deadline 3
    cache.put('b', 2); // tick 2, deadline 4
    assert_eq!(cache.get(&'a'), Some(&1)); // tick 3: not yet expired

    // Tick 4: a's deadline has passed; the sweep claims it before the
    // lookup resolves, so this get misses
    assert_eq!(cache.get(&'a'), None);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn tlru_expires_after_interval_of_neglect() {
    // Property: with access-based time and expire_time = E, a key untouched
    // for E accesses is evicted on the next access.
    let config = TlruConfig::new(8, 4).access_based(true).reset_on_access(true);
    let mut cache = TlruCache::new(config).unwrap();

    cache.put('k', 0); // deadline = now + 4
    for _ in 0..4 {
        cache.get(&'z'); // four accesses not touching k
    }
    assert_eq!(cache.get(&'k'), None); // fifth access: k is gone
}

#[test]
fn mq_promotes_into_the_queue_named_by_the_function() {
    let config = MqConfig::new(8, 4, 1_000).num_queues(4);
    let mut cache = MqCache::new(config).unwrap();
    cache.put('k', 0); // freq 1 → Q0

    cache.get(&'k'); // freq 2 → ⌊log₂ 2⌋ = 1
    assert_eq!(cache.queue_of(&'k'), Some(1));
    cache.get(&'k'); // freq 3 → still 1
    cache.get(&'k'); // freq 4 → 2
    assert_eq!(cache.queue_of(&'k'), Some(2));
    assert_eq!(cache.frequency(&'k'), Some(4));
}

#[test]
fn mq_eviction_spills_into_history_and_back() {
    let config = MqConfig::new(2, 4, 1_000).num_queues(4);
    let mut cache = MqCache::new(config).unwrap();
    cache.put('a', 1);
    cache.get(&'a'); // a → Q1
    cache.put('b', 2);
    cache.put('c', 3); // b is the lowest-queue oldest → history

    assert_eq!(cache.queue_of(&'b'), None);
    assert!(cache.history_contains(&'b'));

    // get on a history key is a miss; put resumes the frequency climb
    assert_eq!(cache.get(&'b'), None);
    cache.put('b', 2);
    assert_eq!(cache.frequency(&'b'), Some(2));
    assert_eq!(cache.queue_of(&'b'), Some(1));
    assert!(!cache.history_contains(&'b'));
}

#[test]
fn hit_and_miss_counters_add_up_to_get_calls() {
    let mut cache = LruCache::new(2).unwrap();
    cache.put(1, 'a');
    let mut gets = 0u64;
    for i in 0..10 {
        cache.get(&(i % 3));
        gets += 1;
    }
    assert_eq!(cache.hits() + cache.misses(), gets);
}
