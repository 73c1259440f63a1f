// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Universal behavior every engine must exhibit, checked over randomized
// operation sequences. Policy-specific outcomes live in scenarios.rs; here
// only the shared contract is asserted:
//
//   - current_size never exceeds max_size (bounded engines)
//   - hits + misses equals the number of get calls since clear
//   - a put immediately followed by a get of the same key returns the value
//     just stored (no engine loses its own newest insertion)
//   - clear restores the constructed state

use memokit::builder::{Engine, PolicyConfig};
use memokit::policy::mq::MqConfig;
use memokit::policy::tlru::TlruConfig;
use memokit::traits::{CacheEngine, Capacity};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Get(u8),
    Put(u8, u16),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0u8..24).prop_map(Op::Get),
        8 => ((0u8..24), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        1 => Just(Op::Clear),
    ]
}

// Expiry intervals are generous so time-based eviction does not interfere
// with the put-then-get assertion; TLRU expiry behavior has its own tests.
fn configs() -> Vec<PolicyConfig> {
    vec![
        PolicyConfig::Fifo { size: 6 },
        PolicyConfig::Lifo { size: 6 },
        PolicyConfig::Lru { size: 6 },
        PolicyConfig::Mru { size: 6 },
        PolicyConfig::Nmru { size: 6 },
        PolicyConfig::Rr { size: 6 },
        PolicyConfig::Static,
        PolicyConfig::Lfu { size: 6 },
        PolicyConfig::Mfu { size: 6 },
        PolicyConfig::Slru {
            protected_size: 3,
            probationary_size: 3,
        },
        PolicyConfig::TwoQ {
            primary_size: 3,
            secondary_size: 3,
        },
        // secondary_in must fit the 3-key working set used below: 2Q-full
        // never promotes on a hit, so a smaller in-queue would ghost live keys
        PolicyConfig::TwoQFull {
            primary_size: 3,
            secondary_in_size: 3,
            secondary_out_size: 4,
        },
        PolicyConfig::Mq(MqConfig::new(6, 4, 1_000_000).num_queues(3)),
        PolicyConfig::Tlru(TlruConfig::new(6, 1_000_000).access_based(true)),
    ]
}

proptest! {
    #[test]
    fn universal_invariants_hold(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        for config in configs() {
            let mut cache: Engine<u8, u16> = Engine::new(config).unwrap();
            let mut gets: u64 = 0;

            for &op in &ops {
                match op {
                    Op::Get(key) => {
                        cache.get(&key);
                        gets += 1;
                    }
                    Op::Put(key, value) => {
                        cache.put(key, value);
                        // The freshly stored value is immediately readable
                        prop_assert_eq!(cache.get(&key), Some(&value), "{:?}", config);
                        gets += 1;
                    }
                    Op::Clear => {
                        cache.clear();
                        prop_assert_eq!(cache.len(), 0);
                        prop_assert_eq!(cache.hits(), 0);
                        prop_assert_eq!(cache.misses(), 0);
                        gets = 0;
                    }
                }

                if let Capacity::Bounded(max) = cache.capacity() {
                    prop_assert!(cache.len() <= max, "{:?} exceeded max_size", config);
                }
                prop_assert_eq!(cache.hits() + cache.misses(), gets, "{:?}", config);
            }
        }
    }

    #[test]
    fn stats_snapshot_matches_accessors(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut cache: Engine<u8, u16> = Engine::new(PolicyConfig::Lru { size: 4 }).unwrap();
        for &op in &ops {
            match op {
                Op::Get(key) => {
                    cache.get(&key);
                }
                Op::Put(key, value) => cache.put(key, value),
                Op::Clear => cache.clear(),
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, cache.hits());
        prop_assert_eq!(stats.misses, cache.misses());
        prop_assert_eq!(stats.current_size, cache.len());
        prop_assert_eq!(stats.max_size, cache.capacity());
    }
}

#[test]
fn small_caches_retain_under_capacity_working_sets() {
    // With capacity strictly greater than the distinct keys used, nothing
    // is ever evicted and every get after the first put hits.
    for config in configs() {
        let mut cache: Engine<u8, u16> = Engine::new(config).unwrap();
        for round in 0..20u16 {
            for key in 0..3u8 {
                cache.put(key, round);
            }
            for key in 0..3u8 {
                assert_eq!(cache.get(&key), Some(&round), "{:?}", config);
            }
        }
    }
}

#[test]
fn clear_is_idempotent_and_preserves_capacity() {
    for config in configs() {
        let mut cache: Engine<u8, u16> = Engine::new(config).unwrap();
        let capacity = cache.capacity();
        cache.put(1, 1);
        cache.clear();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), capacity);
    }
}
