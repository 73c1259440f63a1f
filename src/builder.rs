//! Unified engine construction for all eviction policies.
//!
//! A wrapping facade needs to hold "some cache engine" chosen at runtime
//! from configuration. [`PolicyConfig`] carries the policy-specific
//! parameters and [`Engine`] wraps every concrete engine behind the shared
//! [`CacheEngine`] contract, so the facade deals with exactly one type.
//!
//! Static dispatch remains available by naming a concrete engine type
//! directly; `CacheEngine` is also object-safe for `Box<dyn CacheEngine>`
//! holders.
//!
//! ## Design Rationale
//!
//! An enum rather than `Box<dyn CacheEngine>` as the primary dispatch
//! vehicle:
//!
//! - The set of policies is closed and known to the crate, so a `match` is
//!   exhaustive and the compiler flags a policy added without wiring.
//! - No heap allocation or vtable indirection on the hot path.
//! - Configuration travels as plain data (`PolicyConfig` is `Copy`), so a
//!   facade can store, log or replay the choice that built an engine.
//!
//! ## When to Use
//!
//! Hold an [`Engine`] when the policy is picked at runtime from
//! configuration. Name a concrete engine type when the policy is fixed at
//! compile time or policy-specific introspection (`peek_lru`,
//! `ghost_contains`, ...) is needed, since the enum exposes only the
//! uniform contract.
//!
//! ## Example
//!
//! ```
//! use memokit::builder::{Engine, PolicyConfig};
//! use memokit::traits::CacheEngine;
//!
//! let mut cache: Engine<u64, String> =
//!     Engine::new(PolicyConfig::Lru { size: 100 }).unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lifo::LifoCache;
use crate::policy::lru::LruCache;
use crate::policy::mfu::MfuCache;
use crate::policy::mq::{MqCache, MqConfig};
use crate::policy::mru::MruCache;
use crate::policy::nmru::NmruCache;
use crate::policy::rr::RrCache;
use crate::policy::slru::SlruCache;
use crate::policy::tlru::{TlruCache, TlruConfig};
use crate::policy::two_q::TwoQCache;
use crate::policy::two_q_full::TwoQFullCache;
use crate::policy::unbounded::StaticCache;
use crate::traits::{CacheEngine, Capacity};

/// Policy selection plus the configuration that policy needs.
#[derive(Debug, Clone, Copy)]
pub enum PolicyConfig {
    /// First-in first-out eviction.
    Fifo { size: usize },
    /// Last-in first-out eviction.
    Lifo { size: usize },
    /// Least-recently-used eviction.
    Lru { size: usize },
    /// Most-recently-used eviction.
    Mru { size: usize },
    /// Random eviction sparing the most recent key.
    Nmru { size: usize },
    /// Uniform random eviction.
    Rr { size: usize },
    /// No eviction; unbounded growth.
    Static,
    /// Least-frequently-used eviction.
    Lfu { size: usize },
    /// Most-frequently-used eviction.
    Mfu { size: usize },
    /// Segmented LRU with protected and probationary segments.
    Slru {
        protected_size: usize,
        probationary_size: usize,
    },
    /// Simple 2Q with primary (LRU) and secondary (FIFO) queues.
    TwoQ {
        primary_size: usize,
        secondary_size: usize,
    },
    /// Full 2Q with a ghost out-queue.
    TwoQFull {
        primary_size: usize,
        secondary_in_size: usize,
        secondary_out_size: usize,
    },
    /// Multi-queue with aging and ghost history.
    Mq(MqConfig),
    /// Time-aware LRU with expiry deadlines.
    Tlru(TlruConfig),
}

/// A cache engine chosen at runtime.
///
/// Wraps every concrete engine and delegates the [`CacheEngine`] contract.
pub enum Engine<K, V> {
    Fifo(FifoCache<K, V>),
    Lifo(LifoCache<K, V>),
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
    Nmru(NmruCache<K, V>),
    Rr(RrCache<K, V>),
    Static(StaticCache<K, V>),
    Lfu(LfuCache<K, V>),
    Mfu(MfuCache<K, V>),
    Slru(SlruCache<K, V>),
    TwoQ(TwoQCache<K, V>),
    TwoQFull(TwoQFullCache<K, V>),
    Mq(MqCache<K, V>),
    Tlru(TlruCache<K, V>),
}

impl<K, V> Engine<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Constructs the engine selected by `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the policy's parameters fail validation.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::builder::{Engine, PolicyConfig};
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache: Engine<u32, u32> =
    ///     Engine::new(PolicyConfig::Fifo { size: 8 }).unwrap();
    /// cache.put(1, 10);
    /// assert_eq!(cache.get(&1), Some(&10));
    ///
    /// assert!(Engine::<u32, u32>::new(PolicyConfig::Lru { size: 0 }).is_err());
    /// ```
    pub fn new(config: PolicyConfig) -> Result<Self, ConfigError> {
        Ok(match config {
            PolicyConfig::Fifo { size } => Engine::Fifo(FifoCache::new(size)?),
            PolicyConfig::Lifo { size } => Engine::Lifo(LifoCache::new(size)?),
            PolicyConfig::Lru { size } => Engine::Lru(LruCache::new(size)?),
            PolicyConfig::Mru { size } => Engine::Mru(MruCache::new(size)?),
            PolicyConfig::Nmru { size } => Engine::Nmru(NmruCache::new(size)?),
            PolicyConfig::Rr { size } => Engine::Rr(RrCache::new(size)?),
            PolicyConfig::Static => Engine::Static(StaticCache::new()),
            PolicyConfig::Lfu { size } => Engine::Lfu(LfuCache::new(size)?),
            PolicyConfig::Mfu { size } => Engine::Mfu(MfuCache::new(size)?),
            PolicyConfig::Slru {
                protected_size,
                probationary_size,
            } => Engine::Slru(SlruCache::new(protected_size, probationary_size)?),
            PolicyConfig::TwoQ {
                primary_size,
                secondary_size,
            } => Engine::TwoQ(TwoQCache::new(primary_size, secondary_size)?),
            PolicyConfig::TwoQFull {
                primary_size,
                secondary_in_size,
                secondary_out_size,
            } => Engine::TwoQFull(TwoQFullCache::new(
                primary_size,
                secondary_in_size,
                secondary_out_size,
            )?),
            PolicyConfig::Mq(mq_config) => Engine::Mq(MqCache::new(mq_config)?),
            PolicyConfig::Tlru(tlru_config) => Engine::Tlru(TlruCache::new(tlru_config)?),
        })
    }
}

macro_rules! delegate {
    ($self:ident, $cache:ident => $body:expr) => {
        match $self {
            Engine::Fifo($cache) => $body,
            Engine::Lifo($cache) => $body,
            Engine::Lru($cache) => $body,
            Engine::Mru($cache) => $body,
            Engine::Nmru($cache) => $body,
            Engine::Rr($cache) => $body,
            Engine::Static($cache) => $body,
            Engine::Lfu($cache) => $body,
            Engine::Mfu($cache) => $body,
            Engine::Slru($cache) => $body,
            Engine::TwoQ($cache) => $body,
            Engine::TwoQFull($cache) => $body,
            Engine::Mq($cache) => $body,
            Engine::Tlru($cache) => $body,
        }
    };
}

impl<K, V> CacheEngine<K, V> for Engine<K, V>
where
    K: Clone + Eq + Hash,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        delegate!(self, cache => cache.get(key))
    }

    fn put(&mut self, key: K, value: V) {
        delegate!(self, cache => cache.put(key, value))
    }

    fn clear(&mut self) {
        delegate!(self, cache => cache.clear())
    }

    fn len(&self) -> usize {
        delegate!(self, cache => cache.len())
    }

    fn capacity(&self) -> Capacity {
        delegate!(self, cache => cache.capacity())
    }

    fn hits(&self) -> u64 {
        delegate!(self, cache => cache.hits())
    }

    fn misses(&self) -> u64 {
        delegate!(self, cache => cache.misses())
    }

    fn dynamic_methods(&self) -> &'static [&'static str] {
        delegate!(self, cache => cache.dynamic_methods())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_bounded_configs() -> Vec<PolicyConfig> {
        vec![
            PolicyConfig::Fifo { size: 10 },
            PolicyConfig::Lifo { size: 10 },
            PolicyConfig::Lru { size: 10 },
            PolicyConfig::Mru { size: 10 },
            PolicyConfig::Nmru { size: 10 },
            PolicyConfig::Rr { size: 10 },
            PolicyConfig::Lfu { size: 10 },
            PolicyConfig::Mfu { size: 10 },
            PolicyConfig::Slru {
                protected_size: 5,
                probationary_size: 5,
            },
            PolicyConfig::TwoQ {
                primary_size: 5,
                secondary_size: 5,
            },
            PolicyConfig::TwoQFull {
                primary_size: 4,
                secondary_in_size: 3,
                secondary_out_size: 3,
            },
            PolicyConfig::Mq(MqConfig::new(10, 5, 1_000)),
            PolicyConfig::Tlru(TlruConfig::new(10, 1_000).access_based(true)),
        ]
    }

    #[test]
    fn every_policy_supports_basic_ops() {
        let mut configs = all_bounded_configs();
        configs.push(PolicyConfig::Static);

        for config in configs {
            let mut cache: Engine<u64, String> = Engine::new(config).unwrap();

            assert_eq!(cache.get(&1), None);
            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());
            assert_eq!(cache.get(&1), Some(&"one".to_string()));
            assert_eq!(cache.get(&3), None);

            cache.put(1, "ONE".to_string());
            assert_eq!(cache.get(&1), Some(&"ONE".to_string()));

            assert_eq!(cache.len(), 2);
            assert_eq!(cache.hits(), 2);
            assert_eq!(cache.misses(), 2);
            assert!(cache.dynamic_methods().is_empty());

            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.hits(), 0);
            assert_eq!(cache.misses(), 0);
        }
    }

    #[test]
    fn bounded_policies_enforce_capacity() {
        for config in all_bounded_configs() {
            let mut cache: Engine<u64, u64> = Engine::new(config).unwrap();
            let max = match cache.capacity() {
                Capacity::Bounded(n) => n,
                Capacity::Unbounded => panic!("expected a bounded engine"),
            };
            for i in 0..200 {
                cache.put(i, i);
                assert!(cache.len() <= max, "{:?} overflowed", config);
            }
        }
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(Engine::<u64, u64>::new(PolicyConfig::Lru { size: 0 }).is_err());
        assert!(Engine::<u64, u64>::new(PolicyConfig::Slru {
            protected_size: 0,
            probationary_size: 1,
        })
        .is_err());
        assert!(
            Engine::<u64, u64>::new(PolicyConfig::Mq(MqConfig::new(4, 4, 10).num_queues(1)))
                .is_err()
        );
    }

    #[test]
    fn static_engine_is_unbounded() {
        let cache: Engine<u64, u64> = Engine::new(PolicyConfig::Static).unwrap();
        assert!(cache.capacity().is_unbounded());
    }
}
