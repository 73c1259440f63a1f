//! # Cache Engine Contract
//!
//! This module defines the uniform interface every replacement-policy engine
//! implements, plus the observable types shared by all of them.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────────────────────┐
//!                  │           CacheEngine<K, V>              │
//!                  │                                          │
//!                  │  get(&mut, &K) → Option<&V>   (counted)  │
//!                  │  put(&mut, K, V)                         │
//!                  │  clear(&mut)                             │
//!                  │  len(&) / is_empty(&)                    │
//!                  │  capacity(&) → Capacity                  │
//!                  │  hits(&) / misses(&) → u64               │
//!                  │  stats(&) → CacheStats                   │
//!                  │  dynamic_methods(&) → &[&str]            │
//!                  └──────────────────────────────────────────┘
//!                                     │
//!        ┌──────────┬──────────┬──────┴─────┬───────────┬───────────┐
//!        ▼          ▼          ▼            ▼           ▼           ▼
//!    FifoCache   LruCache   LfuCache   SlruCache   MqCache   TlruCache ...
//! ```
//!
//! ## Contract Summary
//!
//! | Operation         | Effect on counters | Effect on ordering            |
//! |-------------------|--------------------|-------------------------------|
//! | `get` (present)   | `hits += 1`        | policy-defined (may reorder)  |
//! | `get` (absent)    | `misses += 1`      | none (time-based sweeps aside)|
//! | `put` (new key)   | none               | insert; evict one if full     |
//! | `put` (existing)  | none               | remove then insert fresh      |
//! | `clear`           | both reset to 0    | everything dropped            |
//!
//! A miss is not an error: `get` returns `None`, the zero-allocation absence
//! sentinel. Engines never fail at runtime; invalid configuration is caught
//! at construction with [`ConfigError`](crate::error::ConfigError).
//!
//! ## Design Rationale
//!
//! One trait carries the whole capability set rather than a per-policy
//! hierarchy:
//!
//! - Every engine supports the same eight operations with identical counter
//!   semantics, so a memoization facade can hold "some engine" without
//!   caring which policy backs it.
//! - Policy-specific introspection (`peek_lru`, `frequency`, `zone_of`,
//!   `deadline_of`, ...) stays on the concrete types, where its meaning is
//!   unambiguous.
//! - The trait is object-safe: `Box<dyn CacheEngine<K, V>>` works for
//!   facades that cannot use the [`Engine`](crate::builder::Engine) enum.
//!
//! `max_size` is a [`Capacity`] rather than a bare `usize` so the static
//! cache's "no limit" is a first-class value instead of a magic number.
//!
//! ## Thread Safety
//!
//! - Engines are **NOT thread-safe**; the scheduling model is
//!   single-threaded cooperative and every operation assumes exclusive
//!   access.
//! - Even reads need `&mut self`: most policies reorder on `get`, and all
//!   of them count hits and misses.
//! - Callers needing concurrency wrap an engine in their own
//!   mutual-exclusion discipline (e.g. `Mutex<Engine<K, V>>`); the crate
//!   ships none.
//!
//! ## When to Use
//!
//! Bound generic code on `CacheEngine` when it only needs the uniform
//! contract; name a concrete engine type when it needs policy-specific
//! introspection or wants static dispatch on a hot path.

use std::fmt;

/// Maximum capacity of an engine, in entries.
///
/// Most engines are bounded; [`StaticCache`](crate::policy::unbounded::StaticCache)
/// and size-less [`TlruCache`](crate::policy::tlru::TlruCache) report
/// [`Capacity::Unbounded`] instead of a magic number.
///
/// # Example
///
/// ```
/// use memokit::traits::Capacity;
///
/// let bounded = Capacity::Bounded(64);
/// assert_eq!(bounded.get(), Some(64));
/// assert!(!bounded.is_unbounded());
/// assert!(bounded.admits(63));
/// assert!(!bounded.admits(64));
///
/// let unbounded = Capacity::Unbounded;
/// assert_eq!(unbounded.get(), None);
/// assert!(unbounded.admits(usize::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// At most this many entries after any completed `put`.
    Bounded(usize),
    /// No limit; the engine grows until `clear`.
    Unbounded,
}

impl Capacity {
    /// Returns the bound, or `None` if unbounded.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::traits::Capacity;
    ///
    /// assert_eq!(Capacity::Bounded(8).get(), Some(8));
    /// assert_eq!(Capacity::Unbounded.get(), None);
    /// ```
    #[inline]
    pub fn get(self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(n),
            Capacity::Unbounded => None,
        }
    }

    /// Returns `true` if there is no limit.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::traits::Capacity;
    ///
    /// assert!(Capacity::Unbounded.is_unbounded());
    /// assert!(!Capacity::Bounded(8).is_unbounded());
    /// ```
    #[inline]
    pub fn is_unbounded(self) -> bool {
        matches!(self, Capacity::Unbounded)
    }

    /// Returns `true` if one more entry fits on top of `len`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::traits::Capacity;
    ///
    /// assert!(Capacity::Bounded(2).admits(1));
    /// assert!(!Capacity::Bounded(2).admits(2));
    /// assert!(Capacity::Unbounded.admits(usize::MAX));
    /// ```
    #[inline]
    pub fn admits(self, len: usize) -> bool {
        match self {
            Capacity::Bounded(n) => len < n,
            Capacity::Unbounded => true,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(n) => write!(f, "{}", n),
            Capacity::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Point-in-time snapshot of an engine's observables.
///
/// # Example
///
/// ```
/// use memokit::policy::fifo::FifoCache;
/// use memokit::traits::{CacheEngine, Capacity};
///
/// let mut cache: FifoCache<u32, &str> = FifoCache::new(2).unwrap();
/// cache.put(1, "one");
/// cache.get(&1);
/// cache.get(&9);
///
/// let stats = cache.stats();
/// assert_eq!(stats.hits, 1);
/// assert_eq!(stats.misses, 1);
/// assert_eq!(stats.current_size, 1);
/// assert_eq!(stats.max_size, Capacity::Bounded(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of `get` calls that found their key since the last `clear`.
    pub hits: u64,
    /// Number of `get` calls that missed since the last `clear`.
    pub misses: u64,
    /// Live (value-bearing) entries; ghosts never count.
    pub current_size: usize,
    /// Configured maximum; composite for multi-queue policies.
    pub max_size: Capacity,
}

/// Uniform contract implemented by every replacement-policy engine.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations require `Eq + Hash`, most also `Clone`)
/// - `V`: Value type (opaque; never inspected or compared)
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
/// use memokit::traits::CacheEngine;
///
/// fn warm<C: CacheEngine<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(16).unwrap();
/// warm(&mut cache, &[(1, "one".into()), (2, "two".into())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CacheEngine<K, V> {
    /// Looks up a key, returning the stored value or `None`.
    ///
    /// Increments `hits` on presence, `misses` on absence. May reorder
    /// internal structures (policy-defined). Never inserts.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(4).unwrap();
    /// cache.put(1, "one");
    ///
    /// assert_eq!(cache.get(&1), Some(&"one")); // hit
    /// assert_eq!(cache.get(&2), None);         // miss
    /// assert_eq!(cache.hits(), 1);
    /// assert_eq!(cache.misses(), 1);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or replaces a key.
    ///
    /// Replacing behaves as remove-then-insert: the stored value is swapped
    /// and policy metadata is reset as if the key were freshly inserted.
    /// If a new key would exceed capacity, one victim is evicted first.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = FifoCache::new(2).unwrap();
    /// cache.put(1, "first");
    /// cache.put(1, "second"); // replace: value swapped, metadata fresh
    ///
    /// assert_eq!(cache.get(&1), Some(&"second"));
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn put(&mut self, key: K, value: V);

    /// Drops all entries (ghost buffers included) and zeroes the counters.
    ///
    /// Configuration, including `capacity`, is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::{CacheEngine, Capacity};
    ///
    /// let mut cache = LruCache::new(4).unwrap();
    /// cache.put(1, "one");
    /// cache.get(&1);
    /// cache.clear();
    ///
    /// assert!(cache.is_empty());
    /// assert_eq!(cache.hits(), 0);
    /// assert_eq!(cache.misses(), 0);
    /// assert_eq!(cache.capacity(), Capacity::Bounded(4)); // unchanged
    /// ```
    fn clear(&mut self);

    /// Returns the number of live entries.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = FifoCache::new(4).unwrap();
    /// assert_eq!(cache.len(), 0);
    ///
    /// cache.put(1, "a");
    /// cache.put(2, "b");
    /// assert_eq!(cache.len(), 2);
    /// ```
    fn len(&self) -> usize;

    /// Returns `true` if the engine holds no live entries.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(4).unwrap();
    /// assert!(cache.is_empty());
    ///
    /// cache.put(1, "one");
    /// assert!(!cache.is_empty());
    /// ```
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured maximum size.
    ///
    /// Composite for multi-queue policies (the sum of sub-queue capacities).
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::policy::unbounded::StaticCache;
    /// use memokit::traits::{CacheEngine, Capacity};
    ///
    /// let bounded: LruCache<u32, u32> = LruCache::new(64).unwrap();
    /// assert_eq!(bounded.capacity(), Capacity::Bounded(64));
    ///
    /// let unbounded: StaticCache<u32, u32> = StaticCache::new();
    /// assert_eq!(unbounded.capacity(), Capacity::Unbounded);
    /// ```
    fn capacity(&self) -> Capacity;

    /// Number of `get` hits since the last `clear`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = LruCache::new(4).unwrap();
    /// cache.put(1, "one");
    /// cache.get(&1);
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.hits(), 2);
    /// ```
    fn hits(&self) -> u64;

    /// Number of `get` misses since the last `clear`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache: LruCache<u32, u32> = LruCache::new(4).unwrap();
    /// cache.get(&1);
    /// cache.get(&2);
    ///
    /// assert_eq!(cache.misses(), 2);
    /// ```
    fn misses(&self) -> u64;

    /// Returns a snapshot of all observables.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let mut cache = FifoCache::new(2).unwrap();
    /// cache.put(1, "a");
    /// cache.get(&1);
    ///
    /// let stats = cache.stats();
    /// assert_eq!(stats.hits, 1);
    /// assert_eq!(stats.misses, 0);
    /// assert_eq!(stats.current_size, 1);
    /// ```
    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits(),
            misses: self.misses(),
            current_size: self.len(),
            max_size: self.capacity(),
        }
    }

    /// Names of auxiliary operations a wrapping facade should expose under a
    /// `cache_` prefix. Default: none.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CacheEngine;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::new(4).unwrap();
    /// assert!(cache.dynamic_methods().is_empty());
    /// ```
    fn dynamic_methods(&self) -> &'static [&'static str] {
        &[]
    }
}
