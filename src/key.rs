//! Canonical cache-key construction.
//!
//! A memoized call is identified by the composite of its arguments.
//! [`KeyBuilder`] flattens positional components in the order given, then
//! named components sorted by name, so that equivalent calls always produce
//! equal [`CacheKey`]s regardless of the order named arguments were supplied
//! in.
//!
//! With `include_types`, every component is paired with its `TypeId`, so
//! values that hash identically but have different types (`0u32` vs `0u64`)
//! produce distinct keys. `TypeId` is stable within a process, which is the
//! reproducibility window memoization needs.
//!
//! ## Design Rationale
//!
//! - Keys carry per-component 64-bit hashes rather than owned argument
//!   clones: the engines only need `Hash + Eq`, and a call site should not
//!   pay for deep copies of its arguments on every lookup.
//! - Named components fold their *name* into the component hash, so
//!   `f(x = 1)` and `f(y = 1)` differ, and positional `f(1)` differs from
//!   both.
//! - Type tags are `TypeId`s, not strings: stable within a process, free to
//!   compare, and impossible to collide by formatting.
//! - Duplicate names are an error rather than last-wins; a facade passing
//!   the same keyword twice is a bug worth surfacing.
//!
//! ## When to Use
//!
//! Use `include_types = false` when a function's argument types are fixed
//! by its signature (the usual memoization case). Use `include_types =
//! true` when heterogeneous values flow through the same parameter and
//! same-hash representations must not alias.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::key::KeyBuilder;
//!
//! let mut a = KeyBuilder::new(false);
//! a.positional(&"report");
//! a.named("page", &3u32);
//! a.named("limit", &50u32);
//!
//! let mut b = KeyBuilder::new(false);
//! b.positional(&"report");
//! b.named("limit", &50u32);
//! b.named("page", &3u32);
//!
//! // Named components are order-insensitive
//! assert_eq!(a.finish().unwrap(), b.finish().unwrap());
//! ```

use std::any::TypeId;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::KeyError;

/// One canonicalized argument: its value hash plus an optional type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KeyPart {
    hash: u64,
    type_tag: Option<TypeId>,
}

/// An opaque, hashable, equality-comparable composite key.
///
/// Produced by [`KeyBuilder::finish`]. Engines treat keys as black boxes;
/// `CacheKey` is simply a convenient `K` for them.
///
/// # Example
///
/// ```
/// use memokit::key::KeyBuilder;
/// use memokit::policy::lru::LruCache;
/// use memokit::traits::CacheEngine;
///
/// let mut cache = LruCache::new(8).unwrap();
///
/// let mut builder = KeyBuilder::new(true);
/// builder.positional(&42u64);
/// let key = builder.finish().unwrap();
///
/// cache.put(key.clone(), "answer");
/// assert_eq!(cache.get(&key), Some(&"answer"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    parts: Box<[KeyPart]>,
}

impl CacheKey {
    /// Number of canonicalized components in this key.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::key::KeyBuilder;
    ///
    /// let mut builder = KeyBuilder::new(false);
    /// builder.positional(&1u8).positional(&2u8).named("n", &3u8);
    ///
    /// assert_eq!(builder.finish().unwrap().arity(), 3);
    /// ```
    #[inline]
    pub fn arity(&self) -> usize {
        self.parts.len()
    }
}

/// Accumulates call arguments into a [`CacheKey`].
///
/// Positional components are significant in the order they are added; named
/// components are sorted by name at [`finish`](Self::finish) so the caller's
/// supply order never leaks into the key. Supplying the same name twice is
/// an error.
#[derive(Debug)]
pub struct KeyBuilder {
    include_types: bool,
    positional: Vec<KeyPart>,
    named: Vec<(String, KeyPart)>,
}

impl KeyBuilder {
    /// Creates a builder.
    ///
    /// With `include_types` set, each component carries a `TypeId` tag and
    /// same-hash values of different types yield different keys.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::key::KeyBuilder;
    ///
    /// let mut typed = KeyBuilder::new(true);
    /// typed.positional(&0u32);
    /// let mut untyped = KeyBuilder::new(false);
    /// untyped.positional(&0u32);
    ///
    /// assert_ne!(typed.finish().unwrap(), untyped.finish().unwrap());
    /// ```
    pub fn new(include_types: bool) -> Self {
        Self {
            include_types,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Adds a positional component. Order is significant.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::key::KeyBuilder;
    ///
    /// let mut ab = KeyBuilder::new(false);
    /// ab.positional(&1u32).positional(&2u32);
    /// let mut ba = KeyBuilder::new(false);
    /// ba.positional(&2u32).positional(&1u32);
    ///
    /// // Positional order is part of the key
    /// assert_ne!(ab.finish().unwrap(), ba.finish().unwrap());
    /// ```
    pub fn positional<T: Hash + 'static>(&mut self, value: &T) -> &mut Self {
        let part = self.part_for(value, None);
        self.positional.push(part);
        self
    }

    /// Adds a named component. Names are canonicalized by lexicographic sort.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::key::KeyBuilder;
    ///
    /// let mut ab = KeyBuilder::new(false);
    /// ab.named("alpha", &1u32).named("beta", &2u32);
    /// let mut ba = KeyBuilder::new(false);
    /// ba.named("beta", &2u32).named("alpha", &1u32);
    ///
    /// // Supply order of named components never leaks into the key
    /// assert_eq!(ab.finish().unwrap(), ba.finish().unwrap());
    /// ```
    pub fn named<T: Hash + 'static>(&mut self, name: &str, value: &T) -> &mut Self {
        let part = self.part_for(value, Some(name));
        self.named.push((name.to_owned(), part));
        self
    }

    /// Builds the key: positional parts in order, then named parts sorted by
    /// name.
    ///
    /// # Errors
    ///
    /// [`KeyError`] if the same name was supplied more than once.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::key::KeyBuilder;
    ///
    /// let mut ok = KeyBuilder::new(false);
    /// ok.named("page", &1u32);
    /// assert!(ok.finish().is_ok());
    ///
    /// let mut dup = KeyBuilder::new(false);
    /// dup.named("page", &1u32).named("page", &2u32);
    /// let err = dup.finish().unwrap_err();
    /// assert!(err.to_string().contains("duplicate"));
    /// ```
    pub fn finish(mut self) -> Result<CacheKey, KeyError> {
        self.named.sort_by(|(a, _), (b, _)| a.cmp(b));
        for pair in self.named.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(KeyError::new(format!(
                    "duplicate keyword argument `{}`",
                    pair[0].0
                )));
            }
        }

        let mut parts = self.positional;
        parts.extend(self.named.into_iter().map(|(_, part)| part));
        Ok(CacheKey {
            parts: parts.into_boxed_slice(),
        })
    }

    fn part_for<T: Hash + 'static>(&self, value: &T, name: Option<&str>) -> KeyPart {
        let mut hasher = FxHasher::default();
        // The name participates in the hash so `f(x=1)` and `f(y=1)` differ.
        if let Some(name) = name {
            name.hash(&mut hasher);
        }
        value.hash(&mut hasher);
        KeyPart {
            hash: hasher.finish(),
            type_tag: if self.include_types {
                Some(TypeId::of::<T>())
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(build: impl FnOnce(&mut KeyBuilder)) -> CacheKey {
        let mut builder = KeyBuilder::new(false);
        build(&mut builder);
        builder.finish().unwrap()
    }

    fn typed_key_of(build: impl FnOnce(&mut KeyBuilder)) -> CacheKey {
        let mut builder = KeyBuilder::new(true);
        build(&mut builder);
        builder.finish().unwrap()
    }

    #[test]
    fn equal_inputs_equal_keys() {
        let a = key_of(|b| {
            b.positional(&1u32).positional(&"x");
        });
        let b = key_of(|b| {
            b.positional(&1u32).positional(&"x");
        });
        assert_eq!(a, b);
    }

    #[test]
    fn positional_order_is_significant() {
        let a = key_of(|b| {
            b.positional(&1u32).positional(&2u32);
        });
        let b = key_of(|b| {
            b.positional(&2u32).positional(&1u32);
        });
        assert_ne!(a, b);
    }

    #[test]
    fn named_order_is_canonicalized() {
        let a = key_of(|b| {
            b.named("alpha", &1u32).named("beta", &2u32);
        });
        let b = key_of(|b| {
            b.named("beta", &2u32).named("alpha", &1u32);
        });
        assert_eq!(a, b);
    }

    #[test]
    fn name_distinguishes_named_components() {
        let a = key_of(|b| {
            b.named("x", &1u32);
        });
        let b = key_of(|b| {
            b.named("y", &1u32);
        });
        assert_ne!(a, b);
    }

    #[test]
    fn positional_and_named_differ() {
        let a = key_of(|b| {
            b.positional(&1u32);
        });
        let b = key_of(|b| {
            b.named("x", &1u32);
        });
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut builder = KeyBuilder::new(false);
        builder.named("x", &1u32).named("x", &2u32);
        let err = builder.finish().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn typed_keys_distinguish_same_hash_values() {
        // Untyped equality of 0u32 vs 0u64 is representation-defined, so
        // only the typed side is pinned down: the TypeId tag must separate
        // values that hash identically.
        let typed_a = typed_key_of(|b| {
            b.positional(&0u32);
        });
        let typed_b = typed_key_of(|b| {
            b.positional(&0u64);
        });
        assert_ne!(typed_a, typed_b);
    }

    #[test]
    fn typed_and_untyped_keys_differ() {
        let untyped = key_of(|b| {
            b.positional(&7u32);
        });
        let typed = typed_key_of(|b| {
            b.positional(&7u32);
        });
        assert_ne!(untyped, typed);
    }

    #[test]
    fn arity_counts_all_components() {
        let key = key_of(|b| {
            b.positional(&1u8).positional(&2u8).named("n", &3u8);
        });
        assert_eq!(key.arity(), 3);
    }

    #[test]
    fn empty_key_is_valid() {
        let a = key_of(|_| {});
        let b = key_of(|_| {});
        assert_eq!(a, b);
        assert_eq!(a.arity(), 0);
    }
}
