//! Dependency-keyed memoization
//!
//! Style resolution is a pure function of its inputs (resolved props, theme,
//! the `unstyled` flag, instance overrides). [`MemoCache`] stores results keyed
//! by a hash of exactly those inputs, so a render with identical inputs reuses
//! the previous result and a render with any changed input recomputes.
//!
//! Inputs that are not hashable (most notably the theme itself) are handled
//! by invalidation instead: the owner calls [`MemoCache::invalidate`] when the
//! theme reference changes.
//!
//! The table is an LRU bounded to [`MemoCache::capacity`] entries, so props
//! that change on every render (an input's `value`) cannot grow it without
//! limit. Each entry also records a second, independent hash of its
//! dependencies; a hit whose check hash differs is treated as a miss.
//!
//! ```rust
//! use tessera_core::MemoCache;
//!
//! let cache = MemoCache::new();
//! let a = cache.get_or_insert_with(&("Button", "sm"), || 40u32);
//! let b = cache.get_or_insert_with(&("Button", "sm"), || -> u32 { unreachable!() });
//! assert_eq!(*a, *b);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::any::{Any, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use rustc_hash::FxHasher;

/// Entries a [`MemoCache::new`] cache keeps before evicting
pub const DEFAULT_MEMO_CAPACITY: usize = 512;

/// Key for identifying a memoized value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemoKey {
    /// Hash of the dependency tuple
    key_hash: u64,
    /// Type of the cached value
    type_id: TypeId,
}

impl MemoKey {
    /// Create a key from a hashable dependency tuple and the cached value type
    pub fn new<T: 'static, K: Hash + ?Sized>(deps: &K) -> Self {
        let mut hasher = FxHasher::default();
        deps.hash(&mut hasher);
        Self {
            key_hash: hasher.finish(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// SipHash of the dependencies, independent of the Fx key hash
fn check_hash<K: Hash + ?Sized>(deps: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    deps.hash(&mut hasher);
    hasher.finish()
}

/// Hit/miss/eviction counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

type Entry = Arc<dyn Any + Send + Sync>;

struct Stored {
    check: u64,
    value: Entry,
}

/// Shared, bounded memo table
pub struct MemoCache {
    entries: Mutex<LruCache<MemoKey, Stored>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    revision: AtomicU64,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMO_CAPACITY)
    }

    /// Cache keeping at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            revision: AtomicU64::new(0),
        }
    }

    fn entries(&self) -> MutexGuard<'_, LruCache<MemoKey, Stored>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `deps`, computing it with `init` on a miss.
    ///
    /// `init` runs without the table lock held, so it may itself use the cache.
    pub fn get_or_insert_with<T, K, F>(&self, deps: &K, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        K: Hash + ?Sized,
        F: FnOnce() -> T,
    {
        let key = MemoKey::new::<T, K>(deps);
        let check = check_hash(deps);

        let existing = match self.entries().get(&key) {
            Some(stored) if stored.check == check => Some(stored.value.clone()),
            Some(_) => {
                tracing::debug!("MemoCache::get_or_insert_with - key hash collision, recomputing");
                None
            }
            None => None,
        };

        if let Some(entry) = existing {
            if let Ok(value) = entry.downcast::<T>() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return value;
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = Arc::new(init());
        let displaced = self.entries().push(
            key,
            Stored {
                check,
                value: value.clone() as Entry,
            },
        );
        if matches!(displaced, Some((old, _)) if old != key) {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Drop every cached value and bump the revision
    pub fn invalidate(&self) {
        let mut entries = self.entries();
        let dropped = entries.len();
        entries.clear();
        drop(entries);

        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("MemoCache::invalidate - dropped {dropped} entries, revision {revision}");
    }

    /// Number of invalidations so far
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries kept
    pub fn capacity(&self) -> usize {
        self.entries().cap().get()
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("revision", &self.revision())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_key() {
        let key1 = MemoKey::new::<i32, _>("counter");
        let key2 = MemoKey::new::<i32, _>("counter");
        let key3 = MemoKey::new::<String, _>("counter");

        assert_eq!(key1, key2);
        assert_ne!(key1, key3); // Different value types
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = MemoCache::new();
        let mut computed = 0;

        for _ in 0..3 {
            cache.get_or_insert_with(&("Button", 1), || {
                computed += 1;
                "resolved".to_string()
            });
        }

        assert_eq!(computed, 1);
        assert_eq!(
            cache.stats(),
            MemoStats {
                hits: 2,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[test]
    fn test_changed_dependency_recomputes() {
        let cache = MemoCache::new();
        let a = cache.get_or_insert_with(&("Button", "sm"), || 1u8);
        let b = cache.get_or_insert_with(&("Button", "lg"), || 2u8);

        assert_eq!((*a, *b), (1, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_clears_and_bumps_revision() {
        let cache = MemoCache::new();
        cache.get_or_insert_with(&"k", || 1u8);
        assert_eq!(cache.revision(), 0);

        cache.invalidate();

        assert!(cache.is_empty());
        assert_eq!(cache.revision(), 1);
        let mut recomputed = false;
        cache.get_or_insert_with(&"k", || {
            recomputed = true;
            1u8
        });
        assert!(recomputed);
    }

    #[test]
    fn test_bounded_by_capacity() {
        let cache = MemoCache::with_capacity(4);
        for value in 0..10u32 {
            cache.get_or_insert_with(&("Input", value), || value);
        }

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.stats().evictions, 6);
    }

    #[test]
    fn test_least_recently_used_evicted_first() {
        let cache = MemoCache::with_capacity(2);
        cache.get_or_insert_with(&"a", || 1u8);
        cache.get_or_insert_with(&"b", || 2u8);
        // Touch `a` so `b` becomes the eviction candidate
        cache.get_or_insert_with(&"a", || 0u8);
        cache.get_or_insert_with(&"c", || 3u8);

        let a = cache.get_or_insert_with(&"a", || 0u8);
        assert_eq!(*a, 1);
        let b = cache.get_or_insert_with(&"b", || 20u8);
        assert_eq!(*b, 20);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let cache = MemoCache::with_capacity(0);
        cache.get_or_insert_with(&"a", || 1u8);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_check_hash_mismatch_is_a_miss() {
        let cache = MemoCache::new();
        let key = MemoKey::new::<u8, _>("a");
        let bogus = check_hash("a").wrapping_add(1);
        cache.entries().put(
            key,
            Stored {
                check: bogus,
                value: Arc::new(99u8),
            },
        );

        let value = cache.get_or_insert_with("a", || 7u8);
        assert_eq!(*value, 7);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(*cache.get_or_insert_with("a", || 0u8), 7);
    }
}
