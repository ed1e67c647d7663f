//! Bounded memoization for key conversion.
//!
//! Entries are keyed by `(role, BLAKE3(input))`, so a public-key conversion
//! can never answer for a secret-key conversion of the same bytes, and raw
//! secret seeds are never held as map keys. Cached values are zeroized when
//! evicted or dropped.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tracing::trace;
use zeroize::Zeroizing;

use crate::convert::{ENCRYPTION_KEY_LEN, KeyRole};
use crate::error::CryptoResult;

type Converted = Zeroizing<[u8; ENCRYPTION_KEY_LEN]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    role: KeyRole,
    fingerprint: [u8; 32],
}

impl CacheKey {
    fn new(role: KeyRole, input: &[u8]) -> Self {
        Self {
            role,
            fingerprint: *blake3::hash(input).as_bytes(),
        }
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to run the conversion.
    pub misses: u64,
    /// Entries currently held.
    pub entries: usize,
    /// Maximum number of entries (0 = caching disabled).
    pub capacity: usize,
}

/// A thread-safe, fixed-capacity LRU cache of converted keys.
///
/// Only [`IdentityCrypto`](crate::IdentityCrypto) creates and fills a cache.
/// From outside the crate it can be inspected or cleared, never written, so
/// every entry is the output of the real conversion:
///
/// ```compile_fail
/// use keybox_crypto::{IdentityCrypto, KeyRole};
///
/// let crypto = IdentityCrypto::new();
/// let _ = crypto
///     .cache()
///     .get_or_convert(KeyRole::Public, &[1u8; 32], || Ok([9u8; 32].into()));
/// ```
///
/// The conversion runs outside the lock. Two threads missing on the same key
/// may both compute it; both store identical bytes, so the race is benign.
pub struct ConversionCache {
    entries: Option<Mutex<LruCache<CacheKey, Converted>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ConversionCache {
    /// Capacity used when none is configured.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create a cache holding at most `capacity` conversions.
    ///
    /// A capacity of zero disables caching entirely.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached conversion of `input`, or run `convert` and cache
    /// its result.
    ///
    /// Failed conversions are not cached.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `convert`.
    pub(crate) fn get_or_convert<F>(
        &self,
        role: KeyRole,
        input: &[u8],
        convert: F,
    ) -> CryptoResult<Converted>
    where
        F: FnOnce() -> CryptoResult<Converted>,
    {
        let Some(entries) = &self.entries else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return convert();
        };

        let key = CacheKey::new(role, input);

        if let Some(hit) = lock(entries).get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(?role, "conversion cache hit");
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(?role, "conversion cache miss");

        let converted = convert()?;
        lock(entries).put(key, converted.clone());
        Ok(converted)
    }

    /// Whether a conversion of `input` for `role` is currently cached.
    #[must_use]
    pub fn contains(&self, role: KeyRole, input: &[u8]) -> bool {
        self.entries
            .as_ref()
            .is_some_and(|entries| lock(entries).contains(&CacheKey::new(role, input)))
    }

    /// Number of cached conversions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| lock(entries).len())
    }

    /// Whether the cache holds no conversions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached conversions (0 when disabled).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| lock(entries).cap().get())
    }

    /// Drop every cached conversion. Counters are kept.
    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            lock(entries).clear();
        }
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: self.capacity(),
        }
    }
}

impl std::fmt::Debug for ConversionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

// Every value is a pure function of its key, so a panic mid-update cannot
// leave an entry that disagrees with the transform.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;

    fn fixed(byte: u8) -> CryptoResult<Converted> {
        Ok(Zeroizing::new([byte; ENCRYPTION_KEY_LEN]))
    }

    #[test]
    fn test_memoizes() {
        let cache = ConversionCache::new(8);
        let first = cache.get_or_convert(KeyRole::Public, b"key", || fixed(1)).unwrap();
        let second = cache
            .get_or_convert(KeyRole::Public, b"key", || panic!("should be cached"))
            .unwrap();

        assert_eq!(*first, *second);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_role_is_part_of_key() {
        let cache = ConversionCache::new(8);
        cache.get_or_convert(KeyRole::Public, b"same", || fixed(1)).unwrap();
        let secret = cache
            .get_or_convert(KeyRole::Secret, b"same", || fixed(2))
            .unwrap();

        assert_eq!(*secret, [2u8; ENCRYPTION_KEY_LEN]);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(KeyRole::Public, b"same"));
        assert!(cache.contains(KeyRole::Secret, b"same"));
    }

    #[test]
    fn test_lru_eviction() {
        let cache = ConversionCache::new(2);
        cache.get_or_convert(KeyRole::Public, b"a", || fixed(1)).unwrap();
        cache.get_or_convert(KeyRole::Public, b"b", || fixed(2)).unwrap();

        // Touch "a" so "b" is the least recently used.
        cache.get_or_convert(KeyRole::Public, b"a", || fixed(9)).unwrap();
        cache.get_or_convert(KeyRole::Public, b"c", || fixed(3)).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(KeyRole::Public, b"a"));
        assert!(!cache.contains(KeyRole::Public, b"b"));
        assert!(cache.contains(KeyRole::Public, b"c"));
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = ConversionCache::new(8);
        let err = cache
            .get_or_convert(KeyRole::Public, b"bad", || {
                Err(CryptoError::InvalidKey("nope".into()))
            })
            .unwrap_err();

        assert!(matches!(err, CryptoError::InvalidKey(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_disabled_never_stores() {
        let cache = ConversionCache::new(0);
        cache.get_or_convert(KeyRole::Public, b"a", || fixed(1)).unwrap();
        cache.get_or_convert(KeyRole::Public, b"a", || fixed(1)).unwrap();

        assert_eq!(cache.capacity(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_clear() {
        let cache = ConversionCache::new(ConversionCache::DEFAULT_CAPACITY);
        assert_eq!(cache.capacity(), ConversionCache::DEFAULT_CAPACITY);

        cache.get_or_convert(KeyRole::Secret, b"a", || fixed(1)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }
}
