//! Memoization of resolution outcomes, keyed by the raw input text.
//!
//! Keys are never normalized: two inputs differing only in whitespace are
//! separate entries. Failures (`None`) are cached too.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use fleamap_core::ResolvedCoordinate;

/// Storage for resolution outcomes.
///
/// `get` returns `None` on a miss and `Some(None)` for a cached failure.
pub trait GeocodeCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Option<ResolvedCoordinate>>;

    fn set(&self, key: &str, value: Option<ResolvedCoordinate>);

    /// Drops every entry.
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: Option<ResolvedCoordinate>,
    stored_at: Instant,
}

/// Process-local cache behind a mutex.
///
/// Successes never expire. Failures never expire either unless a TTL was set
/// with [`MemoryCache::with_failure_ttl`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    failure_ttl: Option<Duration>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached failures older than `ttl` are treated as misses and evicted.
    #[must_use]
    pub fn with_failure_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::default(),
            failure_ttl: Some(ttl),
        }
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        match (&entry.value, self.failure_ttl) {
            (None, Some(ttl)) => entry.stored_at.elapsed() >= ttl,
            _ => false,
        }
    }
}

impl GeocodeCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Option<ResolvedCoordinate>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let expired = self.is_expired(entries.get(key)?);
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Option<ResolvedCoordinate>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.to_owned(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
