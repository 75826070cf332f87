//! Bounded memo caches for loaded datasets and metrics reports

use moka::sync::Cache;
use salesdash_common::Result;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Hit, miss and invalidation counters of one cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups answered from the cache
    pub hits: AtomicU64,
    /// Lookups that had to compute the value
    pub misses: AtomicU64,
    /// Times the whole cache was cleared
    pub invalidations: AtomicU64,
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

/// Copy of [`CacheMetrics`] at one moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// See [`CacheMetrics::hits`]
    pub hits: u64,
    /// See [`CacheMetrics::misses`]
    pub misses: u64,
    /// See [`CacheMetrics::invalidations`]
    pub invalidations: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, 0 when nothing was looked up
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Content-addressed memo table over a bounded in-memory cache.
///
/// Values are shared behind [`Arc`]; a failed computation stores nothing.
pub struct MemoCache<K, V> {
    name: &'static str,
    cache: Cache<K, Arc<V>>,
    metrics: Arc<CacheMetrics>,
}

impl<K, V> MemoCache<K, V>
where
    K: Hash + Eq + Send + Sync + fmt::Display + 'static,
    V: Send + Sync + 'static,
{
    /// Create a cache holding at most `capacity` entries
    pub fn new(name: &'static str, capacity: u64) -> Self {
        Self {
            name,
            cache: Cache::builder().max_capacity(capacity).build(),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Cached value for `key`, if present
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let found = self.cache.get(key);
        if found.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }
        found
    }

    /// Cached value for `key`, or the result of `compute` stored under it.
    #[instrument(skip(self, compute), fields(cache = self.name, key = %key))]
    pub fn get_or_try_insert_with<F>(&self, key: K, compute: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.cache.get(&key) {
            debug!("Cache hit");
            self.metrics.record_hit();
            return Ok(value);
        }

        debug!("Cache miss");
        self.metrics.record_miss();
        let value = Arc::new(compute()?);
        self.cache.insert(key, Arc::clone(&value));
        Ok(value)
    }

    /// Drop every entry
    #[instrument(skip(self), fields(cache = self.name))]
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.metrics.record_invalidation();
        info!("Invalidated all cache entries");
    }

    /// Shared counters
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot()
    }
}

impl<K, V> fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("name", &self.name)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::DashError;
    use std::cell::Cell;

    #[test]
    fn test_memoizes_successful_computation() {
        let cache: MemoCache<String, u32> = MemoCache::new("test", 4);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(42)
        };

        assert_eq!(*cache.get_or_try_insert_with("a".into(), compute).unwrap(), 42);
        assert_eq!(*cache.get_or_try_insert_with("a".into(), compute).unwrap(), 42);
        assert_eq!(calls.get(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache: MemoCache<String, u32> = MemoCache::new("test", 4);

        let err = cache
            .get_or_try_insert_with("a".into(), || Err(DashError::computation("boom")))
            .unwrap_err();
        assert!(matches!(err, DashError::Computation { .. }));
        assert!(cache.get(&"a".to_string()).is_none());

        assert_eq!(*cache.get_or_try_insert_with("a".into(), || Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_invalidate_all() {
        let cache: MemoCache<String, u32> = MemoCache::new("test", 4);
        cache.get_or_try_insert_with("a".into(), || Ok(1)).unwrap();
        cache.invalidate_all();

        assert!(cache.get(&"a".to_string()).is_none());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_empty_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
