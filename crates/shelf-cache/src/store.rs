//! TTL map shared by the book and search caches

use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{info, trace};

use shelf_cache_core::{CacheEntry, CacheKind, CacheLookup, CacheMetrics, CacheStats, Clock, Result};

use crate::sweeper::Sweep;

/// Running counters; `size` is read from the map on demand
#[derive(Debug, Default)]
struct StoreCounters {
    hits: u64,
    misses: u64,
    expired: u64,
    writes: u64,
    fetch_failures: u64,
    evictions: u64,
}

/// Concurrent TTL map that memoizes upstream results, including "not found"
///
/// There is no in-flight tracking: concurrent misses for one key each call
/// the fetcher and each write, the last write wins. Failed fetches are never
/// stored and never touch an existing entry.
pub(crate) struct TtlStore<K, V, M> {
    kind: CacheKind,
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    metrics: Arc<M>,
    counters: RwLock<StoreCounters>,
}

impl<K, V, M> TtlStore<K, V, M>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
    M: CacheMetrics,
{
    pub fn new(kind: CacheKind, ttl: Duration, clock: Arc<dyn Clock>, metrics: Arc<M>) -> Self {
        Self {
            kind,
            entries: DashMap::new(),
            ttl,
            clock,
            metrics,
            counters: RwLock::new(StoreCounters::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Classify the slot for `key` without fetching
    pub fn lookup(&self, key: &K) -> CacheLookup<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                CacheLookup::Fresh(entry.value().value().clone())
            }
            Some(_) => CacheLookup::Stale,
            None => CacheLookup::Absent,
        }
    }

    /// Return the fresh value for `key`, or run `fetch` and store its result
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let label = key.to_string();

        match self.lookup(&key) {
            CacheLookup::Fresh(value) => {
                self.counters.write().hits += 1;
                self.metrics.record_hit(self.kind, &label);
                trace!(cache = self.kind.as_str(), key = %label, "Cache hit");
                return Ok(value);
            }
            CacheLookup::Stale => {
                self.counters.write().expired += 1;
                self.metrics.record_expired(self.kind, &label);
                trace!(cache = self.kind.as_str(), key = %label, "Cache entry expired, refetching");
            }
            CacheLookup::Absent => {
                self.counters.write().misses += 1;
                self.metrics.record_miss(self.kind, &label);
                trace!(cache = self.kind.as_str(), key = %label, "Cache miss");
            }
        }

        let start = Instant::now();
        match fetch().await {
            Ok(value) => {
                self.metrics.record_fetch(self.kind, start.elapsed());
                self.insert(key, value.clone());
                info!(cache = self.kind.as_str(), key = %label, "Fetched and cached");
                Ok(value)
            }
            Err(e) => {
                self.counters.write().fetch_failures += 1;
                self.metrics.record_fetch_failure(self.kind, &e);
                trace!(cache = self.kind.as_str(), key = %label, error = %e, "Fetch failed, nothing cached");
                Err(e)
            }
        }
    }

    /// Store `value` as a brand-new entry, replacing any previous one
    pub fn insert(&self, key: K, value: V) {
        self.entries
            .insert(key, CacheEntry::new(value, Arc::clone(&self.clock)));
        self.counters.write().writes += 1;
    }

    /// Remove every entry older than the TTL at one sampled instant
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut removed = 0usize;

        self.entries.retain(|_, entry| {
            let keep = !entry.is_stale(now, ttl);
            if !keep {
                removed += 1;
            }
            keep
        });

        let remaining = self.entries.len();
        self.counters.write().evictions += removed as u64;
        self.metrics.record_sweep(self.kind, removed, remaining);

        trace!(cache = self.kind.as_str(), removed, remaining, "Sweep finished");

        removed
    }

    pub fn clear(&self) {
        let dropped = self.entries.len();
        self.entries.clear();
        info!(cache = self.kind.as_str(), dropped, "Cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        let counters = self.counters.read();
        CacheStats {
            hits: counters.hits,
            misses: counters.misses,
            expired: counters.expired,
            writes: counters.writes,
            fetch_failures: counters.fetch_failures,
            evictions: counters.evictions,
            size: self.entries.len(),
        }
    }
}

impl<K, V, M> Sweep for TtlStore<K, V, M>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    M: CacheMetrics,
{
    fn sweep(&self) -> usize {
        TtlStore::sweep(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_cache_core::{CatalogError, ManualClock, NoopMetrics, Stage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);

    fn store(clock: &ManualClock) -> TtlStore<String, u32, NoopMetrics> {
        TtlStore::new(
            CacheKind::Book,
            TTL,
            Arc::new(clock.clone()),
            Arc::new(NoopMetrics),
        )
    }

    #[tokio::test]
    async fn test_get_or_fetch_memoizes() {
        let clock = ManualClock::starting_now();
        let store = store(&clock);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = store
                .get_or_fetch("a".to_string(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = store.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.writes, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_entry() {
        let clock = ManualClock::starting_now();
        let store = store(&clock);
        store.insert("a".to_string(), 1);
        clock.advance(TTL + Duration::from_millis(1));

        let err = store
            .get_or_fetch("a".to_string(), || async {
                Err(CatalogError::unexpected_status(Stage::Book, "/books/a.json", 500))
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(store.contains(&"a".to_string()));
        assert!(matches!(store.lookup(&"a".to_string()), CacheLookup::Stale));
        assert_eq!(store.stats().fetch_failures, 1);
        assert_eq!(store.stats().expired, 1);
    }

    #[test]
    fn test_lookup_boundary() {
        let clock = ManualClock::starting_now();
        let store = store(&clock);
        store.insert("a".to_string(), 1);

        clock.advance(TTL);
        assert_eq!(store.lookup(&"a".to_string()), CacheLookup::Fresh(1));

        clock.advance(Duration::from_millis(1));
        assert!(store.lookup(&"a".to_string()).needs_fetch());
        assert!(matches!(store.lookup(&"b".to_string()), CacheLookup::Absent));
    }

    #[test]
    fn test_sweep_counts_evictions() {
        let clock = ManualClock::starting_now();
        let store = store(&clock);
        store.insert("old".to_string(), 1);
        clock.advance(Duration::from_secs(30));
        store.insert("new".to_string(), 2);
        clock.advance(Duration::from_secs(31));

        assert_eq!(store.sweep(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&"new".to_string()));
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.stats().size, 1);
    }
}
