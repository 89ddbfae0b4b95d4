//! Per-book TTL cache

use std::sync::Arc;
use std::time::Duration;

use shelf_cache_core::{
    BookRecord, CacheKind, CacheMetrics, CacheStats, CatalogSource, Clock, NoopMetrics, Result,
    SystemClock,
};

use crate::config::CacheConfig;
use crate::store::TtlStore;
use crate::sweeper::{self, SweeperHandle};

/// Memoizing cache in front of [`CatalogSource::fetch_book_by_id`]
///
/// Keyed by the bare book identifier. "Not found" is cached like any other
/// outcome; upstream failures are passed through and not cached.
///
/// Cloning creates a new handle to the SAME underlying map.
pub struct BookCache<S, M = NoopMetrics> {
    source: Arc<S>,
    store: Arc<TtlStore<String, Option<BookRecord>, M>>,
    config: CacheConfig,
}

impl<S, M> Clone for BookCache<S, M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: CatalogSource> BookCache<S, NoopMetrics> {
    /// Create a cache with default TTL and sweep period
    pub fn new(source: S) -> Self {
        Self::with_config(source, CacheConfig::default())
    }

    /// Create with custom config
    pub fn with_config(source: S, config: CacheConfig) -> Self {
        Self::with_clock_and_metrics(
            Arc::new(source),
            config,
            Arc::new(SystemClock),
            Arc::new(NoopMetrics),
        )
    }
}

impl<S, M> BookCache<S, M>
where
    S: CatalogSource,
    M: CacheMetrics,
{
    /// Create a cache with an explicit time source and metrics sink
    pub fn with_clock_and_metrics(
        source: Arc<S>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
        metrics: Arc<M>,
    ) -> Self {
        Self {
            source,
            store: Arc::new(TtlStore::new(CacheKind::Book, config.ttl, clock, metrics)),
            config,
        }
    }

    /// Fetch a book, serving a fresh cached outcome when there is one
    pub async fn get_by_id(&self, book_id: &str) -> Result<Option<BookRecord>> {
        let source = &self.source;
        self.store
            .get_or_fetch(book_id.to_string(), || source.fetch_book_by_id(book_id))
            .await
    }

    /// Remove entries older than the TTL; returns how many were removed
    pub fn sweep(&self) -> usize {
        self.store.sweep()
    }

    /// Drop every entry
    pub fn clear_cache(&self) {
        self.store.clear();
    }

    /// Whether an entry (fresh or stale) exists for `book_id`
    pub fn contains(&self, book_id: &str) -> bool {
        self.store.contains(&book_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.store.ttl()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Start the periodic sweep on the current tokio runtime
    pub fn spawn_sweeper(&self) -> SweeperHandle {
        sweeper::spawn(
            CacheKind::Book,
            Arc::downgrade(&self.store),
            self.config.sweep_interval,
        )
    }
}
