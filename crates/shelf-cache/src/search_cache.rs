//! Search page TTL cache

use std::sync::Arc;
use std::time::Duration;

use shelf_cache_core::{
    CacheKind, CacheMetrics, CacheStats, CatalogSource, Clock, NoopMetrics, Result, SearchKey,
    SearchResultPage, SystemClock,
};

use crate::config::CacheConfig;
use crate::store::TtlStore;
use crate::sweeper::{self, SweeperHandle};

/// Memoizing cache in front of [`CatalogSource::search`]
///
/// Keyed by [`SearchKey`], so `"dune "` and `"dune"` share one slot while
/// a different offset or limit is a different page. Whole pages are cached;
/// books resolved for a page do not populate the book cache.
pub struct SearchCache<S, M = NoopMetrics> {
    source: Arc<S>,
    store: Arc<TtlStore<SearchKey, SearchResultPage, M>>,
    config: CacheConfig,
}

impl<S, M> Clone for SearchCache<S, M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: CatalogSource> SearchCache<S, NoopMetrics> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, CacheConfig::default())
    }

    pub fn with_config(source: S, config: CacheConfig) -> Self {
        Self::with_clock_and_metrics(
            Arc::new(source),
            config,
            Arc::new(SystemClock),
            Arc::new(NoopMetrics),
        )
    }
}

impl<S, M> SearchCache<S, M>
where
    S: CatalogSource,
    M: CacheMetrics,
{
    pub fn with_clock_and_metrics(
        source: Arc<S>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
        metrics: Arc<M>,
    ) -> Self {
        Self {
            source,
            store: Arc::new(TtlStore::new(CacheKind::Search, config.ttl, clock, metrics)),
            config,
        }
    }

    /// Run a keyword search, serving a fresh cached page when there is one
    pub async fn search(&self, keywords: &str, offset: u32, limit: u32) -> Result<SearchResultPage> {
        let key = SearchKey::new(keywords, offset, limit);
        let source = &self.source;
        let normalized = key.keywords().to_string();

        self.store
            .get_or_fetch(key, || async move {
                source.search(&normalized, offset, limit).await
            })
            .await
    }

    pub fn sweep(&self) -> usize {
        self.store.sweep()
    }

    pub fn clear_cache(&self) {
        self.store.clear();
    }

    pub fn contains(&self, keywords: &str, offset: u32, limit: u32) -> bool {
        self.store.contains(&SearchKey::new(keywords, offset, limit))
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

    pub fn spawn_sweeper(&self) -> SweeperHandle {
        sweeper::spawn(
            CacheKind::Search,
            Arc::downgrade(&self.store),
            self.config.sweep_interval,
        )
    }
}
