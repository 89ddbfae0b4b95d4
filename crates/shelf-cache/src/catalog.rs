//! Catalog facade over both caches

use std::sync::Arc;

use tracing::{info, warn};

use shelf_cache_core::{
    BookRecord, CacheMetrics, CacheStats, CatalogSource, Clock, NoopMetrics, Result,
    SearchResultPage, SystemClock,
};
use shelf_cache_openlibrary::{OpenLibraryClient, OpenLibraryConfig};

use crate::book_cache::BookCache;
use crate::config::{CacheConfig, Settings};
use crate::search_cache::SearchCache;
use crate::sweeper::SweeperHandle;

/// Book and search caches sharing one source, clock and metrics sink
///
/// ```rust,no_run
/// use shelf_cache::prelude::*;
///
/// # async fn run() -> Result<()> {
/// let catalog = Catalog::open_library(OpenLibraryConfig::default(), CacheConfig::default())?;
/// let _sweepers = catalog.spawn_sweepers();
///
/// let page = catalog.search("dune", 0, 10).await?;
/// for book in &page.books {
///     println!("{} by {:?}", book.title, book.primary_author());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Catalog<S, M = NoopMetrics> {
    source: Arc<S>,
    books: BookCache<S, M>,
    searches: SearchCache<S, M>,
}

impl<S, M> Clone for Catalog<S, M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            books: self.books.clone(),
            searches: self.searches.clone(),
        }
    }
}

impl Catalog<OpenLibraryClient, NoopMetrics> {
    /// Build a catalog backed by Open Library
    pub fn open_library(
        client_config: OpenLibraryConfig,
        cache_config: CacheConfig,
    ) -> Result<Self> {
        let client = OpenLibraryClient::new(client_config)?;
        Ok(Self::with_config(client, cache_config))
    }

    /// Build a catalog backed by Open Library from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::open_library(settings.open_library.clone(), settings.cache.clone())
    }
}

impl<S: CatalogSource> Catalog<S, NoopMetrics> {
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

impl<S, M> Catalog<S, M>
where
    S: CatalogSource,
    M: CacheMetrics,
{
    /// Create a catalog with an explicit time source and metrics sink
    pub fn with_clock_and_metrics(
        source: Arc<S>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
        metrics: Arc<M>,
    ) -> Self {
        let books = BookCache::with_clock_and_metrics(
            Arc::clone(&source),
            config.clone(),
            Arc::clone(&clock),
            Arc::clone(&metrics),
        );
        let searches = SearchCache::with_clock_and_metrics(Arc::clone(&source), config, clock, metrics);

        Self {
            source,
            books,
            searches,
        }
    }

    /// Cached lookup by book identifier
    pub async fn get_by_id(&self, book_id: &str) -> Result<Option<BookRecord>> {
        self.books.get_by_id(book_id).await
    }

    /// Cached keyword search
    pub async fn search(&self, keywords: &str, offset: u32, limit: u32) -> Result<SearchResultPage> {
        self.searches.search(keywords, offset, limit).await
    }

    /// Uncached lookup by ISBN
    pub async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookRecord>> {
        let found = self.source.fetch_book_by_isbn(isbn).await?;
        match &found {
            Some(book) => info!(isbn, book_id = %book.book_id, "Resolved ISBN"),
            None => warn!(isbn, "ISBN not found"),
        }
        Ok(found)
    }

    pub fn books(&self) -> &BookCache<S, M> {
        &self.books
    }

    pub fn searches(&self) -> &SearchCache<S, M> {
        &self.searches
    }

    /// Drop every entry of both caches
    pub fn clear_caches(&self) {
        self.books.clear_cache();
        self.searches.clear_cache();
    }

    /// Sweep both caches now; returns the total number of entries removed
    pub fn sweep(&self) -> usize {
        self.books.sweep() + self.searches.sweep()
    }

    pub fn book_stats(&self) -> CacheStats {
        self.books.stats()
    }

    pub fn search_stats(&self) -> CacheStats {
        self.searches.stats()
    }

    /// Combined statistics of both caches
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.books.stats();
        stats.merge(&self.searches.stats());
        stats
    }

    /// Start the periodic sweep of both caches; dropping a handle stops its task
    pub fn spawn_sweepers(&self) -> [SweeperHandle; 2] {
        [self.books.spawn_sweeper(), self.searches.spawn_sweeper()]
    }
}
