//! Upstream catalog trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::{BookRecord, Result, SearchResultPage};

/// Upstream bibliographic source the caches read through
///
/// Implementations are stateless and shared freely across tasks. The
/// Open Library client is the production implementation; tests plug in
/// call-counting mocks.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Resolve a fully aggregated book by its bare identifier
    ///
    /// Returns `Ok(None)` when the upstream does not know the identifier.
    async fn fetch_book_by_id(&self, book_id: &str) -> Result<Option<BookRecord>>;

    /// Resolve a fully aggregated book by ISBN-10 or ISBN-13
    async fn fetch_book_by_isbn(&self, isbn: &str) -> Result<Option<BookRecord>>;

    /// Run a paginated keyword search, resolving every result item
    async fn search(&self, keywords: &str, offset: u32, limit: u32) -> Result<SearchResultPage>;
}

#[async_trait]
impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    async fn fetch_book_by_id(&self, book_id: &str) -> Result<Option<BookRecord>> {
        (**self).fetch_book_by_id(book_id).await
    }

    async fn fetch_book_by_isbn(&self, isbn: &str) -> Result<Option<BookRecord>> {
        (**self).fetch_book_by_isbn(isbn).await
    }

    async fn search(&self, keywords: &str, offset: u32, limit: u32) -> Result<SearchResultPage> {
        (**self).search(keywords, offset, limit).await
    }
}
