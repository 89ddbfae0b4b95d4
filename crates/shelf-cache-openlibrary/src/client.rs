//! Aggregating Open Library client

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use shelf_cache_core::{
    BookRecord, CatalogError, CatalogSource, CoverUrls, Result, SearchResultPage, Stage,
    normalize_keywords,
};

use crate::config::OpenLibraryConfig;
use crate::wire::{
    AuthorResponse, BookResponse, EditionsResponse, SearchDoc, SearchResponse, WorkResponse,
    bare_key,
};

/// Stateless client that turns Open Library identifiers into [`BookRecord`]s
///
/// A single book lookup is a chain of dependent requests: the book itself,
/// then its work (description and author references), then one request per
/// author. The requests run sequentially because each hop needs identifiers
/// from the previous response. Any failing hop aborts the whole lookup.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: reqwest::Client,
    base_url: String,
    covers_base_url: String,
}

impl OpenLibraryClient {
    /// Create a client from configuration
    pub fn new(config: OpenLibraryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Configuration(e.to_string()))?;

        info!(base_url = %config.base_url, "Creating Open Library client");

        Ok(Self::with_http_client(http, config))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, config: OpenLibraryConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            covers_base_url: config.covers_base_url,
        }
    }

    /// Create a client with default configuration against openlibrary.org
    pub fn with_defaults() -> Result<Self> {
        Self::new(OpenLibraryConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and decode the JSON body
    ///
    /// `Ok(None)` means the upstream answered 404; callers decide whether
    /// that is "not found" or an unexpected status for their stage.
    async fn get_json<T>(&self, stage: Stage, path: &str, query: &[(&str, String)]) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(stage = %stage, url = %url, "Requesting Open Library");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(stage = %stage, path, error = %e, "Open Library request failed");
                CatalogError::connectivity(stage, path, e)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(stage = %stage, path, status = status.as_u16(), "Unexpected Open Library status");
            return Err(CatalogError::unexpected_status(stage, path, status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(stage = %stage, path, error = %e, "Reading Open Library response failed");
            CatalogError::connectivity(stage, path, e)
        })?;

        match serde_json::from_slice::<T>(&body) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                warn!(
                    stage = %stage,
                    path,
                    status = status.as_u16(),
                    error = %e,
                    "Open Library response body missing or unparseable"
                );
                Err(CatalogError::unexpected_status(stage, path, status.as_u16()))
            }
        }
    }

    /// Like `get_json`, but a 404 is an unexpected status
    async fn get_required<T>(&self, stage: Stage, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_json(stage, path, &[]).await?.ok_or_else(|| {
            warn!(stage = %stage, path, "Open Library returned 404 for a required resource");
            CatalogError::unexpected_status(stage, path, StatusCode::NOT_FOUND.as_u16())
        })
    }

    async fn fetch_work(&self, work_id: &str) -> Result<WorkResponse> {
        info!(work_id, "Fetching work");
        self.get_required(Stage::Work, &format!("/works/{work_id}.json"))
            .await
    }

    /// Display name of an author; a nameless author fails the lookup
    async fn fetch_author_name(&self, author_id: &str) -> Result<String> {
        info!(author_id, "Fetching author");
        let path = format!("/authors/{author_id}.json");
        let author: AuthorResponse = self.get_required(Stage::Author, &path).await?;

        author
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                warn!(author_id, "Author response carries no name");
                CatalogError::unexpected_status(Stage::Author, path, StatusCode::OK.as_u16())
            })
    }

    /// First edition of a work with a usable key; `None` when the work has
    /// no editions or is unknown
    async fn fetch_first_edition(&self, work_id: &str) -> Result<Option<String>> {
        info!(work_id, "Fetching editions for work");
        let path = format!("/works/{work_id}/editions.json");
        let editions: Option<EditionsResponse> = self.get_json(Stage::Editions, &path, &[]).await?;
        Ok(editions.and_then(|e| e.first_edition_id().map(str::to_string)))
    }

    /// Turn a book response into a record by resolving its work and authors
    async fn aggregate(&self, requested_id: &str, book: BookResponse) -> Result<BookRecord> {
        let work = match book.works.first().and_then(|w| w.bare()) {
            Some(work_id) => self.fetch_work(work_id).await?,
            None => {
                debug!(book_id = requested_id, "Book has no work reference");
                WorkResponse::default()
            }
        };

        let author_ids = match book.author_ids() {
            ids if !ids.is_empty() => ids,
            _ => work.author_ids(),
        };

        let mut authors = Vec::with_capacity(author_ids.len());
        for author_id in &author_ids {
            authors.push(self.fetch_author_name(author_id).await?);
        }

        let book_id = book
            .key
            .as_deref()
            .map(bare_key)
            .filter(|key| !key.is_empty())
            .unwrap_or(requested_id)
            .to_string();

        Ok(BookRecord {
            book_id,
            isbns: book.isbns(),
            covers: CoverUrls::from_optional_id(&self.covers_base_url, book.cover_id()),
            title: book.title,
            subtitle: book.subtitle,
            authors,
            description: work.description.and_then(|d| d.value),
            publish_date: book.publish_date,
        })
    }

    /// Pick the edition a search doc should resolve to
    ///
    /// Uses the doc's cover edition, falling back to the first keyed edition
    /// of its work.
    async fn edition_for_doc(&self, doc: &SearchDoc) -> Result<Option<String>> {
        if let Some(edition) = doc.cover_edition_id() {
            return Ok(Some(edition.to_string()));
        }

        let Some(work_id) = doc.work_id() else {
            return Ok(None);
        };

        let edition = self.fetch_first_edition(work_id).await?;
        if let Some(edition) = &edition {
            debug!(work_id, edition = %edition, "Fallback edition used");
        }
        Ok(edition)
    }
}

#[async_trait]
impl CatalogSource for OpenLibraryClient {
    async fn fetch_book_by_id(&self, book_id: &str) -> Result<Option<BookRecord>> {
        info!(book_id, "Fetching book by ID");
        let path = format!("/books/{book_id}.json");

        let Some(book) = self.get_json::<BookResponse>(Stage::Book, &path, &[]).await? else {
            warn!(book_id, "Book not found");
            return Ok(None);
        };

        self.aggregate(book_id, book).await.map(Some)
    }

    async fn fetch_book_by_isbn(&self, isbn: &str) -> Result<Option<BookRecord>> {
        info!(isbn, "Fetching book by ISBN");
        let path = format!("/isbn/{isbn}.json");

        let Some(book) = self.get_json::<BookResponse>(Stage::Isbn, &path, &[]).await? else {
            warn!(isbn, "No book found for ISBN");
            return Ok(None);
        };

        let Some(book_id) = book.key.as_deref().map(bare_key).filter(|k| !k.is_empty()) else {
            warn!(isbn, "ISBN response carries no book key");
            return Err(CatalogError::unexpected_status(
                Stage::Isbn,
                path,
                StatusCode::OK.as_u16(),
            ));
        };

        self.fetch_book_by_id(book_id).await
    }

    async fn search(&self, keywords: &str, offset: u32, limit: u32) -> Result<SearchResultPage> {
        info!(keywords, offset, limit, "Searching Open Library");
        let query = [
            ("q", normalize_keywords(keywords)),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];

        let response: SearchResponse = self
            .get_json(Stage::Search, "/search.json", &query)
            .await?
            .ok_or_else(|| {
                CatalogError::unexpected_status(
                    Stage::Search,
                    "/search.json",
                    StatusCode::NOT_FOUND.as_u16(),
                )
            })?;

        let mut books = Vec::with_capacity(response.docs.len());
        let mut skipped_books = 0u32;

        for doc in &response.docs {
            let title = doc.title.as_deref().unwrap_or_default();

            let Some(edition) = self.edition_for_doc(doc).await? else {
                warn!(work = ?doc.work_id(), title, "Skipping work: no cover edition or fallback edition");
                skipped_books += 1;
                continue;
            };

            match self.fetch_book_by_id(&edition).await? {
                Some(book) => books.push(book),
                None => {
                    warn!(edition = %edition, title, "Skipping work: edition not found");
                    skipped_books += 1;
                }
            }
        }

        debug!(
            returned = books.len(),
            skipped = skipped_books,
            "Search resolved"
        );

        Ok(SearchResultPage {
            num_results: response.num_found,
            start_index: response.start.unwrap_or(offset),
            books,
            skipped_books,
        })
    }
}
