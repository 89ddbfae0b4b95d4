//! shelf-cache: TTL caches in front of the Open Library catalog
//!
//! # Features
//!
//! - **Book cache** keyed by Open Library edition identifier
//! - **Search cache** keyed by normalized keywords and pagination
//! - **Negative caching** of "not found"; upstream failures are never cached
//! - **Background sweeping** of expired entries
//! - **Layered settings** from file and environment
//! - **Metrics integration** (`tracing` events, optional `metrics` crate)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shelf_cache::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load()?;
//!     let catalog = Catalog::from_settings(&settings)?;
//!     let _sweepers = catalog.spawn_sweepers();
//!
//!     match catalog.get_by_id("OL7353617M").await? {
//!         Some(book) => println!("Got: {}", book.title),
//!         None => println!("No such book"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod book_cache;
mod catalog;
mod config;
mod search_cache;
mod store;
mod sweeper;

// Re-export core
pub use shelf_cache_core::*;

// Re-export the upstream client
pub use shelf_cache_openlibrary::{OpenLibraryClient, OpenLibraryConfig};

pub use book_cache::BookCache;
pub use catalog::Catalog;
pub use self::config::{CacheConfig, DEFAULT_SETTINGS_BASENAME, ENV_PREFIX, Settings, SettingsError};
pub use search_cache::SearchCache;
pub use sweeper::SweeperHandle;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BookCache, BookRecord, CacheConfig, CacheStats, Catalog, CatalogError, CatalogSource,
        OpenLibraryClient, OpenLibraryConfig, Result, SearchCache, SearchResultPage, Settings,
        SettingsError, SweeperHandle, TracingMetrics,
    };
}
