//! Core types for catalog caching

mod book;
mod entry;
mod key;
mod page;
mod result;
mod stats;

pub use book::{BookRecord, CoverSize, CoverUrls};
pub use entry::CacheEntry;
pub use key::{KEYWORD_DELIMITER, SearchKey, normalize_keywords};
pub use page::SearchResultPage;
pub use result::CacheLookup;
pub use stats::CacheStats;
