//! shelf-cache-core: Core traits and types for the shelf-cache library
//!
//! This crate provides the book domain types, the error taxonomy and the
//! seams (`CatalogSource`, `Clock`, `CacheMetrics`) shared by the upstream
//! client and the caches.

mod error;
mod traits;
mod types;

pub use error::{BoxError, CatalogError, Result, Stage};
pub use traits::*;
pub use types::*;
