//! shelf-cache-openlibrary: Open Library aggregation client
//!
//! Resolves book identifiers into fully denormalized [`BookRecord`]s by
//! chaining the book, work, author and editions endpoints, and runs
//! paginated keyword searches with a fallback-edition policy.
//!
//! [`BookRecord`]: shelf_cache_core::BookRecord

mod client;
mod config;
mod wire;

pub use client::OpenLibraryClient;
pub use config::OpenLibraryConfig;
pub use wire::{Description, bare_key};
