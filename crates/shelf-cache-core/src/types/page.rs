//! Search result page

use serde::{Deserialize, Serialize};

use super::book::BookRecord;

/// One page of resolved keyword search results
///
/// `books.len() + skipped_books` equals the number of items the upstream
/// returned for this page. `num_results` is the full, unpaginated match
/// count and is usually larger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    /// Total matches reported upstream
    pub num_results: u64,
    /// Offset of the first item on this page
    pub start_index: u32,
    /// Successfully resolved books, in upstream order
    pub books: Vec<BookRecord>,
    /// Items dropped because no resolvable edition existed
    pub skipped_books: u32,
}

impl SearchResultPage {
    /// An empty page at `start_index`
    pub fn empty(start_index: u32) -> Self {
        Self {
            num_results: 0,
            start_index,
            books: Vec::new(),
            skipped_books: 0,
        }
    }

    /// Number of items the upstream returned for this page
    pub fn returned_items(&self) -> usize {
        self.books.len() + self.skipped_books as usize
    }
}
