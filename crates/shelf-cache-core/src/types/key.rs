//! Search cache key

use std::fmt;

/// Delimiter the upstream search endpoint expects between keywords
pub const KEYWORD_DELIMITER: char = '+';

/// Trim keywords and collapse every interior whitespace run into one delimiter
pub fn normalize_keywords(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(KEYWORD_DELIMITER);
        }
        normalized.push_str(word);
    }
    normalized
}

/// Composite key for cached search pages
///
/// Compared by value: identical keywords, offset and limit address the
/// same cache slot. Keywords are normalized on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    keywords: String,
    offset: u32,
    limit: u32,
}

impl SearchKey {
    /// Create a key from raw keywords and pagination
    pub fn new(keywords: &str, offset: u32, limit: u32) -> Self {
        Self {
            keywords: normalize_keywords(keywords),
            offset,
            limit,
        }
    }

    /// Normalized keywords
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.keywords, self.offset, self.limit)
    }
}
