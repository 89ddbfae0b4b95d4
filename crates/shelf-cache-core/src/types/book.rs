//! Aggregated book record

use serde::{Deserialize, Serialize};

/// Cover image size variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    /// Size suffix used by the covers service
    pub fn suffix(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Cover image URLs derived from one numeric cover identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverUrls {
    pub small: String,
    pub medium: String,
    pub large: String,
}

impl CoverUrls {
    /// Build the three URLs as `{base}/b/id/{cover_id}-{S|M|L}.jpg`
    pub fn from_cover_id(base: &str, cover_id: i64) -> Self {
        let base = base.trim_end_matches('/');
        let url = |size: CoverSize| format!("{}/b/id/{}-{}.jpg", base, cover_id, size.suffix());
        Self {
            small: url(CoverSize::Small),
            medium: url(CoverSize::Medium),
            large: url(CoverSize::Large),
        }
    }

    /// Build URLs only when a cover identifier is present
    pub fn from_optional_id(base: &str, cover_id: Option<i64>) -> Option<Self> {
        cover_id.map(|id| Self::from_cover_id(base, id))
    }

    /// URL for one size
    pub fn get(&self, size: CoverSize) -> &str {
        match size {
            CoverSize::Small => &self.small,
            CoverSize::Medium => &self.medium,
            CoverSize::Large => &self.large,
        }
    }
}

/// One fully resolved book, denormalized from the book, work and author lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Bare external identifier (e.g. `OL123456M`)
    pub book_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Author display names; the first is the primary author
    pub authors: Vec<String>,
    pub description: Option<String>,
    /// ISBN-10 values first, then ISBN-13
    pub isbns: Vec<String>,
    /// Free-form publish date as reported upstream
    pub publish_date: Option<String>,
    /// Cover URLs; `None` when the book has no cover
    pub covers: Option<CoverUrls>,
}

impl BookRecord {
    /// The first-listed author
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// URL of one cover size, if the book has a cover
    pub fn cover_url(&self, size: CoverSize) -> Option<&str> {
        self.covers.as_ref().map(|c| c.get(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://covers.openlibrary.org";

    #[test]
    fn test_cover_urls_from_id() {
        let covers = CoverUrls::from_cover_id(BASE, 12345);
        assert_eq!(covers.small, "https://covers.openlibrary.org/b/id/12345-S.jpg");
        assert_eq!(covers.medium, "https://covers.openlibrary.org/b/id/12345-M.jpg");
        assert_eq!(covers.large, "https://covers.openlibrary.org/b/id/12345-L.jpg");
    }

    #[test]
    fn test_cover_urls_trailing_slash_base() {
        let covers = CoverUrls::from_cover_id("http://localhost:8080/", 7);
        assert_eq!(covers.small, "http://localhost:8080/b/id/7-S.jpg");
    }

    #[test]
    fn test_absent_cover_id() {
        assert!(CoverUrls::from_optional_id(BASE, None).is_none());
    }

    #[test]
    fn test_record_accessors() {
        let record = BookRecord {
            book_id: "OL1M".to_string(),
            title: "Dune".to_string(),
            subtitle: None,
            authors: vec!["Frank Herbert".to_string(), "Someone Else".to_string()],
            description: None,
            isbns: vec![],
            publish_date: Some("1965".to_string()),
            covers: CoverUrls::from_optional_id(BASE, Some(9)),
        };

        assert_eq!(record.primary_author(), Some("Frank Herbert"));
        assert_eq!(
            record.cover_url(CoverSize::Large),
            Some("https://covers.openlibrary.org/b/id/9-L.jpg")
        );
    }
}
