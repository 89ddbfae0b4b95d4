//! Open Library response shapes
//!
//! Only the fields the aggregation reads are modelled; everything else in
//! the upstream JSON is ignored.

use serde::Deserialize;
use serde_json::Value;

const KEY_PREFIXES: [&str; 3] = ["/books/", "/works/", "/authors/"];

/// Strip the path-style prefix (`/books/`, `/works/`, `/authors/`) from an
/// upstream key, leaving the bare identifier
///
/// Keys without a known prefix are returned unchanged.
pub fn bare_key(key: &str) -> &str {
    KEY_PREFIXES
        .iter()
        .find_map(|prefix| key.strip_prefix(prefix))
        .unwrap_or(key)
}

/// `{ "key": "/works/OL1W" }`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KeyRef {
    #[serde(default)]
    pub key: Option<String>,
}

impl KeyRef {
    pub fn bare(&self) -> Option<&str> {
        self.key
            .as_deref()
            .map(bare_key)
            .filter(|key| !key.is_empty())
    }
}

/// `GET /search.json`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    /// Offset echoed by the upstream; absent in some responses
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// One work in a search response
#[derive(Debug, Deserialize)]
pub(crate) struct SearchDoc {
    /// Work key (e.g. `/works/OL1W`)
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover_edition_key: Option<String>,
}

impl SearchDoc {
    pub fn work_id(&self) -> Option<&str> {
        self.key
            .as_deref()
            .map(bare_key)
            .filter(|key| !key.is_empty())
    }

    pub fn cover_edition_id(&self) -> Option<&str> {
        self.cover_edition_key
            .as_deref()
            .map(bare_key)
            .filter(|key| !key.is_empty())
    }
}

/// `GET /books/{id}.json` and `GET /isbn/{isbn}.json`
#[derive(Debug, Deserialize)]
pub(crate) struct BookResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub covers: Vec<i64>,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub isbn_10: Vec<String>,
    #[serde(default)]
    pub isbn_13: Vec<String>,
    #[serde(default)]
    pub works: Vec<KeyRef>,
    #[serde(default)]
    pub authors: Vec<KeyRef>,
}

impl BookResponse {
    /// First usable cover identifier; Open Library uses `-1` for "no cover"
    pub fn cover_id(&self) -> Option<i64> {
        self.covers
            .iter()
            .copied()
            .find(|id| *id > 0)
            .or(self.cover_i.filter(|id| *id > 0))
    }

    /// ISBN-10 values followed by ISBN-13 values
    pub fn isbns(&self) -> Vec<String> {
        self.isbn_10
            .iter()
            .chain(self.isbn_13.iter())
            .cloned()
            .collect()
    }

    pub fn author_ids(&self) -> Vec<String> {
        self.authors
            .iter()
            .filter_map(KeyRef::bare)
            .map(str::to_string)
            .collect()
    }
}

/// `GET /works/{id}.json`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkResponse {
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub authors: Vec<WorkAuthor>,
}

impl WorkResponse {
    pub fn author_ids(&self) -> Vec<String> {
        self.authors
            .iter()
            .filter_map(|a| a.author.as_ref().and_then(KeyRef::bare))
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkAuthor {
    #[serde(default)]
    pub author: Option<KeyRef>,
}

/// `GET /authors/{id}.json`
#[derive(Debug, Deserialize)]
pub(crate) struct AuthorResponse {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /works/{id}/editions.json`
#[derive(Debug, Deserialize)]
pub(crate) struct EditionsResponse {
    #[serde(default)]
    pub entries: Vec<KeyRef>,
}

impl EditionsResponse {
    /// First edition carrying a usable key
    pub fn first_edition_id(&self) -> Option<&str> {
        self.entries.iter().find_map(KeyRef::bare)
    }
}

/// Work description, normalized from either a bare string or a
/// `{ "value": ..., "type": ... }` object
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawDescription")]
pub struct Description {
    pub value: Option<String>,
    pub kind: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDescription {
    Text(String),
    Object {
        #[serde(default)]
        value: Option<Value>,
        #[serde(rename = "type", default)]
        kind: Option<Value>,
    },
    Other(Value),
}

fn text_of(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

impl From<RawDescription> for Description {
    fn from(raw: RawDescription) -> Self {
        match raw {
            RawDescription::Text(text) => Description {
                value: Some(text),
                kind: None,
            },
            RawDescription::Object { value, kind } => Description {
                value: text_of(value),
                kind: text_of(kind),
            },
            RawDescription::Other(_) => Description::default(),
        }
    }
}
