//! Error types for catalog lookups

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Shared, cloneable transport error cause
pub type BoxError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Hop of the upstream lookup chain a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Keyword search
    Search,
    /// Book (edition) lookup by identifier
    Book,
    /// Book lookup by ISBN
    Isbn,
    /// Work lookup
    Work,
    /// Author lookup
    Author,
    /// Work editions listing
    Editions,
}

impl Stage {
    /// Get stage as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Search => "search",
            Stage::Book => "book",
            Stage::Isbn => "isbn",
            Stage::Work => "work",
            Stage::Author => "author",
            Stage::Editions => "editions",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a catalog lookup
///
/// "Not found" is not an error: lookups return `Ok(None)` for it.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Upstream answered, but with a non-success status or an unusable body
    #[error("unexpected status {status} during {stage} lookup of {target}")]
    UnexpectedStatus {
        stage: Stage,
        target: String,
        status: u16,
    },

    /// The request did not complete (connect, timeout, reset, body read)
    #[error("connectivity failure during {stage} lookup of {target}: {source}")]
    Connectivity {
        stage: Stage,
        target: String,
        #[source]
        source: BoxError,
    },

    /// Client could not be constructed
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CatalogError {
    /// Build an `UnexpectedStatus` error
    pub fn unexpected_status(stage: Stage, target: impl Into<String>, status: u16) -> Self {
        CatalogError::UnexpectedStatus {
            stage,
            target: target.into(),
            status,
        }
    }

    /// Build a `Connectivity` error wrapping the transport cause
    pub fn connectivity<E>(stage: Stage, target: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CatalogError::Connectivity {
            stage,
            target: target.into(),
            source: Arc::new(source),
        }
    }

    /// HTTP status carried by an `UnexpectedStatus` error
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stage of the lookup chain that failed
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CatalogError::UnexpectedStatus { stage, .. }
            | CatalogError::Connectivity { stage, .. } => Some(*stage),
            CatalogError::Configuration(_) => None,
        }
    }

    /// Whether this is a transport-level failure
    pub fn is_connectivity(&self) -> bool {
        matches!(self, CatalogError::Connectivity { .. })
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
