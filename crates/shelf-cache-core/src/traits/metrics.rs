//! Metrics trait for cache observability

use std::time::Duration;

use crate::CatalogError;

/// Which cache an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Single-book cache keyed by book identifier
    Book,
    /// Search page cache keyed by keywords and pagination
    Search,
}

impl CacheKind {
    /// Get kind as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::Book => "book",
            CacheKind::Search => "search",
        }
    }
}

/// Trait for cache metrics/observability
///
/// Implement this to integrate with your metrics system (Prometheus, StatsD, etc.)
pub trait CacheMetrics: Send + Sync + 'static {
    /// Record a fresh hit
    fn record_hit(&self, cache: CacheKind, key: &str);

    /// Record a miss (absent key)
    fn record_miss(&self, cache: CacheKind, key: &str);

    /// Record a lookup that found only a stale entry
    fn record_expired(&self, cache: CacheKind, key: &str);

    /// Record how long an upstream fetch took
    fn record_fetch(&self, cache: CacheKind, duration: Duration);

    /// Record an upstream failure (never cached)
    fn record_fetch_failure(&self, cache: CacheKind, error: &CatalogError);

    /// Record the outcome of one sweep pass
    fn record_sweep(&self, cache: CacheKind, removed: usize, remaining: usize);
}

/// No-op metrics implementation (default)
///
/// Zero overhead when metrics are not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {
    #[inline]
    fn record_hit(&self, _cache: CacheKind, _key: &str) {}

    #[inline]
    fn record_miss(&self, _cache: CacheKind, _key: &str) {}

    #[inline]
    fn record_expired(&self, _cache: CacheKind, _key: &str) {}

    #[inline]
    fn record_fetch(&self, _cache: CacheKind, _duration: Duration) {}

    #[inline]
    fn record_fetch_failure(&self, _cache: CacheKind, _error: &CatalogError) {}

    #[inline]
    fn record_sweep(&self, _cache: CacheKind, _removed: usize, _remaining: usize) {}
}

/// Metrics adapter using the `metrics` crate
///
/// Integrates with Prometheus, StatsD, and other exporters via the `metrics` ecosystem.
///
/// # Example
/// ```ignore
/// use shelf_cache_core::MetricsCrateAdapter;
///
/// // Set up a metrics recorder (e.g., prometheus_exporter)
/// // metrics::set_global_recorder(recorder);
///
/// let metrics = MetricsCrateAdapter::new("shelf_cache");
/// // Emits: shelf_cache_hits_total{cache="book"}, shelf_cache_swept_total, etc.
/// ```
#[cfg(feature = "metrics")]
#[derive(Debug, Clone)]
pub struct MetricsCrateAdapter {
    prefix: String,
}

#[cfg(feature = "metrics")]
impl MetricsCrateAdapter {
    /// Create a new adapter with the given metric name prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn metric_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

#[cfg(feature = "metrics")]
impl CacheMetrics for MetricsCrateAdapter {
    fn record_hit(&self, cache: CacheKind, _key: &str) {
        metrics::counter!(self.metric_name("hits_total"), "cache" => cache.as_str()).increment(1);
    }

    fn record_miss(&self, cache: CacheKind, _key: &str) {
        metrics::counter!(self.metric_name("misses_total"), "cache" => cache.as_str())
            .increment(1);
    }

    fn record_expired(&self, cache: CacheKind, _key: &str) {
        metrics::counter!(self.metric_name("expired_total"), "cache" => cache.as_str())
            .increment(1);
    }

    fn record_fetch(&self, cache: CacheKind, duration: Duration) {
        metrics::histogram!(
            self.metric_name("fetch_duration_seconds"),
            "cache" => cache.as_str()
        )
        .record(duration.as_secs_f64());
    }

    fn record_fetch_failure(&self, cache: CacheKind, error: &CatalogError) {
        let stage = error.stage().map(|s| s.as_str()).unwrap_or("none");
        metrics::counter!(
            self.metric_name("fetch_failures_total"),
            "cache" => cache.as_str(),
            "stage" => stage
        )
        .increment(1);
    }

    fn record_sweep(&self, cache: CacheKind, removed: usize, remaining: usize) {
        metrics::counter!(self.metric_name("swept_total"), "cache" => cache.as_str())
            .increment(removed as u64);
        metrics::gauge!(self.metric_name("entries"), "cache" => cache.as_str())
            .set(remaining as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stage;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(CacheKind::Book.as_str(), "book");
        assert_eq!(CacheKind::Search.as_str(), "search");
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoopMetrics;
        // Just verify these don't panic
        metrics.record_hit(CacheKind::Book, "OL1M");
        metrics.record_miss(CacheKind::Search, "dune:0:10");
        metrics.record_fetch(CacheKind::Book, Duration::from_millis(1));
        metrics.record_fetch_failure(
            CacheKind::Book,
            &CatalogError::unexpected_status(Stage::Book, "/books/OL1M.json", 502),
        );
        metrics.record_sweep(CacheKind::Search, 3, 7);
    }
}
