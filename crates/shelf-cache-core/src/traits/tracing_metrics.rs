use crate::{CacheKind, CacheMetrics, CatalogError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Metrics adapter that logs events via `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingMetrics {
    /// Service name/prefix (optional)
    service_name: Option<String>,
}

impl TracingMetrics {
    /// Create new tracing metrics adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with service name prefix
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

impl CacheMetrics for TracingMetrics {
    fn record_hit(&self, cache: CacheKind, key: &str) {
        debug!(
            target: "shelf_cache",
            event = "hit",
            cache = cache.as_str(),
            key = %key,
            service = ?self.service_name,
            "Cache Hit"
        );
    }

    fn record_miss(&self, cache: CacheKind, key: &str) {
        debug!(
            target: "shelf_cache",
            event = "miss",
            cache = cache.as_str(),
            key = %key,
            service = ?self.service_name,
            "Cache Miss"
        );
    }

    fn record_expired(&self, cache: CacheKind, key: &str) {
        debug!(
            target: "shelf_cache",
            event = "expired",
            cache = cache.as_str(),
            key = %key,
            service = ?self.service_name,
            "Cache Entry Expired"
        );
    }

    fn record_fetch(&self, cache: CacheKind, duration: Duration) {
        tracing::trace!(
            target: "shelf_cache",
            event = "fetch",
            cache = cache.as_str(),
            duration_ms = duration.as_millis(),
            service = ?self.service_name,
            "Upstream Fetch Latency"
        );
    }

    fn record_fetch_failure(&self, cache: CacheKind, error: &CatalogError) {
        warn!(
            target: "shelf_cache",
            event = "fetch_failure",
            cache = cache.as_str(),
            error = %error,
            service = ?self.service_name,
            "Upstream Fetch Failed"
        );
    }

    fn record_sweep(&self, cache: CacheKind, removed: usize, remaining: usize) {
        if removed > 0 {
            info!(
                target: "shelf_cache",
                event = "sweep",
                cache = cache.as_str(),
                removed,
                remaining,
                service = ?self.service_name,
                "Cache Sweep Removed Expired Entries"
            );
        } else {
            debug!(
                target: "shelf_cache",
                event = "sweep",
                cache = cache.as_str(),
                remaining,
                service = ?self.service_name,
                "Cache Sweep Found Nothing To Remove"
            );
        }
    }
}
