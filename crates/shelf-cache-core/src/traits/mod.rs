//! Core traits for catalog caching

mod clock;
mod metrics;
mod source;
mod tracing_metrics;

pub use clock::{Clock, ManualClock, SystemClock};
pub use self::metrics::{CacheKind, CacheMetrics, NoopMetrics};
pub use source::CatalogSource;
pub use tracing_metrics::TracingMetrics;

#[cfg(feature = "metrics")]
pub use self::metrics::MetricsCrateAdapter;
