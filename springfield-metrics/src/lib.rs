//! Counters for Springfield
//!
//! Request handling code increments counters through the [`MetricsSink`]
//! trait. Production wires in a [`PrometheusSink`], tests use
//! [`MetricsMock`] and assert on what was recorded.
//!
//! ```
//! use springfield_metrics::*;
//!
//! let sink = PrometheusSink::with_registry(prometheus::Registry::new());
//! sink.incr(
//!     REDIRECT_METRIC,
//!     &[MetricTag::new("from_locale", "none"), MetricTag::new("to_locale", "en-US")],
//! );
//!
//! let text = export_metrics_from_registry(sink.registry());
//! assert!(text.contains("locale_redirect_total"));
//! ```

pub mod error;
pub mod mock;
pub mod registry;
pub mod sink;

pub use error::{MetricsError, Result};
pub use mock::{MetricsMock, RecordedIncr};
pub use prometheus;
pub use registry::*;
pub use sink::{MetricTag, MetricsSink, NoopSink, PrometheusSink};

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Counter incremented once for every locale redirect issued
pub const REDIRECT_METRIC: &str = "locale.redirect";

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Process-wide registry used by [`PrometheusSink::new`]
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Export the default registry in Prometheus text format
pub fn export_metrics() -> String {
    export_metrics_from_registry(&DEFAULT_REGISTRY)
}

/// Export a specific registry in Prometheus text format
pub fn export_metrics_from_registry(registry: &Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|_| String::from("# Error converting metrics to UTF-8\n"))
}
