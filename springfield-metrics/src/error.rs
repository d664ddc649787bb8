//! Metrics errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or label mismatch reported by the Prometheus client
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// Tags must be written as `key:value`
    #[error("Invalid metric tag: {0:?}")]
    InvalidTag(String),

    /// The same metric name was used with a different set of tag keys
    #[error("Metric {name} registered with labels {expected:?}, got {actual:?}")]
    LabelMismatch {
        name: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, MetricsError>;
