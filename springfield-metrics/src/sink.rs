//! Counter sinks
//!
//! The locale pipeline reports events through [`MetricsSink`] so that the
//! backend (Prometheus in production, [`MetricsMock`](crate::MetricsMock) in
//! tests) stays a deployment decision.

use crate::registry::{prometheus_counter_name, register_counter_vec_in};
use crate::{MetricsError, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus::{CounterVec, Registry};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A `key:value` metric tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricTag {
    pub key: String,
    pub value: String,
}

impl MetricTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse the `key:value` form. The value may itself contain colons.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once(':') {
            Some((key, value)) if !key.is_empty() => Ok(Self::new(key, value)),
            _ => Err(MetricsError::InvalidTag(raw.to_string())),
        }
    }
}

impl fmt::Display for MetricTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Counter primitive with labels.
///
/// Implementations must be safe to call from many request threads at once;
/// each call is one atomic increment.
pub trait MetricsSink: Send + Sync {
    fn incr(&self, name: &str, tags: &[MetricTag]);
}

/// Sink that drops every increment
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn incr(&self, _name: &str, _tags: &[MetricTag]) {}
}

struct RegisteredCounter {
    labels: Vec<String>,
    counter: CounterVec,
}

type CounterTable = Arc<RwLock<HashMap<String, RegisteredCounter>>>;

/// Counters registered in the default registry, shared by every sink over it
static DEFAULT_COUNTERS: Lazy<CounterTable> = Lazy::new(CounterTable::default);

/// Prometheus-backed sink.
///
/// One `CounterVec` is registered lazily per metric name; its label names are
/// the tag keys of the first increment. Sinks created with [`new`](Self::new)
/// share one counter table, so any number of them report into the default
/// registry. Clone a [`with_registry`](Self::with_registry) sink to share a
/// private registry.
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    counters: CounterTable,
}

impl PrometheusSink {
    /// Sink over the crate-wide default registry
    pub fn new() -> Self {
        Self {
            registry: crate::default_registry().clone(),
            counters: Arc::clone(&DEFAULT_COUNTERS),
        }
    }

    /// Sink owning the counters it registers in `registry`
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            counters: CounterTable::default(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Increment, reporting registration and label errors to the caller
    pub fn try_incr(&self, name: &str, tags: &[MetricTag]) -> Result<()> {
        let keys: Vec<String> = tags.iter().map(|t| t.key.clone()).collect();
        let values: Vec<&str> = tags.iter().map(|t| t.value.as_str()).collect();

        if let Some(registered) = self.counters.read().get(name) {
            return Self::increment(name, registered, &keys, &values);
        }

        let mut counters = self.counters.write();
        // Another thread may have registered it between the two locks
        if !counters.contains_key(name) {
            let label_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            let counter = register_counter_vec_in(
                &self.registry,
                &prometheus_counter_name(name),
                &format!("Count of {} events", name),
                &label_refs,
            )?;
            counters.insert(
                name.to_string(),
                RegisteredCounter {
                    labels: keys.clone(),
                    counter,
                },
            );
        }

        match counters.get(name) {
            Some(registered) => Self::increment(name, registered, &keys, &values),
            None => Ok(()),
        }
    }

    /// Current value of a counter, mainly for diagnostics and tests
    pub fn value(&self, name: &str, tags: &[MetricTag]) -> Option<f64> {
        let counters = self.counters.read();
        let registered = counters.get(name)?;
        let values: Vec<&str> = tags.iter().map(|t| t.value.as_str()).collect();
        registered
            .counter
            .get_metric_with_label_values(values.as_slice())
            .ok()
            .map(|c| c.get())
    }

    fn increment(
        name: &str,
        registered: &RegisteredCounter,
        keys: &[String],
        values: &[&str],
    ) -> Result<()> {
        if registered.labels != keys {
            return Err(MetricsError::LabelMismatch {
                name: name.to_string(),
                expected: registered.labels.clone(),
                actual: keys.to_vec(),
            });
        }
        registered.counter.get_metric_with_label_values(values)?.inc();
        Ok(())
    }
}

impl Default for PrometheusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for PrometheusSink {
    fn incr(&self, name: &str, tags: &[MetricTag]) {
        if let Err(e) = self.try_incr(name, tags) {
            tracing::warn!(metric = name, error = %e, "failed to record metric");
        }
    }
}
