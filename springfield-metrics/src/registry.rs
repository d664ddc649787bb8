//! Metric registration helpers

use prometheus::{CounterVec, Opts, Registry};

/// Register a counter with labels in the default registry
///
/// # Examples
///
/// ```
/// use springfield_metrics::*;
///
/// let counter = register_counter_vec(
///     "doc_redirects_total",
///     "Redirects issued",
///     &["from_locale", "to_locale"],
/// ).unwrap();
///
/// counter.with_label_values(&["none", "en-US"]).inc();
/// ```
pub fn register_counter_vec(
    name: &str,
    help: &str,
    label_names: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    register_counter_vec_in(crate::default_registry(), name, help, label_names)
}

/// Register a counter with labels in a specific registry
pub fn register_counter_vec_in(
    registry: &Registry,
    name: &str,
    help: &str,
    label_names: &[&str],
) -> Result<CounterVec, prometheus::Error> {
    let counter = CounterVec::new(Opts::new(name, help), label_names)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

/// Convert a dotted metric name into Prometheus form.
///
/// `locale.redirect` becomes `locale_redirect_total`.
pub fn prometheus_counter_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == ':' { c } else { '_' })
        .collect();

    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    if !sanitized.ends_with("_total") {
        sanitized.push_str("_total");
    }
    sanitized
}
