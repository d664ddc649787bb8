//! Recording sink for tests
//!
//! ```
//! use springfield_metrics::*;
//!
//! let metrics = MetricsMock::new();
//! metrics.incr("locale.redirect", &[MetricTag::new("to_locale", "fr")]);
//!
//! metrics.assert_incr_once("locale.redirect", &["to_locale:fr"]);
//! metrics.assert_not_incr("locale.other");
//! ```

use crate::{MetricTag, MetricsSink};
use parking_lot::Mutex;

/// One recorded increment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedIncr {
    pub name: String,
    /// Tags in `key:value` form, in emission order
    pub tags: Vec<String>,
}

/// In-memory [`MetricsSink`] that remembers every increment
#[derive(Debug, Default)]
pub struct MetricsMock {
    records: Mutex<Vec<RecordedIncr>>,
}

impl MetricsMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RecordedIncr> {
        self.records.lock().clone()
    }

    /// Number of increments recorded under `name`, any tags
    pub fn count(&self, name: &str) -> usize {
        self.records.lock().iter().filter(|r| r.name == name).count()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Panics unless exactly one increment of `name` was recorded, with exactly `tags`.
    pub fn assert_incr_once(&self, name: &str, tags: &[&str]) {
        let records = self.records.lock();
        let named: Vec<&RecordedIncr> = records.iter().filter(|r| r.name == name).collect();

        assert_eq!(
            named.len(),
            1,
            "expected exactly one increment of {:?}, recorded: {:?}",
            name,
            *records
        );
        assert_eq!(named[0].tags, tags, "unexpected tags for {:?}", name);
    }

    /// Panics if `name` was incremented at all.
    pub fn assert_not_incr(&self, name: &str) {
        let count = self.count(name);
        assert_eq!(count, 0, "expected no increments of {:?}, got {}", name, count);
    }
}

impl MetricsSink for MetricsMock {
    fn incr(&self, name: &str, tags: &[MetricTag]) {
        self.records.lock().push(RecordedIncr {
            name: name.to_string(),
            tags: tags.iter().map(MetricTag::to_string).collect(),
        });
    }
}
