//! Metrics Record - persisted evaluation results for one experiment

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known metric keys.
///
/// Hand-authored records may carry any other keys; the comparator treats
/// the union of everything it sees as the table columns.
pub mod keys {
    /// Exact-match rate between predictions and labels.
    pub const ACCURACY: &str = "accuracy";
    /// Weighted F1 score.
    pub const F1_SCORE: &str = "f1_score";
    /// Weighted precision.
    pub const PRECISION: &str = "precision";
    /// Weighted recall.
    pub const RECALL: &str = "recall";
    /// Square integer matrix sized to the class count.
    pub const CONFUSION_MATRIX: &str = "confusion_matrix";
    /// Always the literal `0.0`; no loss is actually computed.
    pub const LOSS: &str = "loss";
    /// ISO-8601 string appended at packaging time.
    pub const TIMESTAMP: &str = "timestamp";
}

/// Metrics Record represents one experiment's `metrics.json`.
///
/// A thin wrapper over an insertion-ordered JSON object: metric name to
/// number, null (metric attempted but not computable), or structured value
/// (`confusion_matrix`, `timestamp`). Insertion order is preserved through
/// serialization, so the comparator's column union follows writer emission
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MetricsRecord {
    values: Map<String, Value>,
}

impl MetricsRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed placeholder record used when no real evaluation occurred:
    /// `{accuracy: 0.0, loss: 0.0}`.
    #[must_use]
    pub fn placeholder() -> Self {
        let mut record = Self::new();
        record.set_number(keys::ACCURACY, 0.0);
        record.set_number(keys::LOSS, 0.0);
        record
    }

    /// Insert a raw JSON value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Record a computed numeric metric.
    pub fn set_number(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), Value::from(value));
    }

    /// Record a metric that was attempted but could not be computed.
    pub fn set_missing(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), Value::Null);
    }

    /// Append the packaging timestamp.
    pub fn set_timestamp(&mut self, iso8601: impl Into<String>) {
        self.values
            .insert(keys::TIMESTAMP.into(), Value::String(iso8601.into()));
    }

    /// Numeric value of `key`, if present and non-null.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    /// Raw JSON value of `key`, if present (may be null).
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// True when `key` is present, even with a null value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a MetricsRecord {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_record() {
        let record = MetricsRecord::placeholder();
        assert_eq!(record.number(keys::ACCURACY), Some(0.0));
        assert_eq!(record.number(keys::LOSS), Some(0.0));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_null_metric_is_present_but_not_numeric() {
        let mut record = MetricsRecord::new();
        record.set_missing(keys::F1_SCORE);

        assert!(record.contains(keys::F1_SCORE));
        assert_eq!(record.number(keys::F1_SCORE), None);
        assert_eq!(record.value(keys::F1_SCORE), Some(&Value::Null));
    }

    #[test]
    fn test_insertion_order_survives_round_trip() {
        let mut record = MetricsRecord::new();
        record.set_number(keys::ACCURACY, 0.9);
        record.set_missing(keys::F1_SCORE);
        record.insert(keys::CONFUSION_MATRIX, json!([[3, 0], [1, 2]]));
        record.set_timestamp("2024-05-01T12:00:00Z");

        let json = serde_json::to_string(&record).expect("serialization failed");
        let decoded: MetricsRecord = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(record, decoded);
        let keys_in_order: Vec<&String> = decoded.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys_in_order,
            vec!["accuracy", "f1_score", "confusion_matrix", "timestamp"]
        );
    }

    #[test]
    fn test_number_ignores_non_numeric_values() {
        let mut record = MetricsRecord::new();
        record.set_timestamp("2024-05-01T12:00:00Z");
        assert_eq!(record.number(keys::TIMESTAMP), None);
    }
}
