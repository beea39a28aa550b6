//! Config Record - persisted model description for one experiment

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timestamp format for `created_at` (`YYYY-MM-DD HH:MM:SS`, UTC).
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Config Record represents one experiment's `config.json`.
///
/// Captures what was packaged: the model's type name, its hyperparameters
/// (empty map when the model exposes no introspection capability), the
/// dataset name, and the creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigRecord {
    model_name: String,
    parameters: Map<String, Value>,
    dataset: String,
    created_at: String,
}

impl ConfigRecord {
    /// Create a config record stamped with the current time.
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        parameters: Map<String, Value>,
        dataset: impl Into<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            parameters,
            dataset: dataset.into(),
            created_at: Utc::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }

    /// Model type name.
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Hyperparameter map.
    #[must_use]
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Dataset name the experiment was evaluated on.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`).
    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_record_new() {
        let mut params = Map::new();
        params.insert("threshold".into(), json!(0.5));

        let record = ConfigRecord::new("ThresholdClassifier", params, "iris");

        assert_eq!(record.model_name(), "ThresholdClassifier");
        assert_eq!(record.dataset(), "iris");
        assert_eq!(record.parameters().get("threshold"), Some(&json!(0.5)));
    }

    #[test]
    fn test_created_at_format() {
        let record = ConfigRecord::new("MajorityClassifier", Map::new(), "unknown_dataset");
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(record.created_at().len(), 19);
        assert_eq!(&record.created_at()[4..5], "-");
        assert_eq!(&record.created_at()[10..11], " ");
    }

    #[test]
    fn test_config_record_serialization() {
        let record = ConfigRecord::new("MajorityClassifier", Map::new(), "mail");

        let json = serde_json::to_string(&record).expect("serialization failed");
        let decoded: ConfigRecord = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(record, decoded);
    }
}
