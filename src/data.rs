//! Tabular test-data loading
//!
//! Splits a headered CSV into a numeric feature matrix and a label vector,
//! keyed by a named label column. The registry core only ever sees the two
//! aligned arrays.

use std::path::Path;

use crate::model::Label;
use crate::{Error, Result};

/// Aligned (features, labels) evaluation data.
///
/// Both arrays always have the same length; rows come straight from the
/// CSV in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TestData {
    features: Vec<Vec<f64>>,
    labels: Vec<Label>,
}

impl TestData {
    /// Build test data from pre-split arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays differ in length.
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<Label>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(Error::Other(format!(
                "features ({}) and labels ({}) differ in length",
                features.len(),
                labels.len()
            )));
        }
        Ok(Self { features, labels })
    }

    /// Load a headered CSV and split off `label_column`.
    ///
    /// Every non-label cell must parse as `f64`; labels are taken verbatim
    /// as strings, so integer and string class labels both work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelColumn`] when the named column is missing,
    /// [`Error::FeatureParse`] for non-numeric feature cells, and CSV
    /// errors for unreadable or ragged input.
    pub fn from_csv<P: AsRef<Path>>(path: P, label_column: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h == label_column)
            .ok_or_else(|| Error::LabelColumn(label_column.to_string()))?;

        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let mut feature_row = Vec::with_capacity(headers.len().saturating_sub(1));
            for (idx, cell) in record.iter().enumerate() {
                if idx == label_idx {
                    labels.push(cell.to_string());
                } else {
                    let value = cell.trim().parse::<f64>().map_err(|_| Error::FeatureParse {
                        row: row + 1,
                        column: headers.get(idx).unwrap_or("?").to_string(),
                        value: cell.to_string(),
                    })?;
                    feature_row.push(value);
                }
            }
            features.push(feature_row);
        }

        Ok(Self { features, labels })
    }

    /// Feature matrix (one row per sample).
    #[must_use]
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Label vector, aligned with the feature rows.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the data holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_csv_splits_label_column() {
        let file = write_csv("x1,label,x2\n1.0,cat,2.0\n3.0,dog,4.0\n");
        let data = TestData::from_csv(file.path(), "label").unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.features(), &[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(data.labels(), &["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_from_csv_missing_label_column() {
        let file = write_csv("x1,x2\n1.0,2.0\n");
        let result = TestData::from_csv(file.path(), "label");
        assert!(matches!(result, Err(Error::LabelColumn(col)) if col == "label"));
    }

    #[test]
    fn test_from_csv_non_numeric_feature() {
        let file = write_csv("x1,label\noops,cat\n");
        let result = TestData::from_csv(file.path(), "label");
        assert!(matches!(result, Err(Error::FeatureParse { row: 1, .. })));
    }

    #[test]
    fn test_from_csv_numeric_labels_stay_verbatim() {
        let file = write_csv("x1,label\n1.0,0\n2.0,1\n");
        let data = TestData::from_csv(file.path(), "label").unwrap();
        assert_eq!(data.labels(), &["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = TestData::new(vec![vec![1.0]], vec!["a".into(), "b".into()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_csv_has_no_samples() {
        let file = write_csv("x1,label\n");
        let data = TestData::from_csv(file.path(), "label").unwrap();
        assert!(data.is_empty());
    }
}
