//! Model capability and built-in storable model formats
//!
//! The registry treats a model as an opaque capability: anything that can
//! predict labels for a feature matrix, report a human-readable name, and
//! serialize itself into the experiment's artifact blob. Hyperparameter
//! introspection is optional; a model without it packages with an empty
//! parameter map.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::{Error, Result};

/// Class label produced by a classifier.
///
/// Labels are compared by exact match for accuracy and grouped by value for
/// the weighted metrics, so plain strings cover both string-labelled and
/// integer-labelled datasets (the CSV loader reads labels verbatim).
pub type Label = String;

/// Capability contract for anything the registry can package.
pub trait Model {
    /// Human-readable model type name, recorded as `model_name` in the
    /// experiment config.
    fn name(&self) -> &str;

    /// Predict one label per feature row.
    ///
    /// # Errors
    ///
    /// Returns an error when the feature matrix is incompatible with the
    /// model (wrong width, missing columns). The evaluator treats any
    /// prediction error as a total evaluation failure and degrades to
    /// placeholder metrics.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Label>>;

    /// Hyperparameter introspection capability.
    ///
    /// `None` means the model does not expose its parameters; the packaged
    /// config then carries an empty parameter map.
    fn params(&self) -> Option<Map<String, Value>> {
        None
    }

    /// Serialize the model into the opaque artifact blob written as
    /// `model.bin` inside the experiment directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be serialized.
    fn to_bytes(&self) -> Result<Vec<u8>>;
}

/// A centroid of [`StoredModel::NearestCentroid`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Centroid {
    label: Label,
    center: Vec<f64>,
}

impl Centroid {
    /// Create a centroid for `label` at `center`.
    #[must_use]
    pub fn new(label: impl Into<Label>, center: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            center,
        }
    }

    /// Class label this centroid predicts.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Coordinates in feature space.
    #[must_use]
    pub fn center(&self) -> &[f64] {
        &self.center
    }
}

/// Built-in serializable classifier formats.
///
/// These are the model kinds the CLI can load from a JSON file, evaluate,
/// and persist. Deliberately tiny: the registry does not train models, it
/// packages them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredModel {
    /// Always predicts one fixed class.
    Majority {
        /// The class every prediction returns.
        class: Label,
    },
    /// Decision stump on a single feature column.
    Threshold {
        /// Index of the feature column to test.
        feature: usize,
        /// Split point.
        threshold: f64,
        /// Label when the feature value is strictly above the threshold.
        above: Label,
        /// Label otherwise.
        below: Label,
    },
    /// Predicts the label of the nearest centroid (squared Euclidean).
    NearestCentroid {
        /// Labelled centroids; must be non-empty and of uniform width.
        centroids: Vec<Centroid>,
    },
}

impl StoredModel {
    /// Majority-class model predicting `class` for every row.
    #[must_use]
    pub fn majority(class: impl Into<Label>) -> Self {
        Self::Majority {
            class: class.into(),
        }
    }

    /// Decision stump on feature column `feature` at `threshold`.
    #[must_use]
    pub fn threshold(
        feature: usize,
        threshold: f64,
        above: impl Into<Label>,
        below: impl Into<Label>,
    ) -> Self {
        Self::Threshold {
            feature,
            threshold,
            above: above.into(),
            below: below.into(),
        }
    }

    /// Nearest-centroid model over `centroids`.
    #[must_use]
    pub const fn nearest_centroid(centroids: Vec<Centroid>) -> Self {
        Self::NearestCentroid { centroids }
    }

    /// Load a stored model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// known model kind.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Decode a stored model from its serialized artifact bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if the bytes are not a valid model artifact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Model(format!("invalid model artifact: {e}")))
    }

    fn predict_row(&self, row: &[f64]) -> Result<Label> {
        match self {
            Self::Majority { class } => Ok(class.clone()),
            Self::Threshold {
                feature,
                threshold,
                above,
                below,
            } => {
                let value = row.get(*feature).ok_or_else(|| {
                    Error::Model(format!(
                        "feature index {feature} out of bounds for row of width {}",
                        row.len()
                    ))
                })?;
                Ok(if *value > *threshold {
                    above.clone()
                } else {
                    below.clone()
                })
            }
            Self::NearestCentroid { centroids } => {
                let mut best: Option<(&Centroid, f64)> = None;
                for centroid in centroids {
                    if centroid.center.len() != row.len() {
                        return Err(Error::Model(format!(
                            "centroid width {} does not match row width {}",
                            centroid.center.len(),
                            row.len()
                        )));
                    }
                    let dist: f64 = centroid
                        .center
                        .iter()
                        .zip(row)
                        .map(|(c, x)| (c - x) * (c - x))
                        .sum();
                    // Strict < keeps the first centroid on exact ties.
                    if best.map_or(true, |(_, d)| dist < d) {
                        best = Some((centroid, dist));
                    }
                }
                best.map(|(c, _)| c.label.clone())
                    .ok_or_else(|| Error::Model("nearest-centroid model has no centroids".into()))
            }
        }
    }
}

impl Model for StoredModel {
    fn name(&self) -> &str {
        match self {
            Self::Majority { .. } => "MajorityClassifier",
            Self::Threshold { .. } => "ThresholdClassifier",
            Self::NearestCentroid { .. } => "NearestCentroidClassifier",
        }
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Label>> {
        features.iter().map(|row| self.predict_row(row)).collect()
    }

    fn params(&self) -> Option<Map<String, Value>> {
        let mut params = Map::new();
        match self {
            Self::Majority { class } => {
                params.insert("class".into(), json!(class));
            }
            Self::Threshold {
                feature,
                threshold,
                above,
                below,
            } => {
                params.insert("feature".into(), json!(feature));
                params.insert("threshold".into(), json!(threshold));
                params.insert("above".into(), json!(above));
                params.insert("below".into(), json!(below));
            }
            Self::NearestCentroid { centroids } => {
                params.insert("n_centroids".into(), json!(centroids.len()));
                let width = centroids.first().map_or(0, |c| c.center.len());
                params.insert("n_features".into(), json!(width));
            }
        }
        Some(params)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
