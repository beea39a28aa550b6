//! Classification evaluation
//!
//! Computes the metrics record the registry writer persists. Evaluation
//! never fails: a sub-metric that cannot be computed degrades to an
//! explicit null, and a total prediction failure degrades to the fixed
//! placeholder record `{accuracy: 0.0, loss: 0.0}`.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{error, warn};

use crate::data::TestData;
use crate::model::{Label, Model};
use crate::registry::{keys, MetricsRecord};
use crate::{Error, Result};

/// Evaluate `model`, producing the metrics record to persist.
///
/// With no test data the result is the placeholder record and a warning is
/// logged; this is a deliberate policy, not a failure. The caller appends
/// the timestamp at packaging time.
#[must_use]
pub fn evaluate(model: &dyn Model, data: Option<&TestData>) -> MetricsRecord {
    data.map_or_else(
        || {
            warn!("No test data provided. Using placeholder metrics.");
            MetricsRecord::placeholder()
        },
        |data| evaluate_classification(model, data.features(), data.labels()),
    )
}

/// Evaluate `model` against aligned features and labels.
///
/// Always contains `accuracy` and `loss`; `f1_score`, `precision`,
/// `recall`, and `confusion_matrix` are each individually degraded to null
/// when not computable. `loss` is the literal `0.0` — it is never computed.
#[must_use]
pub fn evaluate_classification(
    model: &dyn Model,
    features: &[Vec<f64>],
    labels: &[Label],
) -> MetricsRecord {
    let predictions = match model.predict(features) {
        Ok(predictions) => predictions,
        Err(e) => {
            error!("Error evaluating model: {e}");
            return MetricsRecord::placeholder();
        }
    };
    if labels.is_empty() || predictions.len() != labels.len() {
        error!(
            "Error evaluating model: got {} predictions for {} labels",
            predictions.len(),
            labels.len()
        );
        return MetricsRecord::placeholder();
    }

    let mut metrics = MetricsRecord::new();
    metrics.set_number(keys::ACCURACY, accuracy(labels, &predictions));

    let scored: [(&str, fn(&[Label], &[Label]) -> Result<f64>); 3] = [
        (keys::F1_SCORE, weighted_f1),
        (keys::PRECISION, weighted_precision),
        (keys::RECALL, weighted_recall),
    ];
    for (key, score) in scored {
        match score(labels, &predictions) {
            Ok(value) => metrics.set_number(key, value),
            Err(e) => {
                warn!("Could not calculate {key}: {e}");
                metrics.set_missing(key);
            }
        }
    }

    match confusion_matrix(labels, &predictions) {
        Ok(matrix) => metrics.insert(keys::CONFUSION_MATRIX, matrix_to_value(&matrix)),
        Err(e) => {
            warn!("Could not calculate {}: {e}", keys::CONFUSION_MATRIX);
            metrics.set_missing(keys::CONFUSION_MATRIX);
        }
    }

    metrics.set_number(keys::LOSS, 0.0);
    metrics
}

/// Exact-match rate between labels and predictions.
///
/// Callers must pass non-empty, length-matched slices;
/// [`evaluate_classification`] guards for both and degrades to the
/// placeholder record otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy(labels: &[Label], predictions: &[Label]) -> f64 {
    let matches = labels
        .iter()
        .zip(predictions)
        .filter(|(l, p)| l == p)
        .count();
    matches as f64 / labels.len() as f64
}

/// Per-class tallies used by the weighted scores.
#[derive(Default)]
struct ClassStats {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
    support: usize,
}

fn class_stats(labels: &[Label], predictions: &[Label]) -> Result<BTreeMap<Label, ClassStats>> {
    if labels.is_empty() {
        return Err(Error::Other("no samples to score".into()));
    }
    let mut stats: BTreeMap<Label, ClassStats> = BTreeMap::new();
    for (label, prediction) in labels.iter().zip(predictions) {
        let truth = stats.entry(label.clone()).or_default();
        truth.support += 1;
        if label == prediction {
            truth.true_positive += 1;
        } else {
            truth.false_negative += 1;
            stats.entry(prediction.clone()).or_default().false_positive += 1;
        }
    }
    Ok(stats)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn weighted_over_classes<F>(labels: &[Label], predictions: &[Label], score: F) -> Result<f64>
where
    F: Fn(&ClassStats) -> f64,
{
    let stats = class_stats(labels, predictions)?;
    let total: usize = stats.values().map(|s| s.support).sum();
    let weighted: f64 = stats
        .values()
        .map(|s| score(s) * s.support as f64)
        .sum();
    Ok(weighted / total as f64)
}

/// Precision averaged over classes, weighted by support.
///
/// # Errors
///
/// Returns an error when there are no samples to score.
pub fn weighted_precision(labels: &[Label], predictions: &[Label]) -> Result<f64> {
    weighted_over_classes(labels, predictions, |s| {
        ratio(s.true_positive, s.true_positive + s.false_positive)
    })
}

/// Recall averaged over classes, weighted by support.
///
/// # Errors
///
/// Returns an error when there are no samples to score.
pub fn weighted_recall(labels: &[Label], predictions: &[Label]) -> Result<f64> {
    weighted_over_classes(labels, predictions, |s| {
        ratio(s.true_positive, s.true_positive + s.false_negative)
    })
}

/// F1 averaged over classes, weighted by support.
///
/// # Errors
///
/// Returns an error when there are no samples to score.
pub fn weighted_f1(labels: &[Label], predictions: &[Label]) -> Result<f64> {
    weighted_over_classes(labels, predictions, |s| {
        let precision = ratio(s.true_positive, s.true_positive + s.false_positive);
        let recall = ratio(s.true_positive, s.true_positive + s.false_negative);
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    })
}

/// Confusion matrix over the sorted union of observed classes.
///
/// `matrix[i][j]` counts samples of true class `i` predicted as class `j`.
///
/// # Errors
///
/// Returns an error when there are no samples to score.
pub fn confusion_matrix(labels: &[Label], predictions: &[Label]) -> Result<Vec<Vec<u64>>> {
    if labels.is_empty() {
        return Err(Error::Other("no samples to score".into()));
    }
    let classes: Vec<&Label> = {
        let mut set: std::collections::BTreeSet<&Label> = labels.iter().collect();
        set.extend(predictions);
        set.into_iter().collect()
    };
    let index: BTreeMap<&Label, usize> = classes.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    let mut matrix = vec![vec![0_u64; classes.len()]; classes.len()];
    for (label, prediction) in labels.iter().zip(predictions) {
        matrix[index[label]][index[prediction]] += 1;
    }
    Ok(matrix)
}

fn matrix_to_value(matrix: &[Vec<u64>]) -> Value {
    Value::Array(
        matrix
            .iter()
            .map(|row| Value::Array(row.iter().map(|&n| Value::from(n)).collect()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoredModel;

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_accuracy_exact_match_rate() {
        let truth = labels(&["a", "b", "a", "b"]);
        let preds = labels(&["a", "b", "b", "b"]);
        assert!((accuracy(&truth, &preds) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_perfect_predictions_score_one() {
        let truth = labels(&["x", "y", "x"]);
        assert!((accuracy(&truth, &truth) - 1.0).abs() < f64::EPSILON);
        assert!((weighted_f1(&truth, &truth).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((weighted_precision(&truth, &truth).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((weighted_recall(&truth, &truth).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighted_scores_known_example() {
        // truth: a a a b ; preds: a a b b
        // class a: tp=2 fn=1 fp=0 -> P=1.0   R=2/3 support=3
        // class b: tp=1 fn=0 fp=1 -> P=0.5   R=1.0 support=1
        let truth = labels(&["a", "a", "a", "b"]);
        let preds = labels(&["a", "a", "b", "b"]);

        let precision = weighted_precision(&truth, &preds).unwrap();
        let recall = weighted_recall(&truth, &preds).unwrap();
        assert!((precision - (1.0 * 3.0 + 0.5) / 4.0).abs() < 1e-12);
        assert!((recall - ((2.0 / 3.0) * 3.0 + 1.0) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_confusion_matrix_layout() {
        let truth = labels(&["a", "a", "b", "b"]);
        let preds = labels(&["a", "b", "b", "b"]);
        let matrix = confusion_matrix(&truth, &preds).unwrap();
        // sorted classes: [a, b]
        assert_eq!(matrix, vec![vec![1, 1], vec![0, 2]]);
    }

    #[test]
    fn test_confusion_matrix_includes_predicted_only_classes() {
        let truth = labels(&["a", "a"]);
        let preds = labels(&["a", "c"]);
        let matrix = confusion_matrix(&truth, &preds).unwrap();
        // classes [a, c]: square even though "c" never occurs in truth
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0], vec![1, 1]);
        assert_eq!(matrix[1], vec![0, 0]);
    }

    #[test]
    fn test_evaluate_without_data_is_placeholder() {
        let model = StoredModel::majority("a");
        let metrics = evaluate(&model, None);
        assert_eq!(metrics, MetricsRecord::placeholder());
    }

    #[test]
    fn test_evaluate_full_record_shape() {
        let model = StoredModel::majority("a");
        let data = TestData::new(
            vec![vec![0.0], vec![0.0], vec![0.0], vec![0.0]],
            labels(&["a", "a", "a", "b"]),
        )
        .unwrap();

        let metrics = evaluate(&model, Some(&data));

        assert_eq!(metrics.number(keys::ACCURACY), Some(0.75));
        assert!(metrics.number(keys::F1_SCORE).is_some());
        assert!(metrics.number(keys::PRECISION).is_some());
        assert!(metrics.number(keys::RECALL).is_some());
        assert!(metrics.value(keys::CONFUSION_MATRIX).unwrap().is_array());
        assert_eq!(metrics.number(keys::LOSS), Some(0.0));

        let order: Vec<&String> = metrics.iter().map(|(k, _)| k).collect();
        assert_eq!(
            order,
            vec![
                "accuracy",
                "f1_score",
                "precision",
                "recall",
                "confusion_matrix",
                "loss"
            ]
        );
    }

    #[test]
    fn test_prediction_failure_degrades_to_placeholder() {
        // Feature index out of bounds makes predict fail outright.
        let model = StoredModel::threshold(5, 0.0, "a", "b");
        let data = TestData::new(vec![vec![1.0]], labels(&["a"])).unwrap();

        let metrics = evaluate(&model, Some(&data));
        assert_eq!(metrics, MetricsRecord::placeholder());
    }

    #[test]
    fn test_empty_data_degrades_to_placeholder() {
        let model = StoredModel::majority("a");
        let data = TestData::new(vec![], vec![]).unwrap();
        let metrics = evaluate(&model, Some(&data));
        assert_eq!(metrics, MetricsRecord::placeholder());
    }

    #[test]
    fn test_loss_is_always_zero() {
        let model = StoredModel::majority("a");
        let data = TestData::new(vec![vec![0.0]], labels(&["b"])).unwrap();
        let metrics = evaluate(&model, Some(&data));
        assert_eq!(metrics.number(keys::LOSS), Some(0.0));
    }
}
