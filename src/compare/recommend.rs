//! Ranking and recommendation
//!
//! Two passes over the comparison table: pick the best experiment under
//! the priority metric, then label every experiment through a fallback
//! cascade that always yields some message — ranking never fails.

use tracing::debug;

use super::ComparisonTable;
use crate::registry::{keys, MetricsRecord};

/// Values strictly above this classify as "Good performance".
pub const GOOD_THRESHOLD: f64 = 0.9;
/// Values strictly above this (and not Good) classify as "Average performance".
pub const AVERAGE_THRESHOLD: f64 = 0.7;
/// Priority metric used when the caller does not choose one.
pub const DEFAULT_PRIORITY_METRIC: &str = keys::ACCURACY;
/// Entry key carrying the overall best-performer summary.
pub const SUMMARY_KEY: &str = "summary";
/// Message for an experiment with no usable metric at all.
pub const NO_METRICS_MESSAGE: &str = "No metrics available for evaluation";

/// Ordered per-experiment recommendation messages, plus at most one
/// [`SUMMARY_KEY`] entry at the end. Ephemeral; recomputed every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    entries: Vec<(String, String)>,
}

impl Recommendations {
    /// Iterate `(experiment, message)` entries in table row order; the
    /// summary entry, when present, comes last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Message for one experiment (or [`SUMMARY_KEY`]).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The best-performer summary, when a best model was found.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get(SUMMARY_KEY)
    }

    /// Number of entries, summary included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Recommendations {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Rank experiments under `priority_metric` and label each one.
///
/// Pass 1 tracks the strictly greatest non-null value of the priority
/// metric; exact ties keep the first-encountered experiment (row order).
/// Pass 2 labels each experiment independently through the fallback
/// cascade: priority metric → `accuracy` → `f1_score` → first non-null
/// numeric column → explicit no-metrics message. When pass 1 found a best
/// model, a summary entry is appended; otherwise it is simply omitted.
#[must_use]
pub fn rank_and_recommend(table: &ComparisonTable, priority_metric: &str) -> Recommendations {
    let mut best: Option<(&str, f64)> = None;
    for (experiment, record) in table.rows() {
        if let Some(value) = record.number(priority_metric) {
            // Strict > keeps the first-seen experiment on exact ties.
            if best.map_or(true, |(_, current)| value > current) {
                best = Some((experiment, value));
            }
        }
    }
    if best.is_none() {
        debug!("no experiment carries priority metric '{priority_metric}'");
    }

    let mut entries = Vec::with_capacity(table.len() + 1);
    for (experiment, record) in table.rows() {
        let message = label_experiment(table, record, priority_metric, best, experiment);
        entries.push((experiment.to_string(), message));
    }

    if let Some((experiment, value)) = best {
        entries.push((
            SUMMARY_KEY.to_string(),
            format!(
                "RECOMMENDATION: Model '{experiment}' is the best performer with {priority_metric} = {value:.4}"
            ),
        ));
    }

    Recommendations { entries }
}

fn label_experiment(
    table: &ComparisonTable,
    record: &MetricsRecord,
    priority_metric: &str,
    best: Option<(&str, f64)>,
    experiment: &str,
) -> String {
    if let Some(value) = record.number(priority_metric) {
        let mut message = classify(priority_metric, value);
        if best.is_some_and(|(best_experiment, _)| best_experiment == experiment) {
            message.push_str(" (BEST MODEL)");
        }
        return message;
    }
    if let Some(value) = record.number(keys::ACCURACY) {
        return classify(keys::ACCURACY, value);
    }
    if let Some(value) = record.number(keys::F1_SCORE) {
        return classify(keys::F1_SCORE, value);
    }
    // Last resort: the first numeric column this experiment has anything
    // for. Timestamps and confusion matrices never classify a model.
    for column in table.columns() {
        if let Some(value) = record.number(column) {
            return format!("Performance based on {column}: {value:.4}");
        }
    }
    NO_METRICS_MESSAGE.to_string()
}

fn classify(metric: &str, value: f64) -> String {
    let grade = if value > GOOD_THRESHOLD {
        "Good"
    } else if value > AVERAGE_THRESHOLD {
        "Average"
    } else {
        "Poor"
    };
    format!("{grade} performance ({metric} = {value:.4})")
}
