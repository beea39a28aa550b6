//! Comparison Table - rectangular view over heterogeneous metric sets

use serde_json::Value;
use std::fmt::Write as _;

use crate::registry::MetricsRecord;

/// Widest cell rendering before truncation (confusion matrices get long).
const MAX_CELL_WIDTH: usize = 24;

/// Rectangular comparison view: rows are experiments in scan order,
/// columns the union of every metric name seen, in first-encounter order.
/// Missing experiment/metric combinations read as JSON null. Ephemeral —
/// rebuilt on every comparison run, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonTable {
    columns: Vec<String>,
    rows: Vec<(String, MetricsRecord)>,
}

impl ComparisonTable {
    /// Assemble the table from `(experiment, metrics)` records, preserving
    /// record order as row order.
    #[must_use]
    pub fn from_records(records: Vec<(String, MetricsRecord)>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for (_, record) in &records {
            for (key, _) in record {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self {
            columns,
            rows: records,
        }
    }

    /// Column names (union of metric names, first-encounter order).
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterate `(experiment, metrics)` rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &MetricsRecord)> {
        self.rows.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Number of experiments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no experiments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value for `(experiment, column)`; null when either is absent.
    #[must_use]
    pub fn cell(&self, experiment: &str, column: &str) -> &Value {
        self.rows
            .iter()
            .find(|(name, _)| name == experiment)
            .and_then(|(_, record)| record.value(column))
            .unwrap_or(&Value::Null)
    }

    /// Numeric cell value, when present and non-null.
    #[must_use]
    pub fn number(&self, experiment: &str, column: &str) -> Option<f64> {
        self.cell(experiment, column).as_f64()
    }

    /// Render as an aligned text table (numbers to 4 decimal places,
    /// missing cells as `-`).
    #[must_use]
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        let mut name_width = "experiment".len();
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());

        for (name, record) in &self.rows {
            name_width = name_width.max(name.len());
            let row: Vec<String> = self
                .columns
                .iter()
                .map(|col| format_cell(record.value(col).unwrap_or(&Value::Null)))
                .collect();
            for (width, cell) in widths.iter_mut().zip(&row) {
                *width = (*width).max(cell.len());
            }
            cells.push(row);
        }

        let mut out = String::new();
        let _ = write!(out, "{:<name_width$}", "experiment");
        for (column, width) in self.columns.iter().zip(&widths) {
            let _ = write!(out, "  {column:<width$}");
        }
        out.push('\n');

        for ((name, _), row) in self.rows.iter().zip(&cells) {
            let _ = write!(out, "{name:<name_width$}");
            for (cell, width) in row.iter().zip(&widths) {
                let _ = write!(out, "  {cell:<width$}");
            }
            out.push('\n');
        }
        out
    }
}

fn format_cell(value: &Value) -> String {
    let rendered = match value {
        Value::Null => "-".to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| format!("{f:.4}")),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if rendered.len() > MAX_CELL_WIDTH {
        let mut truncated: String = rendered.chars().take(MAX_CELL_WIDTH - 3).collect();
        truncated.push_str("...");
        truncated
    } else {
        rendered
    }
}
