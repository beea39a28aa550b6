//! Chart rendering
//!
//! Renders the comparison table as a grouped horizontal bar chart in plain
//! terminal text: one group per experiment, one bar per numeric metric,
//! bars scaled against the table-wide maximum. With a save path the
//! rendering goes to a file; otherwise the caller prints it.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::compare::ComparisonTable;
use crate::Result;

/// Chart box width in characters.
const CHART_WIDTH: usize = 72;
/// Maximum bar length in characters.
const BAR_WIDTH: usize = 40;

/// Render the table as a grouped text bar chart.
///
/// Non-numeric columns (timestamps, confusion matrices) are skipped; an
/// experiment with no numeric metric at all gets an explicit placeholder
/// line instead of an empty group.
#[must_use]
pub fn render_chart(table: &ComparisonTable) -> String {
    let mut out = String::new();
    out.push_str(&"═".repeat(CHART_WIDTH));
    out.push('\n');
    out.push_str("  EXPERIMENT METRICS COMPARISON\n");
    out.push_str(&"─".repeat(CHART_WIDTH));
    out.push('\n');

    let max_value = table
        .rows()
        .flat_map(|(experiment, _)| {
            table
                .columns()
                .iter()
                .filter_map(move |column| table.number(experiment, column))
        })
        .fold(0.0_f64, f64::max);

    let metric_width = table
        .columns()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("metric".len());

    for (experiment, record) in table.rows() {
        let _ = writeln!(out, "  {experiment}");
        let mut drew_any = false;
        for column in table.columns() {
            let Some(value) = record.number(column) else {
                continue;
            };
            drew_any = true;
            let _ = writeln!(
                out,
                "    {column:<metric_width$} │{} {value:.4}",
                bar(value, max_value)
            );
        }
        if !drew_any {
            let _ = writeln!(out, "    (no numeric metrics)");
        }
    }
    if table.is_empty() {
        out.push_str("  No experiments to chart\n");
    }

    out.push_str(&"═".repeat(CHART_WIDTH));
    out.push('\n');
    out
}

/// Render the chart and write it to `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub fn save_chart<P: AsRef<Path>>(table: &ComparisonTable, path: P) -> Result<()> {
    fs::write(path.as_ref(), render_chart(table))?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bar(value: f64, max_value: f64) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max_value) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetricsRecord;
    use serde_json::json;

    fn sample_table() -> ComparisonTable {
        let mut first = MetricsRecord::new();
        first.set_number("accuracy", 0.85);
        first.set_number("f1_score", 0.8);
        first.set_timestamp("2024-05-01T12:00:00Z");

        let mut second = MetricsRecord::new();
        second.set_number("accuracy", 0.75);
        second.insert("confusion_matrix", json!([[1, 0], [0, 1]]));

        ComparisonTable::from_records(vec![
            ("exp1".into(), first),
            ("exp2".into(), second),
        ])
    }

    #[test]
    fn test_render_contains_bars_and_values() {
        let chart = render_chart(&sample_table());

        assert!(chart.contains("EXPERIMENT METRICS COMPARISON"));
        assert!(chart.contains("exp1"));
        assert!(chart.contains("0.8500"));
        assert!(chart.contains('█'));
    }

    #[test]
    fn test_render_skips_non_numeric_columns() {
        let chart = render_chart(&sample_table());
        assert!(!chart.contains("timestamp"));
        assert!(!chart.contains("confusion_matrix"));
    }

    #[test]
    fn test_largest_value_fills_the_bar() {
        let chart = render_chart(&sample_table());
        let full_bar = "█".repeat(40);
        assert!(chart.contains(&full_bar));
    }

    #[test]
    fn test_empty_table_renders_placeholder() {
        let chart = render_chart(&ComparisonTable::default());
        assert!(chart.contains("No experiments to chart"));
    }

    #[test]
    fn test_save_chart_writes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("comparison.txt");

        save_chart(&sample_table(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("exp2"));
    }
}
