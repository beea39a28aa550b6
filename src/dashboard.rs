//! Terminal dashboard
//!
//! Interactive front-end over the comparator: loads whatever experiments
//! exist, shows the comparison table and chart, and lets the user pick a
//! priority metric from those actually present before printing the
//! recommendations. Reads the registry through the same directory
//! convention as everything else; writes nothing.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::chart::render_chart;
use crate::compare::{load_metrics, rank_and_recommend, ComparisonTable};
use crate::Result;

/// Priority metrics the dashboard offers, filtered to those present in
/// the loaded data.
pub const PRIORITY_METRIC_OPTIONS: [&str; 5] =
    ["accuracy", "f1_score", "precision", "recall", "loss"];

/// Candidate priority metrics actually present in the table's columns.
#[must_use]
pub fn available_priority_metrics(table: &ComparisonTable) -> Vec<&'static str> {
    PRIORITY_METRIC_OPTIONS
        .into_iter()
        .filter(|option| table.columns().iter().any(|c| c == option))
        .collect()
}

/// Run the dashboard loop against `experiments_dir`.
///
/// An empty registry prints an explicit warning and returns without
/// further processing. Quits on `q` or end of input.
///
/// # Errors
///
/// Returns an error when the registry cannot be scanned or a record is
/// malformed; selection handling itself never fails.
pub fn run<P: AsRef<Path>>(experiments_dir: P) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_with_io(experiments_dir.as_ref(), &mut input, &mut output)
}

fn run_with_io(experiments_dir: &Path, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<()> {
    let records = load_metrics(experiments_dir)?;
    if records.is_empty() {
        writeln!(
            output,
            "No experiments have been found under '{}'. Package one first.",
            experiments_dir.display()
        )?;
        return Ok(());
    }

    let table = ComparisonTable::from_records(records);
    writeln!(output, "Experiment Comparison Platform")?;
    writeln!(output)?;
    writeln!(output, "{}", table.render())?;
    writeln!(output, "{}", render_chart(&table))?;

    let options = available_priority_metrics(&table);
    if options.is_empty() {
        writeln!(
            output,
            "No recognized priority metric in the loaded data; nothing to rank."
        )?;
        return Ok(());
    }

    loop {
        writeln!(output, "Priority metrics: {}", options.join(", "))?;
        write!(output, "Select priority metric (q to quit): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let choice = line.trim();
        if choice.is_empty() || choice == "q" || choice == "quit" {
            break;
        }
        if !options.contains(&choice) {
            writeln!(output, "Unknown metric '{choice}'.")?;
            continue;
        }

        writeln!(output)?;
        writeln!(output, "System Recommendation")?;
        for (experiment, message) in rank_and_recommend(&table, choice).iter() {
            writeln!(output, "- {experiment}: {message}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}
