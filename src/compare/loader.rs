//! Record loading - independent metrics and config scans

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::registry::{parse_exp_id, MetricsRecord, CONFIG_FILE, METRICS_FILE};
use crate::Result;

/// Load every experiment's metrics record under `dir`, keyed by directory
/// name.
///
/// Scans the immediate subdirectories for a `metrics.json`; directories
/// without one are skipped. Results are ordered by experiment number for
/// `exp<N>` names, then lexicographically for anything else, so row order
/// (and with it first-seen tie-breaking) is reproducible. A nonexistent
/// `dir` yields an empty result, not an error.
///
/// # Errors
///
/// Malformed JSON in an individual file propagates; missing metric *keys*
/// inside a well-formed file are tolerated downstream.
pub fn load_metrics<P: AsRef<Path>>(dir: P) -> Result<Vec<(String, MetricsRecord)>> {
    scan(dir.as_ref(), METRICS_FILE)
}

/// Load every experiment's config record under `dir`, keyed by directory
/// name.
///
/// Configs are loaded as raw JSON objects so hand-authored or partial
/// records (missing `parameters`, extra keys) stay usable. Same scan and
/// ordering rules as [`load_metrics`]; the two scans are independent — an
/// experiment holding only one of the two files shows up in that scan
/// alone.
///
/// # Errors
///
/// Malformed JSON in an individual file propagates.
pub fn load_configs<P: AsRef<Path>>(dir: P) -> Result<Vec<(String, Map<String, Value>)>> {
    scan(dir.as_ref(), CONFIG_FILE)
}

fn scan<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<(String, T)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
            continue;
        };
        if entry.path().join(file_name).is_file() {
            names.push(name);
        }
    }
    names.sort_by(|a, b| scan_order(a, b));

    let mut records = Vec::with_capacity(names.len());
    for name in names {
        let file = fs::File::open(dir.join(&name).join(file_name))?;
        let record: T = serde_json::from_reader(file)?;
        records.push((name, record));
    }
    Ok(records)
}

/// `exp<N>` names by numeric id first, everything else after,
/// lexicographically.
fn scan_order(a: &str, b: &str) -> Ordering {
    match (parse_exp_id(a), parse_exp_id(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
