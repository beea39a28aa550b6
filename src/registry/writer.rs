//! Registry Writer - allocates experiment ids and persists artifacts

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;

use super::{ConfigRecord, MetricsRecord};
use crate::data::TestData;
use crate::eval::evaluate;
use crate::model::Model;
use crate::Result;

/// Experiment directory name prefix (`exp<N>`).
pub const EXP_PREFIX: &str = "exp";
/// Serialized model artifact file name.
pub const MODEL_FILE: &str = "model.bin";
/// Metrics record file name.
pub const METRICS_FILE: &str = "metrics.json";
/// Config record file name.
pub const CONFIG_FILE: &str = "config.json";
/// Default registry root.
pub const DEFAULT_ROOT: &str = "experiments";

/// Parse the integer suffix of an `exp<N>` directory name.
///
/// `None` for anything else; non-conforming names are skipped by the id
/// allocator, never an error.
#[must_use]
pub fn parse_exp_id(name: &str) -> Option<u32> {
    name.strip_prefix(EXP_PREFIX)?.parse().ok()
}

/// Allocate the next experiment id under `root`.
///
/// Creates `root` if absent. The result is `max(existing ids) + 1`, or `1`
/// when no conforming `exp<N>` subdirectory exists. Two concurrent callers
/// can observe the same id — an accepted read-then-create race; the loser
/// fails in [`package`] when the directory is created.
///
/// # Errors
///
/// Returns an error if `root` cannot be created or scanned.
pub fn allocate_next_id<P: AsRef<Path>>(root: P) -> Result<u32> {
    let root = root.as_ref();
    if !root.exists() {
        fs::create_dir_all(root)?;
        return Ok(1);
    }

    let mut max_id = 0;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(id) = entry.file_name().to_str().and_then(parse_exp_id) {
            max_id = max_id.max(id);
        }
    }
    Ok(max_id + 1)
}

/// What [`describe`] extracts from a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Human-readable model type name.
    pub model_name: String,
    /// Hyperparameter map; empty when the model exposes no introspection.
    pub parameters: Map<String, Value>,
}

/// Extract the model's type name and, when the introspection capability is
/// present, its hyperparameters. No capability degrades to an empty map.
#[must_use]
pub fn describe(model: &dyn Model) -> ModelInfo {
    ModelInfo {
        model_name: model.name().to_string(),
        parameters: model.params().unwrap_or_default(),
    }
}

/// Package a model into a fresh experiment directory under `root`.
///
/// Orchestrates: allocate id → create `exp<N>` → write the model artifact
/// → evaluate → write `metrics.json` (with an ISO-8601 timestamp appended)
/// → write `config.json`. Creates exactly one new directory and three new
/// files; prior experiments are never touched.
///
/// # Errors
///
/// Any failing step (unserializable model, unwritable filesystem, id
/// collision) propagates with its original context; nothing is retried.
/// Evaluation itself never fails — missing or broken metrics degrade
/// inside the record (see [`crate::eval::evaluate`]).
pub fn package<P: AsRef<Path>>(
    model: &dyn Model,
    data: Option<&TestData>,
    dataset_name: &str,
    root: P,
) -> Result<PathBuf> {
    let root = root.as_ref();
    fs::create_dir_all(root)?;

    let id = allocate_next_id(root)?;
    let exp_path = root.join(format!("{EXP_PREFIX}{id}"));
    // Plain create_dir: a collision with an existing experiment is an
    // error, never an overwrite.
    fs::create_dir(&exp_path)?;

    let model_path = exp_path.join(MODEL_FILE);
    fs::write(&model_path, model.to_bytes()?)?;
    info!("Saved model to {}", model_path.display());

    if data.is_some() {
        info!("Evaluating model on test data...");
    }
    let mut metrics = evaluate(model, data);
    metrics.set_timestamp(Utc::now().to_rfc3339());

    let metrics_path = exp_path.join(METRICS_FILE);
    write_json_pretty(&metrics_path, &metrics)?;
    info!("Saved metrics to {}", metrics_path.display());

    let info = describe(model);
    let config = ConfigRecord::new(info.model_name, info.parameters, dataset_name);
    let config_path = exp_path.join(CONFIG_FILE);
    write_json_pretty(&config_path, &config)?;
    info!("Saved config to {}", config_path.display());

    info!(
        "Successfully packaged model in {EXP_PREFIX}{id}: {CONFIG_FILE}, {METRICS_FILE} and {MODEL_FILE} have been created"
    );
    Ok(exp_path)
}

fn write_json_pretty<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Load one experiment's metrics record back from its directory.
///
/// # Errors
///
/// Returns an error when the file is missing or malformed.
pub fn read_metrics<P: AsRef<Path>>(exp_path: P) -> Result<MetricsRecord> {
    let file = fs::File::open(exp_path.as_ref().join(METRICS_FILE))?;
    Ok(serde_json::from_reader(file)?)
}

/// Load one experiment's config record back from its directory.
///
/// # Errors
///
/// Returns an error when the file is missing or malformed.
pub fn read_config<P: AsRef<Path>>(exp_path: P) -> Result<ConfigRecord> {
    let file = fs::File::open(exp_path.as_ref().join(CONFIG_FILE))?;
    Ok(serde_json::from_reader(file)?)
}
