//! Experiment registry
//!
//! The registry is a directory tree on the local filesystem:
//!
//! ```text
//! <root>/
//!   exp<N>/
//!     model.bin       # opaque serialized model artifact
//!     metrics.json    # MetricsRecord (+ ISO-8601 timestamp)
//!     config.json     # ConfigRecord
//! ```
//!
//! `<N>` is a positive integer allocated as `max(existing ids) + 1`. The
//! writer is the only mutator; artifacts are immutable once written, and a
//! new evaluation always produces a new experiment directory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registro::model::StoredModel;
//! use registro::registry::{allocate_next_id, package};
//!
//! let model = StoredModel::majority("ham");
//! let next = allocate_next_id("experiments")?;
//! let path = package(&model, None, "mail-2024", "experiments")?;
//! assert!(path.ends_with(format!("exp{next}")));
//! # Ok::<(), registro::Error>(())
//! ```

mod config_record;
mod metrics_record;
mod writer;

pub use config_record::ConfigRecord;
pub use metrics_record::{keys, MetricsRecord};
pub use writer::{
    allocate_next_id, describe, package, parse_exp_id, read_config, read_metrics, ModelInfo,
    CONFIG_FILE, DEFAULT_ROOT, EXP_PREFIX, METRICS_FILE, MODEL_FILE,
};
