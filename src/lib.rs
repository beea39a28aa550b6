//! # Registro: Local Experiment Registry
//!
//! Registro packages a trained model together with its evaluation metrics and
//! hyperparameters into a numbered experiment folder, and later compares
//! metrics across folders to recommend the best-performing experiment.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Genchi Genbutsu**: the registry root on disk is the sole source of
//!   truth; every scan reads the real directories, no in-memory cache
//! - **Jidoka**: a metric that cannot be computed degrades to an explicit
//!   null instead of aborting the evaluation
//! - **Poka-Yoke**: experiment directories are created exactly once and
//!   never overwritten
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use registro::model::StoredModel;
//! use registro::registry::package;
//!
//! let model = StoredModel::majority("spam");
//! let exp_path = package(&model, None, "mail-2024", "experiments")?;
//! println!("packaged into {}", exp_path.display());
//! # Ok::<(), registro::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod chart;
pub mod cli;
pub mod compare;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod eval;
pub mod model;
pub mod registry;

pub use error::{Error, Result};
