//! Comparator/Recommender
//!
//! Reads whatever experiment directories currently exist, aligns their
//! heterogeneous metric sets into a rectangular table, and ranks the
//! experiments under a caller-selected priority metric. Read-only and
//! idempotent: nothing here mutates the registry.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registro::compare::{load_metrics, rank_and_recommend, ComparisonTable};
//!
//! let records = load_metrics("experiments")?;
//! let table = ComparisonTable::from_records(records);
//! let recs = rank_and_recommend(&table, "accuracy");
//! for (experiment, message) in recs.iter() {
//!     println!("{experiment}: {message}");
//! }
//! # Ok::<(), registro::Error>(())
//! ```

mod loader;
mod recommend;
mod table;

pub use loader::{load_configs, load_metrics};
pub use recommend::{
    rank_and_recommend, Recommendations, AVERAGE_THRESHOLD, DEFAULT_PRIORITY_METRIC,
    GOOD_THRESHOLD, NO_METRICS_MESSAGE, SUMMARY_KEY,
};
pub use table::ComparisonTable;
