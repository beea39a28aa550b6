//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! registro package --model-path model.json --test-csv test.csv
//! registro compare --priority-metric f1_score --save-path comparison.txt
//! registro dashboard
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::compare::DEFAULT_PRIORITY_METRIC;
use crate::registry::DEFAULT_ROOT;

/// Registro: local experiment registry and comparison CLI
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "registro")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Package model experiments and compare their metrics")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Package experiment results into a new numbered experiment folder
    Package(PackageArgs),

    /// Compare experiment metrics and print recommendations
    Compare(CompareArgs),

    /// Launch the interactive terminal dashboard
    Dashboard(DashboardArgs),
}

/// Arguments for the package command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PackageArgs {
    /// Path to the stored model JSON file
    #[arg(long)]
    pub model_path: PathBuf,

    /// Path to combined test CSV (features + label column)
    #[arg(long)]
    pub test_csv: Option<PathBuf>,

    /// Column name of the label in the CSV
    #[arg(long, default_value = "label")]
    pub label_col: String,

    /// Name of the dataset recorded in the experiment config
    #[arg(long, default_value = "unknown_dataset")]
    pub dataset_name: String,

    /// Registry root to package into
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub output_dir: PathBuf,
}

/// Arguments for the compare command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CompareArgs {
    /// Directory with experiment metrics records
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub metrics_dir: PathBuf,

    /// Directory with experiment config records
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub configs_dir: PathBuf,

    /// Path to save the comparison chart (printed to stdout when absent)
    #[arg(long)]
    pub save_path: Option<PathBuf>,

    /// Metric driving best-model selection and classification
    #[arg(long, default_value = DEFAULT_PRIORITY_METRIC)]
    pub priority_metric: String,
}

/// Arguments for the dashboard command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DashboardArgs {
    /// Registry root the dashboard reads
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub experiments_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_defaults() {
        let cli = Cli::parse_from(["registro", "package", "--model-path", "model.json"]);
        let Command::Package(args) = cli.command else {
            panic!("expected package command");
        };
        assert_eq!(args.label_col, "label");
        assert_eq!(args.dataset_name, "unknown_dataset");
        assert_eq!(args.output_dir, PathBuf::from("experiments"));
        assert!(args.test_csv.is_none());
    }

    #[test]
    fn test_compare_defaults() {
        let cli = Cli::parse_from(["registro", "compare"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare command");
        };
        assert_eq!(args.priority_metric, "accuracy");
        assert_eq!(args.metrics_dir, PathBuf::from("experiments"));
        assert!(args.save_path.is_none());
    }

    #[test]
    fn test_missing_required_model_path_fails() {
        assert!(Cli::try_parse_from(["registro", "package"]).is_err());
    }
}
