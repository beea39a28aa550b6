//! Registro CLI
//!
//! # Usage
//!
//! ```bash
//! # Package a model with its evaluation data
//! registro package --model-path model.json --test-csv test.csv --dataset-name iris
//!
//! # Package without test data (placeholder metrics)
//! registro package --model-path model.json
//!
//! # Compare all experiments under a priority metric
//! registro compare --priority-metric f1_score --save-path comparison.txt
//!
//! # Browse interactively
//! registro dashboard
//! ```

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

use registro::chart::{render_chart, save_chart};
use registro::cli::{Cli, Command, CompareArgs, DashboardArgs, PackageArgs};
use registro::compare::{load_configs, load_metrics, rank_and_recommend, ComparisonTable};
use registro::dashboard;
use registro::data::TestData;
use registro::model::StoredModel;
use registro::registry::package;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Package(args) => run_package(args).context("Failed to package results"),
        Command::Compare(args) => run_compare(args).context("Failed to compare metrics"),
        Command::Dashboard(args) => run_dashboard(args).context("Failed to launch dashboard"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Uniform failure reporting: plain message, one failure code.
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_package(args: PackageArgs) -> anyhow::Result<()> {
    println!("Packaging experiment results ...");

    let model = StoredModel::from_path(&args.model_path)
        .with_context(|| format!("could not load model from {}", args.model_path.display()))?;

    let data = match &args.test_csv {
        Some(csv_path) => {
            let data = TestData::from_csv(csv_path, &args.label_col)?;
            println!(
                "Loaded test CSV and split into features (X) and label column '{}' (Y)",
                args.label_col
            );
            Some(data)
        }
        None => {
            println!("No test CSV provided. Using default metrics.");
            None
        }
    };

    let exp_path = package(&model, data.as_ref(), &args.dataset_name, &args.output_dir)?;
    println!("\nResults saved to: {}", exp_path.display());
    Ok(())
}

fn run_compare(args: CompareArgs) -> anyhow::Result<()> {
    println!("Comparing experiment metrics...");

    let metrics = load_metrics(&args.metrics_dir)?;
    let configs = load_configs(&args.configs_dir)?;

    if metrics.is_empty() {
        println!("No experiments found.");
        return Ok(());
    }

    let table = ComparisonTable::from_records(metrics);
    println!("\n{}", table.render());

    match &args.save_path {
        Some(path) => {
            save_chart(&table, path)?;
            println!("Plot saved to: {}", path.display());
        }
        None => println!("{}", render_chart(&table)),
    }

    if !configs.is_empty() {
        println!("Configurations:");
        for (experiment, config) in &configs {
            let model_name = config
                .get("model_name")
                .and_then(|v| v.as_str())
                .unwrap_or("UnknownModel");
            let dataset = config
                .get("dataset")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown_dataset");
            println!("- {experiment}: {model_name} on {dataset}");
        }
    }

    println!("\nRecommendations:");
    for (experiment, message) in rank_and_recommend(&table, &args.priority_metric).iter() {
        println!("- {experiment}: {message}");
    }
    Ok(())
}

fn run_dashboard(args: DashboardArgs) -> anyhow::Result<()> {
    dashboard::run(&args.experiments_dir)?;
    Ok(())
}
