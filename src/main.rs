//! `hr-attrition` — estimate an employee's attrition risk with a pre-trained classifier.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Load the classifier artifact once ([`model::load_model`]); failure exits `2`.
//! 4. Layer the employee profile: defaults, config, `--profile`, flags ([`profile`]).
//! 5. Validate, encode and score the record ([`predict::Predictor`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0`, or `1` on a prediction error or a HIGH risk with `--fail-on-high`.

mod cli;
mod config;
mod error;
mod features;
mod model;
mod models;
mod predict;
mod profile;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use config::load_config;
use models::RiskClass;
use predict::Predictor;
use profile::{build_record, load_profile, ProfileOverrides};
use report::Assessment;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd, cli.config.as_deref())?;

    // The classifier is loaded once; nothing can be scored without it.
    let model_path = cli.model.clone().unwrap_or_else(|| config.model.path.clone());
    let classifier = match model::load_model(&model_path) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("{} {}", "Critical Error:".red().bold(), e);
            eprintln!(
                "  {} pass --model or set [model] path in .hr-attrition/config.toml",
                "hint:".yellow()
            );
            std::process::exit(2);
        }
    };
    let predictor = Predictor::new(classifier);

    // Profile layers, lowest precedence first
    let file_layer = cli.profile.as_deref().map(load_profile).transpose()?;
    let flag_layer = ProfileOverrides::from(&cli.employee);
    let layers = std::iter::once(&config.profile)
        .chain(file_layer.as_ref())
        .chain(std::iter::once(&flag_layer));
    let record = build_record(layers);

    // Resolve effective report format: --pdf implies PDF format
    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report.clone(),
    };

    let spinner = show_spinner(cli.quiet || matches!(report_format, ReportFormat::Json));
    let outcome = predictor.predict(&record);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let prediction = match outcome {
        Ok(prediction) => prediction,
        Err(e) => {
            eprintln!("{} {}", "An error occurred during prediction:".red(), e);
            std::process::exit(1);
        }
    };

    let assessment = Assessment::new(predictor.classifier_name(), &record, &prediction);

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&assessment, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            report::write_json(&assessment, std::io::stdout().lock())?;
        }
        ReportFormat::Pdf => {
            let pdf_path = cli
                .pdf
                .clone()
                .unwrap_or_else(|| PathBuf::from("attrition-report.pdf"));
            report::pdf::render(&assessment, &pdf_path, &mut std::io::stderr())?;
        }
    }

    if let Some(gauge_path) = cli.gauge.as_deref() {
        // Status lines stay off stdout so `--report json` remains parseable.
        report::png::render(&prediction, gauge_path, &mut std::io::stderr())?;
    }

    if cli.fail_on_high && prediction.risk_class == RiskClass::High {
        std::process::exit(1);
    }

    Ok(())
}

fn show_spinner(hidden: bool) -> Option<ProgressBar> {
    if hidden {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Processing data...");
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}
