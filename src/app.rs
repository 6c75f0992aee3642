//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the classify → group → reconcile pipeline
//! - prints the run summary
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, RunArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::export;

pub mod pipeline;

/// Entry point for the `escalafon` binary.
pub fn run() -> Result<(), AppError> {
    // We want `escalafon input.csv` to behave like `escalafon run input.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the shorter invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Classify(args) => handle_classify(args),
        Command::Vocab => handle_vocab(),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_pipeline(&config)?;

    if !args.quiet {
        print!(
            "{}",
            crate::report::format_classification_summary(&run.ingest, &run.classified)
        );
        print!(
            "{}",
            crate::report::format_reconciliation_summary(run.groups.len(), &run.records)
        );
    }

    if let Some(path) = &config.export_dates {
        export::write_start_dates_csv(path, &run.records)?;
        println!("Wrote start dates to {}", path.display());
    }
    if let Some(path) = &config.export_classified {
        export::write_classified_csv(path, &run.classified)?;
        println!("Wrote classifications to {}", path.display());
    }
    if let Some(path) = &config.export_json {
        export::write_records_json(path, &run.records)?;
        println!("Wrote records JSON to {}", path.display());
    }

    Ok(())
}

fn handle_classify(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let (ingest, classified) = pipeline::run_classification(&config)?;

    if !args.quiet {
        print!(
            "{}",
            crate::report::format_classification_summary(&ingest, &classified)
        );
    }

    if let Some(path) = &config.export_classified {
        export::write_classified_csv(path, &classified)?;
        println!("Wrote classifications to {}", path.display());
    }

    Ok(())
}

fn handle_vocab() -> Result<(), AppError> {
    let classifier = crate::classify::Classifier::builtin();
    println!("Judge titles:");
    for t in classifier.vocabulary().judge_titles() {
        println!("  {t}");
    }
    println!("\nProsecutor titles:");
    for t in classifier.vocabulary().prosecutor_titles() {
        println!("  {t}");
    }
    Ok(())
}

fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        input_path: args.input.clone(),
        overrides_path: args.overrides.clone(),
        export_dates: args.export_dates.clone(),
        export_classified: args.export_classified.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Insert the default `run` subcommand when the first argument is neither a
/// known subcommand nor a help/version flag.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    const SUBCOMMANDS: &[&str] = &["run", "classify", "vocab", "help"];

    match argv.get(1).map(String::as_str) {
        Some(first)
            if !SUBCOMMANDS.contains(&first)
                && !matches!(first, "-h" | "--help" | "-V" | "--version") =>
        {
            argv.insert(1, "run".to_string());
        }
        _ => {}
    }
    argv
}
