//! Command-line parsing for the disclosure-record engine.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the classification/reconciliation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "escalafon",
    version,
    about = "Classify scraped judicial disclosure titles and reconcile start dates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: classify, group, reconcile, report, export.
    Run(RunArgs),
    /// Classify titles only (skip grouping and date reconciliation).
    Classify(RunArgs),
    /// Print the built-in reference vocabularies.
    Vocab,
}

/// Common options for `run` and `classify`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Input CSV of scraped disclosure rows.
    ///
    /// Recognized columns: person_id/cedula, full_name/nombre,
    /// job_title/cargo, institution/institucion, document_id/iddoc,
    /// year/anio, from/desde.
    pub input: PathBuf,

    /// CSV of per-(person, role) year overrides (person_id,role,year).
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Write reconciled start dates to this CSV.
    #[arg(long, value_name = "PATH")]
    pub export_dates: Option<PathBuf>,

    /// Write per-record classifications to this CSV.
    #[arg(long, value_name = "PATH")]
    pub export_classified: Option<PathBuf>,

    /// Write start-date records plus run metadata to this JSON file.
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Suppress the terminal summary (exports still happen).
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
