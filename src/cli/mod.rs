//! Command-line parsing for the KOERI earthquake map tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the parsing/filtering/rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::DEFAULT_TIMEOUT_SECS;

pub mod form;

/// Default map document name; re-running overwrites it.
pub const DEFAULT_OUTPUT: &str = "koeri_earthquakes.html";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "quake", version, about = "KOERI Türkiye earthquake catalog to interactive map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the map from the given lookback window and minimum magnitude.
    Map(MapArgs),
    /// Ask for the lookback window and minimum magnitude interactively, then build the map.
    Form(FormArgs),
}

/// Options for the non-interactive `map` command.
#[derive(Debug, Parser, Clone)]
pub struct MapArgs {
    /// How many past days of earthquakes to include.
    #[arg(short = 'd', long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,

    /// Minimum moment magnitude (Mw).
    #[arg(short = 'm', long = "min-mw", default_value_t = 0.0, allow_negative_numbers = true)]
    pub min_mw: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for the interactive `form` command.
#[derive(Debug, Parser, Clone)]
pub struct FormArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Source/output options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Map document to write (overwritten on every run).
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Read the catalog from a saved file instead of fetching it.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Export matched records to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export the map model (markers, view, legend) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}
