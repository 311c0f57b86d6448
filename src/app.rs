//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - collects the filter criteria (flags or the interactive form)
//! - runs the catalog → map pipeline
//! - prints the outcome

use clap::Parser;

use crate::cli::{Command, FormArgs, MapArgs, OutputArgs};
use crate::domain::{FilterCriteria, MapConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `quake` binary.
pub fn run() -> Result<(), AppError> {
    // We want `quake` to open the form and `quake -d 3` to behave like `quake map -d 3`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Map(args) => handle_map(args),
        Command::Form(args) => handle_form(args),
    }
}

fn handle_map(args: MapArgs) -> Result<(), AppError> {
    let criteria = FilterCriteria::new(args.days, args.min_mw)?;
    execute(&map_config_from_args(criteria, &args.output))
}

fn handle_form(args: FormArgs) -> Result<(), AppError> {
    let criteria = crate::cli::form::prompt_for_criteria()?;
    execute(&map_config_from_args(criteria, &args.output))
}

fn execute(config: &MapConfig) -> Result<(), AppError> {
    let outcome = pipeline::run_map(config)?;
    println!("{}", crate::report::format_run_summary(&outcome));
    Ok(())
}

pub fn map_config_from_args(criteria: FilterCriteria, args: &OutputArgs) -> MapConfig {
    MapConfig {
        criteria,
        output: args.output.clone(),
        input: args.input.clone(),
        timeout_secs: args.timeout,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `quake` defaults to the form.
///
/// Rules:
/// - `quake`                       -> `quake form`
/// - `quake -d 3 ...`              -> `quake map -d 3 ...`
/// - `quake --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("form".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "map" | "form");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "map flags".
    if arg1.starts_with('-') {
        argv.insert(1, "map".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
