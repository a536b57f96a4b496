//! Command implementations for the ARGOS importer CLI
//!
//! Each command lives in its own module:
//! - `import`: parse an export directory into an output container
//! - `inspect`: parse into memory and report per-tag statistics

pub mod import;
pub mod inspect;
pub mod shared;

use crate::app::services::directory_processor::ImportSummary;
use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the subcommand handler
pub fn run(args: Args) -> Result<ImportSummary> {
    match args.command {
        Some(Commands::Import(import_args)) => import::run_import(import_args),
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args),
        None => Err(Error::configuration("No command given")),
    }
}
