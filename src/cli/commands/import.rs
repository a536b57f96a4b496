//! Import command implementation
//!
//! Validates the run parameters, creates the output container, walks the
//! input directory into it and reports what was written.

use super::shared::{format_size, print_json, setup_logging};
use crate::Result;
use crate::app::services::directory_processor::{DirectoryProcessor, ImportSummary};
use crate::app::services::feature_sink::{
    ColumnarSink, FeatureSink, SinkReport, create_sink,
};
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::config::ImportConfig;
use colored::*;
use indicatif::HumanDuration;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Everything an import run produced
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub summary: ImportSummary,
    pub sink: SinkReport,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Import command runner
pub fn run_import(args: ImportArgs) -> Result<ImportSummary> {
    setup_logging(args.get_log_level())?;
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config();
    let outcome = import_directory(&config)?;

    if !args.quiet {
        match args.summary {
            OutputFormat::Human => print_human_summary(&config, &outcome),
            OutputFormat::Json => print_json(&outcome)?,
        }
    }

    Ok(outcome.summary)
}

/// Run one import described by `config`
///
/// The output is created (or overwritten) before any input file is read and
/// is closed once every file has been scanned. A run that fails after the
/// output was created removes it again.
pub fn import_directory(config: &ImportConfig) -> Result<ImportOutcome> {
    let start_time = Instant::now();

    config.validate()?;
    config.ensure_output_directory()?;

    if !config.spatial_reference.is_wgs84() {
        info!(
            "Coordinates stay geographic WGS84; {} is declared on the output only",
            config.spatial_reference
        );
    }

    let sink = create_sink(&config.output_path, config.spatial_reference)?;
    let (summary, sink) = write_collection(config, sink)?;

    Ok(ImportOutcome {
        summary,
        sink,
        elapsed: start_time.elapsed(),
    })
}

/// Walk the input into `sink` and close it, discarding the output on failure
fn write_collection(
    config: &ImportConfig,
    mut sink: Box<dyn FeatureSink>,
) -> Result<(ImportSummary, SinkReport)> {
    let result = DirectoryProcessor::from_config(config)
        .run(sink.as_mut())
        .and_then(|summary| Ok((summary, sink.finish()?)));

    if result.is_err() {
        discard_partial_output(&config.output_path);
    }
    result
}

/// Remove an output (and its sidecar) left behind by a failed run
fn discard_partial_output(output: &Path) {
    for path in [output.to_path_buf(), ColumnarSink::sidecar_path(output)] {
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => debug!("Removed partial output {}", path.display()),
            Err(e) => warn!("Failed to remove partial output {}: {}", path.display(), e),
        }
    }
}

fn print_human_summary(config: &ImportConfig, outcome: &ImportOutcome) {
    let totals = outcome.summary.totals();

    println!("\n{}", "ARGOS Import Complete".bright_green().bold());
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        config.output_path.display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Spatial reference:".bright_cyan(),
        config.spatial_reference
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        outcome.summary.files_processed().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Features written:".bright_cyan(),
        outcome
            .sink
            .features_written
            .to_string()
            .bright_white()
            .bold()
    );
    if totals.records_skipped > 0 {
        println!(
            "  {} {} ({} bad coordinates, {} short records, {} unpaired headers)",
            "Records skipped:".bright_yellow(),
            totals.records_skipped.to_string().bright_yellow().bold(),
            totals.malformed_coordinates,
            totals.malformed_records,
            totals.missing_pair_lines
        );
    }
    println!(
        "  {} {}",
        "Output size:".bright_cyan(),
        format_size(outcome.sink.bytes_written)
    );
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(outcome.elapsed)
    );
    println!();
}
