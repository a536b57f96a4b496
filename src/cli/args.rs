//! Command-line argument definitions for the ARGOS importer
//!
//! The interface is defined with the clap derive API. `import` collects the
//! three run parameters (input directory, output container, spatial
//! reference); `inspect` walks an export without writing anything.

use crate::config::{ImportConfig, SpatialReference};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ARGOS telemetry importer
///
/// Converts directories of ARGOS satellite telemetry exports into a point
/// feature collection with one feature per location fix.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "argos-importer",
    version,
    about = "Import ARGOS wildlife telemetry exports into a point feature collection",
    long_about = "Reads every file of an ARGOS export directory (except README.txt), pairs each \
                  observation header line with the coordinate line that follows it, and writes one \
                  point feature per valid fix with its tag ID, location class and date. Malformed \
                  records are skipped and counted. Output format follows the output extension: \
                  .geojson/.json, .parquet or .csv."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import an ARGOS export directory into a feature collection
    Import(ImportArgs),
    /// Report per-tag fix counts without writing output
    Inspect(InspectArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Directory holding the ARGOS export files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output container; the extension selects the format
    ///
    /// Supported: .geojson or .json (GeoJSON FeatureCollection), .parquet and
    /// .csv (with a `<output>.meta.json` sidecar carrying the spatial reference).
    /// An existing file is overwritten.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Spatial reference declared on the output
    ///
    /// Coordinates are always written as geographic WGS84 values; this only
    /// sets the reference recorded on the container.
    #[arg(
        short = 's',
        long = "spatial-reference",
        value_name = "EPSG",
        default_value = "EPSG:4326",
        help = "Output spatial reference (EPSG:nnnn or nnnn)"
    )]
    pub spatial_reference: SpatialReference,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Also hides the progress bar and the summary.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Format of the run summary
    #[arg(
        long = "summary",
        value_enum,
        default_value = "human",
        help = "Summary format printed after the import"
    )]
    pub summary: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Directory holding the ARGOS export files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Report format
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl ImportArgs {
    /// Get log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the run configuration
    pub fn to_config(&self) -> ImportConfig {
        let mut config = ImportConfig::new(&self.input_dir, &self.output, self.spatial_reference);
        config.show_progress = self.show_progress();
        config
    }
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
