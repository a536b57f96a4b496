//! Walks an ARGOS export directory into a feature sink
//!
//! Every regular file directly inside the input directory is scanned, except
//! the excluded `README.txt`, which is never opened. Files are visited in
//! file-name order and each one is closed before the next is opened.

use crate::app::models::PointFeature;
use crate::app::services::argos_parser::{ObservationReader, ParseStats, RecordLayout};
use crate::app::services::feature_sink::FeatureSink;
use crate::config::{ImportConfig, validate_input_dir};
use crate::constants::EXCLUDED_FILE_NAME;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Parse results for one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub stats: ParseStats,
}

/// Outcome of a directory run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub files: Vec<FileReport>,
}

impl ImportSummary {
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    /// Observations handed to the sink across all files
    pub fn observations(&self) -> usize {
        self.files.iter().map(|f| f.stats.observations_parsed).sum()
    }

    pub fn records_skipped(&self) -> usize {
        self.files.iter().map(|f| f.stats.records_skipped).sum()
    }

    /// All per-file counters folded together
    pub fn totals(&self) -> ParseStats {
        let mut totals = ParseStats::new();
        for report in &self.files {
            totals.merge(&report.stats);
        }
        totals
    }
}

/// Sequential directory importer
#[derive(Debug, Clone)]
pub struct DirectoryProcessor {
    input_dir: PathBuf,
    excluded_file_name: String,
    layout: RecordLayout,
    show_progress: bool,
}

impl DirectoryProcessor {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            excluded_file_name: EXCLUDED_FILE_NAME.to_string(),
            layout: RecordLayout::default(),
            show_progress: false,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(&config.input_dir)
            .with_excluded_file_name(&config.excluded_file_name)
            .with_progress(config.show_progress)
    }

    pub fn with_excluded_file_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_file_name = name.into();
        self
    }

    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == self.excluded_file_name.as_str())
    }

    /// List the files a run would scan, in processing order
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        validate_input_dir(&self.input_dir)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                Error::directory_traversal(
                    format!("Failed to list '{}'", self.input_dir.display()),
                    e,
                )
            })?;
            let path = entry.path();

            // name check first: the excluded file is never touched
            if self.is_excluded(path) {
                debug!("Skipping excluded file {}", path.display());
                continue;
            }
            if !path.is_file() {
                debug!("Skipping non-file entry {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        debug!(
            "Found {} input files in {}",
            files.len(),
            self.input_dir.display()
        );
        Ok(files)
    }

    /// Scan every input file and append its observations to `sink`
    pub fn run(&self, sink: &mut dyn FeatureSink) -> Result<ImportSummary> {
        let files = self.discover_files()?;
        let progress = self.progress_bar(files.len() as u64);

        let mut summary = ImportSummary::default();
        for path in &files {
            info!("Processing {}", path.display());
            progress.set_message(display_name(path));

            let stats = self.process_file(path, sink)?;
            debug!(
                "{}: {} observations, {} records skipped",
                path.display(),
                stats.observations_parsed,
                stats.records_skipped
            );
            summary.files.push(FileReport {
                file: path.clone(),
                stats,
            });
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Imported {} observations from {} files ({} records skipped)",
            summary.observations(),
            summary.files_processed(),
            summary.records_skipped()
        );
        Ok(summary)
    }

    fn process_file(&self, path: &Path, sink: &mut dyn FeatureSink) -> Result<ParseStats> {
        let mut reader = ObservationReader::open(path)?.with_layout(self.layout);
        for observation in reader.by_ref() {
            sink.append(PointFeature::from(observation?))?;
        }
        Ok(reader.into_stats())
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
