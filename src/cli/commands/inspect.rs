//! Inspect command implementation
//!
//! Walks an export directory into memory and reports, per tag, how many
//! fixes were accepted, their location classes and the time span covered.
//! Nothing is written to disk.

use super::shared::{print_json, setup_logging};
use crate::Result;
use crate::app::models::PointFeature;
use crate::app::services::directory_processor::{DirectoryProcessor, ImportSummary};
use crate::app::services::feature_sink::MemorySink;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::validate_input_dir;
use chrono::NaiveDateTime;
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Accepted fixes for one tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagReport {
    pub tag_id: i64,
    pub fixes: usize,
    /// Fix count per location class
    pub location_classes: BTreeMap<String, usize>,
    pub first_fix: Option<NaiveDateTime>,
    pub last_fix: Option<NaiveDateTime>,
}

impl TagReport {
    fn new(tag_id: i64) -> Self {
        Self {
            tag_id,
            fixes: 0,
            location_classes: BTreeMap::new(),
            first_fix: None,
            last_fix: None,
        }
    }

    fn add(&mut self, feature: &PointFeature) {
        self.fixes += 1;
        *self
            .location_classes
            .entry(feature.location_class.clone())
            .or_insert(0) += 1;

        if let Some(ts) = feature.timestamp() {
            self.first_fix = Some(self.first_fix.map_or(ts, |first| first.min(ts)));
            self.last_fix = Some(self.last_fix.map_or(ts, |last| last.max(ts)));
        }
    }
}

/// Result of inspecting a directory
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub summary: ImportSummary,
    pub tags: Vec<TagReport>,
}

/// Group features by tag, ordered by tag ID
pub fn summarize_tags(features: &[PointFeature]) -> Vec<TagReport> {
    let mut tags: BTreeMap<i64, TagReport> = BTreeMap::new();
    for feature in features {
        tags.entry(feature.tag_id)
            .or_insert_with(|| TagReport::new(feature.tag_id))
            .add(feature);
    }
    tags.into_values().collect()
}

/// Parse every file under `input_dir` without writing output
pub fn inspect_directory(input_dir: &Path) -> Result<InspectionReport> {
    validate_input_dir(input_dir)?;

    let mut sink = MemorySink::default();
    let summary = DirectoryProcessor::new(input_dir).run(&mut sink)?;
    let features = sink.into_features();
    let tags = summarize_tags(&features);
    info!(
        "Inspected {} files: {} fixes from {} tags",
        summary.files_processed(),
        features.len(),
        tags.len()
    );

    Ok(InspectionReport { summary, tags })
}

/// Inspect command runner
pub fn run_inspect(args: InspectArgs) -> Result<ImportSummary> {
    setup_logging(args.get_log_level())?;

    let report = inspect_directory(&args.input_dir)?;
    match args.format {
        OutputFormat::Human => print_human_report(&args.input_dir, &report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(report.summary)
}

fn print_human_report(input_dir: &Path, report: &InspectionReport) {
    let totals = report.summary.totals();

    println!(
        "\n{} {}",
        "ARGOS export:".bright_green().bold(),
        input_dir.display()
    );
    println!(
        "  {} {} files, {} lines, {} headers",
        "Scanned:".bright_cyan(),
        report.summary.files_processed(),
        totals.lines_read,
        totals.headers_found
    );
    println!(
        "  {} {} ({:.1}%)",
        "Accepted fixes:".bright_cyan(),
        totals.observations_parsed.to_string().bright_white().bold(),
        totals.success_rate()
    );
    if totals.records_skipped > 0 {
        println!(
            "  {} {}",
            "Skipped records:".bright_yellow(),
            totals.records_skipped.to_string().bright_yellow()
        );
        for error in totals.errors.iter().take(5) {
            println!("    {}", error.dimmed());
        }
    }

    if report.tags.is_empty() {
        println!();
        return;
    }

    println!("\n  {}", "Tags".bright_green().bold());
    for tag in &report.tags {
        let classes = tag
            .location_classes
            .iter()
            .map(|(class, count)| format!("{}:{}", class, count))
            .collect::<Vec<_>>()
            .join(" ");
        let span = match (tag.first_fix, tag.last_fix) {
            (Some(first), Some(last)) => format!("{} .. {}", first, last),
            _ => "-".to_string(),
        };
        println!(
            "  {:>10}  {:>6} fixes  LC [{}]  {}",
            tag.tag_id.to_string().bright_white(),
            tag.fixes,
            classes,
            span
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::NaiveDate;
    use geo_types::Point;
    use std::fs;
    use tempfile::TempDir;

    fn feature(tag_id: i64, lc: &str, date: &str) -> PointFeature {
        PointFeature {
            geometry: Point::new(0.0, 0.0),
            tag_id,
            location_class: lc.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_summarize_tags() {
        let features = vec![
            feature(20617, "A", "22/07/97 10:00:00"),
            feature(20616, "3", "21/07/97 09:47:40"),
            feature(20616, "3", "20/07/97 08:00:00"),
            feature(20616, "B", "23/07/97 23:59:59"),
        ];

        let tags = summarize_tags(&features);
        assert_eq!(tags.len(), 2);

        let first = &tags[0];
        assert_eq!(first.tag_id, 20616);
        assert_eq!(first.fixes, 3);
        assert_eq!(first.location_classes.get("3"), Some(&2));
        assert_eq!(first.location_classes.get("B"), Some(&1));
        assert_eq!(
            first.first_fix,
            NaiveDate::from_ymd_opt(1997, 7, 20).and_then(|d| d.and_hms_opt(8, 0, 0))
        );
        assert_eq!(
            first.last_fix,
            NaiveDate::from_ymd_opt(1997, 7, 23).and_then(|d| d.and_hms_opt(23, 59, 59))
        );
        assert_eq!(tags[1].tag_id, 20617);
    }

    #[test]
    fn test_unparseable_dates_still_counted() {
        let tags = summarize_tags(&[feature(1, "Z", "99/99/99 99:99:99")]);
        assert_eq!(tags[0].fixes, 1);
        assert!(tags[0].first_fix.is_none());
        assert!(tags[0].last_fix.is_none());
    }

    #[test]
    fn test_inspect_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("tag.txt"),
            " 1234  Date : 01.02.20 03:04:05  LC : 7  IQ : 00\n      Lat1 : 12.5N  Lon1 : 45.5E  Lat2 : 12.6N  Lon2 : 45.4E\n",
        )
        .unwrap();

        let report = inspect_directory(temp_dir.path()).unwrap();
        assert_eq!(report.summary.observations(), 1);
        assert_eq!(report.tags.len(), 1);
        assert_eq!(report.tags[0].tag_id, 1234);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tags"][0]["first_fix"], "2020-02-01T03:04:05");
    }

    #[test]
    fn test_inspect_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = inspect_directory(&temp_dir.path().join("nope"));
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }
}
