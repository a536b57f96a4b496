//! Parsing statistics for ARGOS files
//!
//! Skipped pairs are never reported to the user during an import; these
//! counters exist so the skip policy can be observed by `inspect` and tests.

use super::RecordError;
use serde::{Deserialize, Serialize};

/// Per-file (or merged) record counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical lines read, including consumed location lines
    pub lines_read: usize,

    /// Lines recognised as observation headers
    pub headers_found: usize,

    /// Observations successfully parsed
    pub observations_parsed: usize,

    /// Pairs discarded for any reason
    pub records_skipped: usize,

    /// Discarded because a coordinate token did not parse
    pub malformed_coordinates: usize,

    /// Discarded because a line had too few tokens or a bad tag id
    pub malformed_records: usize,

    /// Discarded because the header was the last line
    pub missing_pair_lines: usize,

    /// Skip reasons, prefixed with the header's line number
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a discarded pair whose header sits on `line_number`
    pub fn record_skip(&mut self, line_number: usize, error: &RecordError) {
        self.records_skipped += 1;
        match error {
            RecordError::MalformedCoordinate { .. } => self.malformed_coordinates += 1,
            RecordError::MalformedRecord { .. } => self.malformed_records += 1,
            RecordError::MissingPairLine => self.missing_pair_lines += 1,
        }
        self.errors.push(format!("Line {}: {}", line_number, error));
    }

    /// Percentage of headers that produced an observation
    pub fn success_rate(&self) -> f64 {
        if self.headers_found == 0 {
            0.0
        } else {
            (self.observations_parsed as f64 / self.headers_found as f64) * 100.0
        }
    }

    /// Add another file's counters into this one
    pub fn merge(&mut self, other: &ParseStats) {
        self.lines_read += other.lines_read;
        self.headers_found += other.headers_found;
        self.observations_parsed += other.observations_parsed;
        self.records_skipped += other.records_skipped;
        self.malformed_coordinates += other.malformed_coordinates;
        self.malformed_records += other.malformed_records;
        self.missing_pair_lines += other.missing_pair_lines;
        self.errors.extend(other.errors.iter().cloned());
    }
}
