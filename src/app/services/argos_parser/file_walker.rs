//! Line pairing over a single ARGOS file
//!
//! [`ObservationReader`] scans lines in order. A line containing the header
//! marker always takes the very next line as its location line, whatever
//! that line holds; if the pair does not parse, scanning resumes after it.

use super::RecordError;
use super::layout::RecordLayout;
use super::record_parser::extract_observation;
use super::stats::ParseStats;
use crate::app::models::Observation;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Lazy, single-pass iterator of observations from one input
///
/// Yields `Err` only for I/O failures, after which it is exhausted.
/// Discarded pairs are counted in [`ParseStats`].
#[derive(Debug)]
pub struct ObservationReader<R> {
    reader: R,
    layout: RecordLayout,
    source: PathBuf,
    stats: ParseStats,
    line_number: usize,
    buffer: Vec<u8>,
    finished: bool,
}

impl ObservationReader<BufReader<File>> {
    /// Open `path` for scanning; the file is closed when the reader drops
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::file_read(path, e))?;
        Ok(Self::new(BufReader::new(file)).with_source(path))
    }
}

impl<R: BufRead> ObservationReader<R> {
    /// Scan any buffered reader with the default layout
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            layout: RecordLayout::default(),
            source: PathBuf::from("<reader>"),
            stats: ParseStats::new(),
            line_number: 0,
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Use a different record layout
    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Name the input for error messages and logs
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Counters so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Consume the reader, returning its counters
    pub fn into_stats(self) -> ParseStats {
        self.stats
    }

    /// Read one line, decoding invalid UTF-8 lossily
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }

        self.line_number += 1;
        self.stats.lines_read += 1;

        let mut end = self.buffer.len();
        while end > 0 && matches!(self.buffer[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        Ok(Some(String::from_utf8_lossy(&self.buffer[..end]).into_owned()))
    }

    fn skip(&mut self, header_line: usize, error: RecordError) {
        debug!(
            "Skipped record at {}:{}: {}",
            self.source.display(),
            header_line,
            error
        );
        self.stats.record_skip(header_line, &error);
    }

    fn fail(&mut self, error: std::io::Error) -> Option<Result<Observation>> {
        self.finished = true;
        Some(Err(Error::file_read(self.source.clone(), error)))
    }
}

impl<R: BufRead> Iterator for ObservationReader<R> {
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let header = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => return self.fail(e),
            };

            if !self.layout.is_header(&header) {
                continue;
            }
            self.stats.headers_found += 1;
            let header_line = self.line_number;

            let location = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.skip(header_line, RecordError::MissingPairLine);
                    self.finished = true;
                    return None;
                }
                Err(e) => return self.fail(e),
            };

            match extract_observation(&header, &location, &self.layout) {
                Ok(observation) => {
                    self.stats.observations_parsed += 1;
                    trace!(
                        "Parsed tag {} at {}:{}",
                        observation.tag_id,
                        self.source.display(),
                        header_line
                    );
                    return Some(Ok(observation));
                }
                Err(e) => self.skip(header_line, e),
            }
        }
    }
}

impl<R: BufRead> FusedIterator for ObservationReader<R> {}
