//! Configuration management and validation.
//!
//! The importer takes exactly three parameters: the ARGOS export directory,
//! the output container location and the output spatial reference. They are
//! collected into [`ImportConfig`] and validated before any file is touched.

use crate::app::services::feature_sink::SinkFormat;
use crate::constants::{DEFAULT_OUTPUT_EPSG, EXCLUDED_FILE_NAME, INPUT_EPSG};
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

static EPSG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:epsg)?:{0,2}(\d{4,6})$").expect("EPSG pattern is a valid regex")
});

/// Spatial reference identified by an EPSG code
///
/// Accepts `EPSG:3857`, `epsg:3857` or a bare `3857`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference {
    epsg: u32,
}

impl SpatialReference {
    /// Create a spatial reference from an EPSG code
    pub fn from_epsg(epsg: u32) -> Self {
        Self { epsg }
    }

    /// Geographic WGS84, the reference every ARGOS fix is reported in
    pub fn wgs84() -> Self {
        Self::from_epsg(INPUT_EPSG)
    }

    /// EPSG code
    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    /// True when this is the input reference, so no reprojection is implied
    pub fn is_wgs84(&self) -> bool {
        self.epsg == INPUT_EPSG
    }

    /// Authority string, e.g. `EPSG:4326`
    pub fn authority_code(&self) -> String {
        format!("EPSG:{}", self.epsg)
    }

    /// OGC URN form used by the GeoJSON `crs` member
    pub fn ogc_urn(&self) -> String {
        format!("urn:ogc:def:crs:EPSG::{}", self.epsg)
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::from_epsg(DEFAULT_OUTPUT_EPSG)
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

impl FromStr for SpatialReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let captures = EPSG_PATTERN.captures(trimmed).ok_or_else(|| {
            Error::configuration(format!(
                "Invalid spatial reference '{}' (expected 'EPSG:<code>' or '<code>')",
                s
            ))
        })?;

        let epsg = captures[1].parse::<u32>().map_err(|e| {
            Error::configuration(format!("Invalid EPSG code in '{}': {}", s, e))
        })?;

        Ok(Self::from_epsg(epsg))
    }
}

/// Configuration for one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory holding the ARGOS export files
    pub input_dir: PathBuf,

    /// Output container; the extension selects the backend
    pub output_path: PathBuf,

    /// Spatial reference declared on the output container
    pub spatial_reference: SpatialReference,

    /// File name in the input directory that is never scanned
    pub excluded_file_name: String,

    /// Show a progress bar while walking files
    pub show_progress: bool,
}

impl ImportConfig {
    /// Create a configuration with the default exclusion and progress display
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        spatial_reference: SpatialReference,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            spatial_reference,
            excluded_file_name: EXCLUDED_FILE_NAME.to_string(),
            show_progress: true,
        }
    }

    /// Output backend implied by the output path extension
    pub fn sink_format(&self) -> Result<SinkFormat> {
        SinkFormat::from_path(&self.output_path)
    }

    /// Validate paths and output format before processing
    pub fn validate(&self) -> Result<()> {
        validate_input_dir(&self.input_dir)?;

        if self.output_path.as_os_str().is_empty() {
            return Err(Error::configuration("Output path must not be empty"));
        }
        if self.output_path.is_dir() {
            return Err(Error::configuration(format!(
                "Output path '{}' is a directory; expected a file such as tracks.geojson",
                self.output_path.display()
            )));
        }

        let format = self.sink_format()?;
        debug!(
            "Validated configuration: input={}, output={} ({:?}), reference={}",
            self.input_dir.display(),
            self.output_path.display(),
            format,
            self.spatial_reference
        );
        Ok(())
    }

    /// Create the output's parent directory if it doesn't exist
    pub fn ensure_output_directory(&self) -> Result<()> {
        match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create output directory '{}'", parent.display()),
                        e,
                    )
                })
            }
            _ => Ok(()),
        }
    }
}

/// Check that the input path exists and is a directory
pub fn validate_input_dir(input_dir: &Path) -> Result<()> {
    if input_dir.is_dir() {
        Ok(())
    } else {
        Err(Error::input_not_found(input_dir))
    }
}
