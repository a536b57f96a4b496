//! Application constants for the ARGOS importer
//!
//! This module contains the fixed markers, file names, field names and
//! defaults used throughout the importer.

// =============================================================================
// Input Format
// =============================================================================

/// Substring that marks a line as an observation header
pub const HEADER_MARKER: &str = "Date :";

/// Notice file shipped with ARGOS exports; never opened or scanned
pub const EXCLUDED_FILE_NAME: &str = "README.txt";

/// Input coordinates are always geographic WGS84
pub const INPUT_EPSG: u32 = 4326;

/// Output spatial reference used when none is given
pub const DEFAULT_OUTPUT_EPSG: u32 = 4326;

/// Positive hemisphere suffix for latitude tokens
pub const NORTH: char = 'N';

/// Negative hemisphere suffix for latitude tokens
pub const SOUTH: char = 'S';

/// Positive hemisphere suffix for longitude tokens
pub const EAST: char = 'E';

/// Negative hemisphere suffix for longitude tokens
pub const WEST: char = 'W';

/// Date/time layout of the header tokens once joined with a space
pub const ARGOS_DATETIME_FORMAT: &str = "%d.%m.%y %H:%M:%S";

/// Layout of the `Date` field written to the output
pub const FEATURE_DATETIME_FORMAT: &str = "%d/%m/%y %H:%M:%S";

// =============================================================================
// Output Schema
// =============================================================================

/// Output field names, in container order
pub mod fields {
    /// Tag identifier (integer)
    pub const TAG_ID: &str = "TagID";

    /// ARGOS location class (text)
    pub const LOCATION_CLASS: &str = "LC";

    /// Observation date and time, "DD/MM/YY HH:MM:SS" (text)
    pub const DATE: &str = "Date";

    /// Geometry column name for columnar outputs
    pub const GEOMETRY: &str = "geometry";

    /// Plain longitude column for columnar outputs
    pub const LONGITUDE: &str = "longitude";

    /// Plain latitude column for columnar outputs
    pub const LATITUDE: &str = "latitude";
}

/// Output file extensions recognised by the sink factory
pub mod extensions {
    pub const GEOJSON: &[&str] = &["geojson", "json"];
    pub const PARQUET: &str = "parquet";
    pub const CSV: &str = "csv";
}

/// Suffix appended to columnar outputs for the spatial reference sidecar
pub const METADATA_SIDECAR_SUFFIX: &str = "meta.json";

// =============================================================================
// Logging
// =============================================================================

/// Log target prefix used by the default `EnvFilter`
pub const LOG_TARGET: &str = "argos_importer";
