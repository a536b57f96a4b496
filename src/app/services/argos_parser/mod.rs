//! ARGOS two-line record parser
//!
//! ARGOS exports describe each fix with a header line carrying the tag,
//! date, time and location class, followed by a line carrying the
//! hemisphere-suffixed coordinates:
//!
//! ```text
//!  20616  Date : 21.07.97 09:47:40  LC : 3  IQ : 66
//!       Lat1 : 34.213N  Lon1 : 77.405W  Lat2 : 34.213N  Lon2 : 77.405W
//! ```
//!
//! ## Architecture
//!
//! - [`layout`] - Fixed token positions for each supported line layout
//! - [`coordinate`] - Hemisphere token to signed decimal degrees
//! - [`record_parser`] - Header + location pair to [`Observation`]
//! - [`file_walker`] - Lazy iterator pairing lines within one file
//! - [`stats`] - Accepted/skipped counters for diagnostics
//!
//! Malformed pairs are discarded, never partially emitted. The only errors
//! the walker yields are I/O failures.
//!
//! ## Usage
//!
//! ```rust
//! use argos_importer::app::services::argos_parser::ObservationReader;
//!
//! let text = " 20616  Date : 21.07.97 09:47:40  LC : 3  IQ : 66\n      Lat1 : 34.213N  Lon1 : 77.405W\n";
//! let mut reader = ObservationReader::new(text.as_bytes());
//! let observations: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();
//!
//! assert_eq!(observations.len(), 1);
//! assert_eq!(observations[0].longitude, -77.405);
//! assert_eq!(reader.stats().observations_parsed, 1);
//! ```
//!
//! [`Observation`]: crate::app::models::Observation

pub mod coordinate;
pub mod file_walker;
pub mod layout;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use coordinate::{Axis, parse_coordinate};
pub use file_walker::ObservationReader;
pub use layout::{HeaderFields, LocationFields, RecordLayout};
pub use record_parser::extract_observation;
pub use stats::ParseStats;

/// Reasons a header/location pair is discarded
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Coordinate token is not a number once its hemisphere letter is removed
    #[error("malformed coordinate '{token}': {reason}")]
    MalformedCoordinate { token: String, reason: String },

    /// Header or location line is missing expected fields
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// Header line is the last line of the file
    #[error("header line has no following location line")]
    MissingPairLine,
}

impl RecordError {
    pub fn malformed_coordinate(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCoordinate {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_record(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}
