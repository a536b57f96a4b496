//! Hemisphere-suffixed coordinate parsing
//!
//! ARGOS writes coordinates as an unsigned magnitude followed by a hemisphere
//! letter (`34.213N`, `77.405W`). Northern and eastern values are positive.

use super::RecordError;
use crate::constants::{EAST, NORTH, SOUTH, WEST};

/// Which coordinate a token holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Suffix that keeps the value positive
    pub fn positive_suffix(self) -> char {
        match self {
            Axis::Latitude => NORTH,
            Axis::Longitude => EAST,
        }
    }

    /// Suffix that negates the value
    pub fn negative_suffix(self) -> char {
        match self {
            Axis::Latitude => SOUTH,
            Axis::Longitude => WEST,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

/// Convert a hemisphere-suffixed token into signed decimal degrees
///
/// The trailing letter is stripped and the remainder parsed as a float,
/// negated unless the letter is the axis' positive suffix. Letters match in
/// either case. A token whose letter is not one of the axis' two hemispheres,
/// or whose remainder is not a finite number, is a
/// [`RecordError::MalformedCoordinate`].
pub fn parse_coordinate(token: &str, axis: Axis) -> Result<f64, RecordError> {
    let mut chars = token.chars();
    let suffix = chars
        .next_back()
        .ok_or_else(|| RecordError::malformed_coordinate(token, "empty token"))?;
    let magnitude = chars.as_str();

    let value = magnitude.parse::<f64>().map_err(|e| {
        RecordError::malformed_coordinate(
            token,
            format!("{} '{}' is not a number ({})", axis.name(), magnitude, e),
        )
    })?;

    if !value.is_finite() {
        return Err(RecordError::malformed_coordinate(
            token,
            format!("{} is not finite", axis.name()),
        ));
    }

    if suffix.eq_ignore_ascii_case(&axis.positive_suffix()) {
        Ok(value)
    } else if suffix.eq_ignore_ascii_case(&axis.negative_suffix()) {
        Ok(-value)
    } else {
        Err(RecordError::malformed_coordinate(
            token,
            format!(
                "unknown {} hemisphere '{}' (expected '{}' or '{}')",
                axis.name(),
                suffix,
                axis.positive_suffix(),
                axis.negative_suffix()
            ),
        ))
    }
}
