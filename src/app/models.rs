//! Data models for ARGOS processing
//!
//! This module contains the observation parsed from a header/location line
//! pair and the point feature handed to the output sink.

use crate::constants::{ARGOS_DATETIME_FORMAT, FEATURE_DATETIME_FORMAT};
use chrono::NaiveDateTime;
use geo_types::Point;
use serde::{Deserialize, Serialize};

// =============================================================================
// Observation
// =============================================================================

/// One ARGOS fix, built from a header line and its following location line
///
/// Observations are transient: the parser builds one per valid pair and the
/// caller converts it into a [`PointFeature`] straight away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Platform (tag) identifier, first header token
    pub tag_id: i64,

    /// Location class quality code (e.g. "3", "A", "Z")
    pub location_class: String,

    /// Raw date token, `DD.MM.YY`
    pub date: String,

    /// Raw time token, `HH:MM:SS`
    pub time: String,

    /// Signed decimal degrees, north positive
    pub latitude: f64,

    /// Signed decimal degrees, east positive
    pub longitude: f64,
}

impl Observation {
    /// Date and time as written to the `Date` field: `DD/MM/YY HH:MM:SS`
    pub fn formatted_date(&self) -> String {
        format!("{} {}", self.date.replace('.', "/"), self.time)
    }

    /// Parsed timestamp, if the raw tokens form a valid date and time
    ///
    /// The raw text stays authoritative; a fix with an unparseable date is
    /// still written.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(
            &format!("{} {}", self.date, self.time),
            ARGOS_DATETIME_FORMAT,
        )
        .ok()
    }

    /// Point geometry in geographic WGS84, x = longitude
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

// =============================================================================
// Point Feature
// =============================================================================

/// Record appended to the output feature collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    /// x = longitude, y = latitude
    pub geometry: Point<f64>,
    pub tag_id: i64,
    pub location_class: String,
    pub date: String,
}

impl PointFeature {
    /// Parsed `Date` field, if it holds a valid date and time
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, FEATURE_DATETIME_FORMAT).ok()
    }
}

impl From<&Observation> for PointFeature {
    fn from(observation: &Observation) -> Self {
        Self {
            geometry: observation.point(),
            tag_id: observation.tag_id,
            location_class: observation.location_class.clone(),
            date: observation.formatted_date(),
        }
    }
}

impl From<Observation> for PointFeature {
    fn from(observation: Observation) -> Self {
        Self {
            geometry: observation.point(),
            date: observation.formatted_date(),
            tag_id: observation.tag_id,
            location_class: observation.location_class,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample_observation() -> Observation {
        Observation {
            tag_id: 1234,
            location_class: "7".to_string(),
            date: "01.02.20".to_string(),
            time: "03:04:05".to_string(),
            latitude: 12.5,
            longitude: 45.5,
        }
    }

    #[test]
    fn test_formatted_date_replaces_dots() {
        assert_eq!(sample_observation().formatted_date(), "01/02/20 03:04:05");
    }

    #[test]
    fn test_timestamp_parsing() {
        let ts = sample_observation().timestamp().unwrap();
        assert_eq!(ts.year(), 2020);
        assert_eq!(ts.month(), 2);
        assert_eq!(ts.day(), 1);
        assert_eq!(ts.hour(), 3);
        assert_eq!(ts.second(), 5);
    }

    #[test]
    fn test_timestamp_invalid_date_is_none() {
        let mut observation = sample_observation();
        observation.date = "31.02.20".to_string();
        assert!(observation.timestamp().is_none());
        // still formats the raw text
        assert_eq!(observation.formatted_date(), "31/02/20 03:04:05");
    }

    #[test]
    fn test_point_feature_from_observation() {
        let feature = PointFeature::from(&sample_observation());
        assert_eq!(feature.geometry, Point::new(45.5, 12.5));
        assert_eq!(feature.tag_id, 1234);
        assert_eq!(feature.location_class, "7");
        assert_eq!(feature.date, "01/02/20 03:04:05");
        assert_eq!(feature.timestamp(), sample_observation().timestamp());
    }

    #[test]
    fn test_point_axis_order() {
        let mut observation = sample_observation();
        observation.latitude = -33.9;
        observation.longitude = 18.4;
        let point = observation.point();
        assert_eq!(point.x(), 18.4);
        assert_eq!(point.y(), -33.9);
    }
}
