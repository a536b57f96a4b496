//! Header/location pair to observation conversion
//!
//! Fields are taken by position from whitespace-split tokens according to
//! the [`RecordLayout`]. Any missing field or bad coordinate discards the
//! pair as a whole.

use super::RecordError;
use super::coordinate::{Axis, parse_coordinate};
use super::layout::{HeaderFields, LocationFields, RecordLayout};
use crate::app::models::Observation;

/// Build one observation from a header line and the line that follows it
pub fn extract_observation(
    header_line: &str,
    location_line: &str,
    layout: &RecordLayout,
) -> Result<Observation, RecordError> {
    match layout {
        RecordLayout::DateLocation { header, location } => {
            extract_date_location(header_line, location_line, header, location)
        }
    }
}

fn extract_date_location(
    header_line: &str,
    location_line: &str,
    header: &HeaderFields,
    location: &LocationFields,
) -> Result<Observation, RecordError> {
    let header_tokens = tokenize(header_line, header.min_tokens(), "header")?;
    let location_tokens = tokenize(location_line, location.min_tokens(), "location")?;

    let tag_token = header_tokens[header.tag_id];
    let tag_id = tag_token.parse::<i64>().map_err(|_| {
        RecordError::malformed_record(format!("tag id '{}' is not an integer", tag_token))
    })?;

    let latitude = parse_coordinate(location_tokens[location.latitude], Axis::Latitude)?;
    let longitude = parse_coordinate(location_tokens[location.longitude], Axis::Longitude)?;

    Ok(Observation {
        tag_id,
        location_class: header_tokens[header.location_class].to_string(),
        date: header_tokens[header.date].to_string(),
        time: header_tokens[header.time].to_string(),
        latitude,
        longitude,
    })
}

/// Split on whitespace, requiring at least `min_tokens` tokens
fn tokenize<'a>(
    line: &'a str,
    min_tokens: usize,
    line_kind: &str,
) -> Result<Vec<&'a str>, RecordError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < min_tokens {
        return Err(RecordError::malformed_record(format!(
            "{} line has {} tokens, expected at least {}",
            line_kind,
            tokens.len(),
            min_tokens
        )));
    }
    Ok(tokens)
}
