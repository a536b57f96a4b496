//! Token positions for ARGOS line layouts
//!
//! Lines are split on whitespace and fields are read by position. The
//! positions live here as tables rather than being scattered through the
//! parser, so another export layout can be added as a new [`RecordLayout`]
//! variant without touching the pairing logic.
//!
//! Two-line Date/Location layout:
//!
//! | line     | index | field           | example    |
//! |----------|-------|-----------------|------------|
//! | header   | 0     | tag id          | `20616`    |
//! | header   | 3     | date            | `21.07.97` |
//! | header   | 4     | time            | `09:47:40` |
//! | header   | 7     | location class  | `3`        |
//! | location | 2     | latitude        | `34.213N`  |
//! | location | 5     | longitude       | `77.405W`  |

use crate::constants::HEADER_MARKER;

/// Field positions on the header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub tag_id: usize,
    pub date: usize,
    pub time: usize,
    pub location_class: usize,
}

impl HeaderFields {
    /// Fewest tokens a header line needs to yield every field
    pub fn min_tokens(&self) -> usize {
        [self.tag_id, self.date, self.time, self.location_class]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Field positions on the location line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationFields {
    pub latitude: usize,
    pub longitude: usize,
}

impl LocationFields {
    /// Fewest tokens a location line needs to yield both coordinates
    pub fn min_tokens(&self) -> usize {
        self.latitude.max(self.longitude) + 1
    }
}

/// Supported record layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// Header line containing `Date :`, coordinates on the next line
    DateLocation {
        header: HeaderFields,
        location: LocationFields,
    },
}

impl RecordLayout {
    /// The standard ARGOS Date/Location layout
    pub const fn date_location() -> Self {
        Self::DateLocation {
            header: HeaderFields {
                tag_id: 0,
                date: 3,
                time: 4,
                location_class: 7,
            },
            location: LocationFields {
                latitude: 2,
                longitude: 5,
            },
        }
    }

    /// Marker substring identifying a header line
    pub fn header_marker(&self) -> &'static str {
        match self {
            Self::DateLocation { .. } => HEADER_MARKER,
        }
    }

    /// Whether `line` starts a record in this layout
    pub fn is_header(&self, line: &str) -> bool {
        line.contains(self.header_marker())
    }
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::date_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_location_minimum_tokens() {
        let RecordLayout::DateLocation { header, location } = RecordLayout::date_location();
        assert_eq!(header.min_tokens(), 8);
        assert_eq!(location.min_tokens(), 6);
    }

    #[test]
    fn test_header_detection() {
        let layout = RecordLayout::default();
        assert!(layout.is_header(" 20616  Date : 21.07.97 09:47:40  LC : 3  IQ : 66"));
        assert!(!layout.is_header("      Lat1 : 34.213N  Lon1 : 77.405W"));
        // marker needs the space before the colon
        assert!(!layout.is_header("20616 Date: 21.07.97 09:47:40 LC : 3"));
    }
}
