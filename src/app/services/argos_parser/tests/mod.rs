//! Test utilities for ARGOS parser testing
//!
//! Sample lines follow the layout of ARGOS DIAG exports, including the
//! unrelated diagnostic lines that sit between records.

use std::io::Write;
use tempfile::NamedTempFile;


pub const HEADER_A: &str = " 1234  Date : 01.02.20 03:04:05  LC : 7  IQ : 66";
pub const LOCATION_A: &str = "      Lat1 : 12.5N  Lon1 : 45.5E  Lat2 : 12.6N  Lon2 : 45.4E";

pub const HEADER_B: &str = " 20616  Date : 21.07.97 09:47:40  LC : 3  IQ : 66";
pub const LOCATION_B: &str = "      Lat1 : 34.213N  Lon1 : 77.405W  Lat2 : 34.213N  Lon2 : 77.405W";

/// A realistic export with two good fixes, one bad coordinate and noise lines
pub fn create_test_argos_export() -> String {
    [
        "20616  29051  Nb mes : 004  Nb mes>-120dB: 000  Best level : -133 dB",
        HEADER_B,
        LOCATION_B,
        "      Alt1 : 0.00 m    Alt2 : 0.00 m",
        "      Pass duration : 121s   NOPC : 1",
        " 20616  Date : 22.07.97 10:12:03  LC : B  IQ : 00",
        "      Lat1 : 34.3?9N  Lon1 : 77.401W  Lat2 : 34.210N  Lon2 : 77.405W",
        "      Calcul freq : 401 650000.0 Hz   Altitude : 0 m",
        " 20617  Date : 23.07.97 11:00:00  LC : A  IQ : 00",
        "      Lat1 : 10.000S  Lon1 : 20.250E  Lat2 : 10.000S  Lon2 : 20.250E",
    ]
    .join("\n")
}

/// Join lines with a trailing newline
pub fn lines(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
