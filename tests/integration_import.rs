//! End-to-end import tests
//!
//! Each test builds a small ARGOS export directory in a temporary location,
//! runs a full import and reads the written container back.

use argos_importer::app::services::feature_sink::{ColumnarSink, MemorySink};
use argos_importer::app::services::directory_processor::DirectoryProcessor;
use argos_importer::cli::commands::import::import_directory;
use argos_importer::cli::commands::inspect::inspect_directory;
use argos_importer::{Error, ImportConfig, SpatialReference};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER_A: &str = " 1234  Date : 01.02.20 03:04:05  LC : 7  IQ : 66";
const LOCATION_A: &str = "      Lat1 : 12.5N  Lon1 : 45.5E  Lat2 : 12.6N  Lon2 : 45.4E";
const LOCATION_BAD: &str = "      Lat1 : 12.5X  Lon1 : 45.5E  Lat2 : 12.6N  Lon2 : 45.4E";

/// Two days of fixes for one tag, with diagnostic noise between records
const TAG_20616: &str = "\
20616  29051  Nb mes : 004  Nb mes>-120dB: 000  Best level : -133 dB
 20616  Date : 21.07.97 09:47:40  LC : 3  IQ : 66
      Lat1 : 34.213N  Lon1 : 77.405W  Lat2 : 34.213N  Lon2 : 77.405W
      Alt1 : 0.00 m    Alt2 : 0.00 m
 20616  Date : 22.07.97 10:12:03  LC : B  IQ : 00
      Lat1 : 34.251S  Lon1 : 77.401E  Lat2 : 34.210N  Lon2 : 77.405W
";

fn write_export(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn read_geojson(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Single valid record becomes a single feature
#[test]
fn test_single_record_to_geojson() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export");
    fs::create_dir(&input).unwrap();
    write_export(&input, &[("tag1234.txt", format!("{HEADER_A}\n{LOCATION_A}\n").as_str())]);

    let output = temp_dir.path().join("tracks.geojson");
    let config = ImportConfig::new(&input, &output, SpatialReference::wgs84());
    let outcome = import_directory(&config).unwrap();
    assert_eq!(outcome.sink.features_written, 1);

    let collection = read_geojson(&output);
    let features = collection["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);

    let feature = &features[0];
    assert_eq!(feature["geometry"]["type"], "Point");
    assert_eq!(feature["geometry"]["coordinates"][0], 45.5);
    assert_eq!(feature["geometry"]["coordinates"][1], 12.5);
    assert_eq!(feature["properties"]["TagID"], 1234);
    assert_eq!(feature["properties"]["LC"], "7");
    assert_eq!(feature["properties"]["Date"], "01/02/20 03:04:05");
}

/// An unknown hemisphere letter drops the record without failing the run
#[test]
fn test_invalid_hemisphere_yields_no_features() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export");
    fs::create_dir(&input).unwrap();
    write_export(&input, &[("tag1234.txt", format!("{HEADER_A}\n{LOCATION_BAD}\n").as_str())]);

    let output = temp_dir.path().join("tracks.geojson");
    let config = ImportConfig::new(&input, &output, SpatialReference::wgs84());
    let outcome = import_directory(&config).unwrap();

    assert_eq!(outcome.sink.features_written, 0);
    assert_eq!(outcome.summary.totals().malformed_coordinates, 1);
    assert!(read_geojson(&output)["features"].as_array().unwrap().is_empty());
}

/// README.txt is ignored even when it looks like a valid export
#[test]
fn test_readme_ignored_in_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export");
    fs::create_dir(&input).unwrap();
    write_export(
        &input,
        &[
            ("README.txt", format!("{HEADER_A}\n{LOCATION_A}\n").as_str()),
            ("tag20616.txt", TAG_20616),
        ],
    );

    let output = temp_dir.path().join("tracks.geojson");
    let config = ImportConfig::new(&input, &output, SpatialReference::wgs84());
    let outcome = import_directory(&config).unwrap();

    assert_eq!(outcome.summary.files_processed(), 1);
    assert_eq!(outcome.sink.features_written, 2);

    let collection = read_geojson(&output);
    let features = collection["features"].as_array().unwrap();
    let tags: Vec<i64> = features
        .iter()
        .map(|f| f["properties"]["TagID"].as_i64().unwrap())
        .collect();
    assert_eq!(tags, vec![20616, 20616]);

    // stable order within the file
    assert_eq!(features[0]["properties"]["Date"], "21/07/97 09:47:40");
    assert_eq!(features[0]["geometry"]["coordinates"][0], -77.405);
    assert_eq!(features[1]["properties"]["LC"], "B");
    assert_eq!(features[1]["geometry"]["coordinates"][0], 77.401);
    assert_eq!(features[1]["geometry"]["coordinates"][1], -34.251);
}

#[test]
fn test_parquet_output_with_declared_reference() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export");
    fs::create_dir(&input).unwrap();
    write_export(
        &input,
        &[
            ("a.txt", format!("{HEADER_A}\n{LOCATION_A}\n").as_str()),
            ("b.txt", TAG_20616),
        ],
    );

    let output = temp_dir.path().join("out").join("tracks.parquet");
    let config = ImportConfig::new(&input, &output, SpatialReference::from_epsg(3857));
    let outcome = import_directory(&config).unwrap();
    assert_eq!(outcome.sink.features_written, 3);

    let frame = ParquetReader::new(fs::File::open(&output).unwrap())
        .finish()
        .unwrap();
    assert_eq!(frame.height(), 3);

    // coordinates stay geographic whatever reference is declared
    let lats: Vec<Option<f64>> = frame
        .column("latitude")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(lats, vec![Some(12.5), Some(34.213), Some(-34.251)]);

    let sidecar: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(ColumnarSink::sidecar_path(&output)).unwrap(),
    )
    .unwrap();
    assert_eq!(sidecar["crs"], "EPSG:3857");
    assert_eq!(sidecar["feature_count"], 3);
}

#[test]
fn test_csv_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export");
    fs::create_dir(&input).unwrap();
    write_export(&input, &[("tag.txt", TAG_20616)]);

    let output = temp_dir.path().join("tracks.csv");
    let config = ImportConfig::new(&input, &output, SpatialReference::wgs84());
    import_directory(&config).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = content.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("20616,3,21/07/97 09:47:40,"));
}

#[test]
fn test_existing_output_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export");
    fs::create_dir(&input).unwrap();
    write_export(&input, &[("tag.txt", format!("{HEADER_A}\n{LOCATION_A}\n").as_str())]);

    let output = temp_dir.path().join("tracks.geojson");
    let config = ImportConfig::new(&input, &output, SpatialReference::wgs84());
    import_directory(&config).unwrap();
    import_directory(&config).unwrap();

    let collection = read_geojson(&output);
    assert_eq!(collection["features"].as_array().unwrap().len(), 1);
}

#[test]
fn test_unsupported_output_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = ImportConfig::new(
        temp_dir.path(),
        temp_dir.path().join("tracks.shp"),
        SpatialReference::wgs84(),
    );

    let result = import_directory(&config);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_inspect_matches_import() {
    let temp_dir = TempDir::new().unwrap();
    write_export(
        temp_dir.path(),
        &[
            ("README.txt", "not an export"),
            ("tag20616.txt", TAG_20616),
            ("tag1234.txt", format!("{HEADER_A}\n{LOCATION_A}\n{HEADER_A}\n").as_str()),
        ],
    );

    let report = inspect_directory(temp_dir.path()).unwrap();
    assert_eq!(report.summary.observations(), 3);
    assert_eq!(report.summary.totals().missing_pair_lines, 1);

    let tags: Vec<(i64, usize)> = report.tags.iter().map(|t| (t.tag_id, t.fixes)).collect();
    assert_eq!(tags, vec![(1234, 1), (20616, 2)]);

    let mut sink = MemorySink::default();
    DirectoryProcessor::new(temp_dir.path())
        .run(&mut sink)
        .unwrap();
    assert_eq!(sink.len(), 3);
}
