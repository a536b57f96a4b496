//! Parquet and CSV output through polars
//!
//! Columnar files can't be appended row by row, so features are collected
//! into column buffers and written as one frame on finish. Geometry is
//! stored as plain `longitude`/`latitude` columns plus a WKT `geometry`
//! column. The spatial reference goes into a `<output>.meta.json` sidecar.

use super::{FeatureSchema, FeatureSink, SinkFormat, SinkReport};
use crate::app::models::PointFeature;
use crate::config::SpatialReference;
use crate::constants::{INPUT_EPSG, METADATA_SIDECAR_SUFFIX, fields};
use crate::{Error, Result};
use polars::prelude::*;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use wkt::ToWkt;

/// Buffered Parquet/CSV writer
#[derive(Debug)]
pub struct ColumnarSink {
    path: PathBuf,
    format: SinkFormat,
    schema: FeatureSchema,
    tag_ids: Vec<i64>,
    location_classes: Vec<String>,
    dates: Vec<String>,
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
    geometries: Vec<String>,
}

impl ColumnarSink {
    /// Create (or truncate) `path`; `format` must be Parquet or CSV
    pub fn create(
        path: &Path,
        format: SinkFormat,
        spatial_reference: SpatialReference,
    ) -> Result<Self> {
        if format == SinkFormat::GeoJson {
            return Err(Error::configuration(
                "GeoJSON output is written by GeoJsonSink, not ColumnarSink",
            ));
        }

        // create up front so an unwritable location fails before any parsing
        File::create(path).map_err(|e| {
            Error::io(format!("Failed to create output '{}'", path.display()), e)
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            schema: FeatureSchema::argos_points(spatial_reference),
            tag_ids: Vec::new(),
            location_classes: Vec::new(),
            dates: Vec::new(),
            longitudes: Vec::new(),
            latitudes: Vec::new(),
            geometries: Vec::new(),
        })
    }

    /// Path of the spatial reference sidecar for `path`
    pub fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(METADATA_SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    fn build_frame(&self) -> Result<DataFrame> {
        let frame = df!(
            fields::TAG_ID => self.tag_ids.as_slice(),
            fields::LOCATION_CLASS => self.location_classes.as_slice(),
            fields::DATE => self.dates.as_slice(),
            fields::LONGITUDE => self.longitudes.as_slice(),
            fields::LATITUDE => self.latitudes.as_slice(),
            fields::GEOMETRY => self.geometries.as_slice()
        )?;
        Ok(frame)
    }

    fn write_sidecar(&self, features_written: usize) -> Result<()> {
        let sidecar = Self::sidecar_path(&self.path);
        let metadata = json!({
            "crs": self.schema.spatial_reference.authority_code(),
            "input_crs": format!("EPSG:{}", INPUT_EPSG),
            "geometry_column": fields::GEOMETRY,
            "geometry_encoding": "WKT",
            "geometry_type": "Point",
            "fields": self.schema.fields,
            "feature_count": features_written,
        });

        let file = File::create(&sidecar).map_err(|e| {
            Error::io(format!("Failed to create sidecar '{}'", sidecar.display()), e)
        })?;
        serde_json::to_writer_pretty(file, &metadata)?;
        Ok(())
    }
}

impl FeatureSink for ColumnarSink {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn append(&mut self, feature: PointFeature) -> Result<()> {
        self.geometries.push(feature.geometry.to_wkt().to_string());
        self.longitudes.push(feature.geometry.x());
        self.latitudes.push(feature.geometry.y());
        self.tag_ids.push(feature.tag_id);
        self.location_classes.push(feature.location_class);
        self.dates.push(feature.date);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<SinkReport> {
        let mut frame = self.build_frame()?;
        let features_written = frame.height();

        let file = File::create(&self.path).map_err(|e| {
            Error::io(format!("Failed to open output '{}'", self.path.display()), e)
        })?;

        match self.format {
            SinkFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(ParquetCompression::Snappy)
                    .finish(&mut frame)
                    .map_err(|e| {
                        Error::sink_with_source(
                            format!("Failed to write parquet '{}'", self.path.display()),
                            e,
                        )
                    })?;
            }
            SinkFormat::Csv => {
                let mut file = file;
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut frame)
                    .map_err(|e| {
                        Error::sink_with_source(
                            format!("Failed to write CSV '{}'", self.path.display()),
                            e,
                        )
                    })?;
            }
            SinkFormat::GeoJson => {
                return Err(Error::configuration(
                    "GeoJSON output is written by GeoJsonSink, not ColumnarSink",
                ));
            }
        }

        self.write_sidecar(features_written)?;

        let bytes_written = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        debug!(
            "Wrote {} features ({} bytes) to {}",
            features_written,
            bytes_written,
            self.path.display()
        );

        Ok(SinkReport {
            path: Some(self.path.clone()),
            features_written,
            bytes_written,
        })
    }
}
