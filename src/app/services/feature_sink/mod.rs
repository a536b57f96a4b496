//! Output feature collections
//!
//! A [`FeatureSink`] owns one output container for the length of a run: it
//! is created with the point schema and a spatial reference, receives one
//! [`PointFeature`] per parsed observation in arrival order, and is closed
//! with [`FeatureSink::finish`].
//!
//! Backends:
//! - [`GeoJsonSink`] - streams a GeoJSON FeatureCollection
//! - [`columnar::ColumnarSink`] - Parquet or CSV through polars
//! - [`memory::MemorySink`] - keeps features in memory
//!
//! Coordinates are always written as received (geographic WGS84). The
//! spatial reference given at creation is declared on the container; no
//! reprojection happens here.

pub mod columnar;
pub mod geojson;
pub mod memory;

pub use columnar::ColumnarSink;
pub use self::geojson::GeoJsonSink;
pub use memory::MemorySink;

use crate::app::models::PointFeature;
use crate::config::SpatialReference;
use crate::constants::{extensions, fields};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Attribute column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Integer,
    Text,
}

/// One attribute column of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
}

/// Geometry kinds a container can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeometryType {
    Point,
}

/// Attribute fields, geometry kind and spatial reference of a container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSchema {
    pub fields: Vec<FieldDef>,
    pub geometry: GeometryType,
    pub spatial_reference: SpatialReference,
}

impl FeatureSchema {
    /// `TagID` (integer), `LC` (text), `Date` (text) and a point geometry
    pub fn argos_points(spatial_reference: SpatialReference) -> Self {
        Self {
            fields: vec![
                FieldDef {
                    name: fields::TAG_ID,
                    field_type: FieldType::Integer,
                },
                FieldDef {
                    name: fields::LOCATION_CLASS,
                    field_type: FieldType::Text,
                },
                FieldDef {
                    name: fields::DATE,
                    field_type: FieldType::Text,
                },
            ],
            geometry: GeometryType::Point,
            spatial_reference,
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

/// What a sink wrote once closed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SinkReport {
    /// Container path, if the sink writes to disk
    pub path: Option<PathBuf>,
    pub features_written: usize,
    pub bytes_written: u64,
}

/// Destination for parsed point features
pub trait FeatureSink {
    /// Schema the container was created with
    fn schema(&self) -> &FeatureSchema;

    /// Append one feature; called once per observation, in order
    fn append(&mut self, feature: PointFeature) -> Result<()>;

    /// Close the container and report what was written
    fn finish(self: Box<Self>) -> Result<SinkReport>;
}

/// Container formats selected by output extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SinkFormat {
    GeoJson,
    Parquet,
    Csv,
}

impl SinkFormat {
    /// Pick the format from the path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if extensions::GEOJSON.contains(&extension.as_str()) {
            Ok(SinkFormat::GeoJson)
        } else if extension == extensions::PARQUET {
            Ok(SinkFormat::Parquet)
        } else if extension == extensions::CSV {
            Ok(SinkFormat::Csv)
        } else {
            Err(Error::configuration(format!(
                "Unsupported output format for '{}' (use .geojson, .json, .parquet or .csv)",
                path.display()
            )))
        }
    }
}

/// Create the output container for `path`, overwriting any existing file
pub fn create_sink(
    path: &Path,
    spatial_reference: SpatialReference,
) -> Result<Box<dyn FeatureSink>> {
    let format = SinkFormat::from_path(path)?;
    info!(
        "Creating {:?} output at {} ({})",
        format,
        path.display(),
        spatial_reference
    );

    Ok(match format {
        SinkFormat::GeoJson => Box::new(GeoJsonSink::create(path, spatial_reference)?),
        SinkFormat::Parquet | SinkFormat::Csv => {
            Box::new(ColumnarSink::create(path, format, spatial_reference)?)
        }
    })
}
