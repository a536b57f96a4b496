//! GeoJSON FeatureCollection output
//!
//! The collection envelope is serialized once on creation and split around
//! its empty `features` array; features are then streamed into the gap as
//! they arrive and the remainder of the envelope is written on finish. The
//! output reference is declared with a named `crs` foreign member.

use super::{FeatureSchema, FeatureSink, SinkReport};
use crate::app::models::PointFeature;
use crate::config::SpatialReference;
use crate::constants::fields;
use crate::{Error, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const EMPTY_FEATURES: &str = r#""features":[]"#;

/// Streaming GeoJSON writer
#[derive(Debug)]
pub struct GeoJsonSink {
    path: PathBuf,
    writer: BufWriter<File>,
    schema: FeatureSchema,
    /// Envelope text following the features array
    closing: String,
    features_written: usize,
}

impl GeoJsonSink {
    /// Create (or overwrite) `path` and write the collection header
    pub fn create(path: &Path, spatial_reference: SpatialReference) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (opening, closing) = envelope(&name, &spatial_reference)?;

        let file = File::create(path).map_err(|e| {
            Error::io(format!("Failed to create output '{}'", path.display()), e)
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(opening.as_bytes())
            .map_err(|e| Error::io("Failed to write GeoJSON header", e))?;

        debug!("Opened GeoJSON collection '{}' at {}", name, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            schema: FeatureSchema::argos_points(spatial_reference),
            closing,
            features_written: 0,
        })
    }
}

/// Serialized collection envelope, split into the text before the first
/// feature and the text after the last one
fn envelope(name: &str, spatial_reference: &SpatialReference) -> Result<(String, String)> {
    let mut members = JsonObject::new();
    members.insert("name".to_string(), JsonValue::from(name));
    members.insert(
        "crs".to_string(),
        json!({
            "type": "name",
            "properties": { "name": spatial_reference.ogc_urn() }
        }),
    );

    let collection = FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: Some(members),
    };
    let text = serde_json::to_string(&collection)?;

    // string members are escaped, so the marker only matches the array itself
    let (head, tail) = text
        .split_once(EMPTY_FEATURES)
        .ok_or_else(|| Error::sink("GeoJSON envelope has no features member"))?;
    Ok((
        format!("{}\"features\":[", head),
        format!("\n]{}\n", tail),
    ))
}

/// GeoJSON representation of one feature
fn to_geojson(feature: &PointFeature) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(fields::TAG_ID.to_string(), JsonValue::from(feature.tag_id));
    properties.insert(
        fields::LOCATION_CLASS.to_string(),
        JsonValue::from(feature.location_class.as_str()),
    );
    properties.insert(fields::DATE.to_string(), JsonValue::from(feature.date.as_str()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&feature.geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl FeatureSink for GeoJsonSink {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn append(&mut self, feature: PointFeature) -> Result<()> {
        let separator: &[u8] = if self.features_written == 0 {
            b"\n"
        } else {
            b",\n"
        };
        self.writer
            .write_all(separator)
            .map_err(|e| Error::io("Failed to write GeoJSON feature", e))?;
        serde_json::to_writer(&mut self.writer, &to_geojson(&feature))?;
        self.features_written += 1;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<SinkReport> {
        let closing = std::mem::take(&mut self.closing);
        self.writer
            .write_all(closing.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| Error::io("Failed to close GeoJSON output", e))?;

        let bytes_written = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        debug!(
            "Closed {} with {} features",
            self.path.display(),
            self.features_written
        );

        Ok(SinkReport {
            path: Some(self.path.clone()),
            features_written: self.features_written,
            bytes_written,
        })
    }
}
