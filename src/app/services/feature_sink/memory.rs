//! In-memory feature collection
//!
//! Used by the `inspect` command, which walks an export without writing
//! anything, and by tests that need to look at what a run produced.

use super::{FeatureSchema, FeatureSink, SinkReport};
use crate::Result;
use crate::app::models::PointFeature;
use crate::config::SpatialReference;

#[derive(Debug, Clone)]
pub struct MemorySink {
    schema: FeatureSchema,
    features: Vec<PointFeature>,
}

impl MemorySink {
    pub fn new(spatial_reference: SpatialReference) -> Self {
        Self {
            schema: FeatureSchema::argos_points(spatial_reference),
            features: Vec::new(),
        }
    }

    /// Features in arrival order
    pub fn features(&self) -> &[PointFeature] {
        &self.features
    }

    pub fn into_features(self) -> Vec<PointFeature> {
        self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(SpatialReference::wgs84())
    }
}

impl FeatureSink for MemorySink {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn append(&mut self, feature: PointFeature) -> Result<()> {
        self.features.push(feature);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<SinkReport> {
        Ok(SinkReport {
            path: None,
            features_written: self.features.len(),
            bytes_written: 0,
        })
    }
}
