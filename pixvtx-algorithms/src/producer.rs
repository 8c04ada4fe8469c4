//! Pixel-cluster vertex producer module.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pixvtx_core::error::Result;
use pixvtx_core::module::{Event, EventSetup, ProducerModule};
use pixvtx_core::vertex::Vertex;

use crate::extract::HitExtractor;
use crate::scan::{ScanConfig, ZScanner};

/// Configuration for [`ClusterVertexProducer`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterVertexConfig {
    /// Label of the input rec-hit collection.
    pub source: String,
    /// Lower edge of the candidate sweep (cm).
    pub min_z: f64,
    /// Upper edge of the candidate sweep (cm).
    pub max_z: f64,
    /// Candidate spacing (cm).
    pub z_step: f64,
}

impl Default for ClusterVertexConfig {
    fn default() -> Self {
        Self {
            source: "siPixelRecHits".to_string(),
            min_z: -15.9,
            max_z: 15.95,
            z_step: 0.1,
        }
    }
}

impl ClusterVertexConfig {
    /// Set the input collection label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the sweep range.
    #[must_use]
    pub fn with_range(mut self, min_z: f64, max_z: f64) -> Self {
        self.min_z = min_z;
        self.max_z = max_z;
        self
    }

    /// Set the candidate spacing.
    #[must_use]
    pub fn with_step(mut self, z_step: f64) -> Self {
        self.z_step = z_step;
        self
    }
}

/// Estimates the primary-vertex z position from barrel pixel cluster
/// widths and emits a one-dimensional vertex.
///
/// When the configured source collection is present the producer always
/// emits exactly one vertex, z = 0.0 serving as the documented sentinel
/// when no candidate matched. An absent source collection yields an
/// empty output instead.
pub struct ClusterVertexProducer {
    source: String,
    extractor: HitExtractor,
    scanner: ZScanner,
}

impl ClusterVertexProducer {
    /// Creates the producer, validating the sweep configuration.
    ///
    /// # Errors
    /// Propagates the [`ScanConfig`] validation errors.
    pub fn new(config: ClusterVertexConfig) -> Result<Self> {
        let scan = ScanConfig::new(config.min_z, config.max_z, config.z_step)?;
        Ok(Self {
            source: config.source,
            extractor: HitExtractor::new(),
            scanner: ZScanner::new(scan),
        })
    }

    /// Input collection label.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl ProducerModule for ClusterVertexProducer {
    fn produce(&self, event: &mut Event, setup: &EventSetup<'_>) {
        let mut vertices = Vec::new();

        if let Some(rec_hits) = event.rec_hits(&self.source) {
            let hits = self.extractor.extract(rec_hits, setup.geometry());
            let result = self.scanner.scan(&hits);
            vertices.push(Vertex::from_z(result.best_z));
        }

        event.put_vertices(vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pixvtx_core::geometry::MapGeometry;

    #[test]
    fn test_config_defaults() {
        let config = ClusterVertexConfig::default();
        assert_eq!(config.source, "siPixelRecHits");
        assert_relative_eq!(config.min_z, -15.9);
        assert_relative_eq!(config.max_z, 15.95);
        assert_relative_eq!(config.z_step, 0.1);
    }

    #[test]
    fn test_config_builders() {
        let config = ClusterVertexConfig::default()
            .with_source("hltPixelRecHits")
            .with_range(-10.0, 10.0)
            .with_step(0.2);
        assert_eq!(config.source, "hltPixelRecHits");
        assert_relative_eq!(config.min_z, -10.0);
        assert_relative_eq!(config.max_z, 10.0);
        assert_relative_eq!(config.z_step, 0.2);
    }

    #[test]
    fn test_bad_config_rejected() {
        let config = ClusterVertexConfig::default().with_step(0.0);
        assert!(ClusterVertexProducer::new(config).is_err());
    }

    #[test]
    fn test_absent_source_yields_empty_output() {
        let producer = ClusterVertexProducer::new(ClusterVertexConfig::default()).unwrap();
        let geometry = MapGeometry::new();
        let setup = EventSetup::new(&geometry);
        let mut event = Event::new();

        producer.produce(&mut event, &setup);
        assert!(event.vertices().is_empty());
    }

    #[test]
    fn test_present_source_yields_sentinel_vertex() {
        // Collection present but empty: one vertex at the z = 0.0
        // sentinel, with the canonical covariance.
        let producer = ClusterVertexProducer::new(ClusterVertexConfig::default()).unwrap();
        let geometry = MapGeometry::new();
        let setup = EventSetup::new(&geometry);
        let mut event = Event::new();
        event.put_rec_hits("siPixelRecHits", Vec::new());

        producer.produce(&mut event, &setup);
        assert_eq!(event.vertices().len(), 1);
        assert_relative_eq!(event.vertices()[0].z(), 0.0);
        assert_relative_eq!(event.vertices()[0].covariance[2][2], 0.36);
    }
}
