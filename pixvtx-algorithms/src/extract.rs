//! Rec-hit filtering and projection into vertex hits.

use pixvtx_core::geometry::{DetectorRegion, TrackerGeometry};
use pixvtx_core::hit::{PixelRecHit, VertexHit};

/// Filters pixel rec-hits and projects the survivors to global
/// coordinates for the z scan.
///
/// Filters apply in order: hits flagged invalid by the host, hits
/// outside the barrel region, and hits whose cluster touches an edge
/// row or column of its sensor. A hit whose detector id is unknown to
/// the geometry is dropped as well. Zero survivors is a valid outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct HitExtractor;

impl HitExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs the filter chain and projection over a rec-hit collection.
    #[must_use]
    pub fn extract(
        &self,
        rec_hits: &[PixelRecHit],
        geometry: &dyn TrackerGeometry,
    ) -> Vec<VertexHit> {
        let mut hits = Vec::with_capacity(rec_hits.len());

        for hit in rec_hits {
            if !hit.valid {
                continue;
            }
            if hit.region != DetectorRegion::Barrel {
                continue;
            }
            let Some(sensor) = geometry.sensor(hit.det_id) else {
                continue;
            };
            let on_edge = hit
                .cluster
                .pixels()
                .iter()
                .any(|pixel| sensor.is_edge_pixel_x(pixel.x) || sensor.is_edge_pixel_y(pixel.y));
            if on_edge {
                continue;
            }

            let global = sensor.to_global(hit.local);
            hits.push(VertexHit::new(global.z, global.perp(), hit.cluster.size_y()));
        }

        hits
    }
}
