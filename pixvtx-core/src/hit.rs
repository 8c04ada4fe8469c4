//! Hit and cluster types for pixel-detector vertex estimation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{DetId, DetectorRegion, LocalPoint};

/// Pixel coordinate on a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelCoord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl PixelCoord {
    /// Creates a new pixel coordinate.
    #[inline]
    #[must_use]
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A group of adjacent pixel readings attributed to a single particle
/// traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    pixels: Vec<PixelCoord>,
}

impl Cluster {
    /// Creates a cluster from its constituent pixels.
    #[must_use]
    pub fn new(pixels: Vec<PixelCoord>) -> Self {
        Self { pixels }
    }

    /// Constituent pixels.
    #[must_use]
    pub fn pixels(&self) -> &[PixelCoord] {
        &self.pixels
    }

    /// Number of constituent pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns true if the cluster has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Transverse extent in pixels along the local y axis.
    ///
    /// Zero for an empty cluster.
    #[must_use]
    pub fn size_y(&self) -> u16 {
        let Some(first) = self.pixels.first() else {
            return 0;
        };
        let mut min_y = first.y;
        let mut max_y = first.y;
        for pixel in &self.pixels[1..] {
            min_y = min_y.min(pixel.y);
            max_y = max_y.max(pixel.y);
        }
        max_y - min_y + 1
    }
}

impl FromIterator<PixelCoord> for Cluster {
    fn from_iter<I: IntoIterator<Item = PixelCoord>>(iter: I) -> Self {
        Self {
            pixels: iter.into_iter().collect(),
        }
    }
}

/// A reconstructed pixel hit as delivered by the host, before filtering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelRecHit {
    /// Detector unit the hit was recorded on.
    pub det_id: DetId,
    /// Coarse detector region of that unit.
    pub region: DetectorRegion,
    /// Position in the sensor's local frame.
    pub local: LocalPoint,
    /// Pixel cluster the hit was reconstructed from.
    pub cluster: Cluster,
    /// Host validity flag.
    pub valid: bool,
}

impl PixelRecHit {
    /// Creates a valid rec-hit.
    #[must_use]
    pub fn new(det_id: DetId, region: DetectorRegion, local: LocalPoint, cluster: Cluster) -> Self {
        Self {
            det_id,
            region,
            local,
            cluster,
            valid: true,
        }
    }

    /// Marks the hit invalid.
    #[must_use]
    pub fn invalidated(mut self) -> Self {
        self.valid = false;
        self
    }
}

/// A barrel rec-hit projected to global coordinates, ready for scanning.
///
/// Immutable once constructed; `r` is expected to be strictly positive
/// (the scorer guards the degenerate case).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexHit {
    /// Global longitudinal coordinate.
    pub z: f64,
    /// Global transverse distance from the beam axis.
    pub r: f64,
    /// Cluster transverse size in pixels.
    pub w: u16,
}

impl VertexHit {
    /// Creates a new vertex hit.
    #[inline]
    #[must_use]
    pub fn new(z: f64, r: f64, w: u16) -> Self {
        Self { z, r, w }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_size_y() {
        let cluster = Cluster::new(vec![
            PixelCoord::new(10, 4),
            PixelCoord::new(10, 5),
            PixelCoord::new(11, 7),
        ]);
        assert_eq!(cluster.size_y(), 4);
        assert_eq!(cluster.len(), 3);
    }

    #[test]
    fn test_cluster_size_y_single_pixel() {
        let cluster = Cluster::new(vec![PixelCoord::new(3, 9)]);
        assert_eq!(cluster.size_y(), 1);
    }

    #[test]
    fn test_empty_cluster() {
        let cluster = Cluster::default();
        assert!(cluster.is_empty());
        assert_eq!(cluster.size_y(), 0);
    }

    #[test]
    fn test_cluster_from_iter() {
        let cluster: Cluster = (0..3).map(|y| PixelCoord::new(5, y)).collect();
        assert_eq!(cluster.size_y(), 3);
    }

    #[test]
    fn test_rec_hit_validity() {
        let hit = PixelRecHit::new(
            DetId(1),
            DetectorRegion::Barrel,
            LocalPoint::new(0.0, 0.0, 0.0),
            Cluster::default(),
        );
        assert!(hit.valid);
        assert!(!hit.invalidated().valid);
    }

    #[test]
    fn test_vertex_hit() {
        let hit = VertexHit::new(2.5, 4.4, 3);
        assert!((hit.z - 2.5).abs() < f64::EPSILON);
        assert!((hit.r - 4.4).abs() < f64::EPSILON);
        assert_eq!(hit.w, 3);
    }
}
