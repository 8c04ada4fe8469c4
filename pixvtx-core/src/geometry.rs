//! Detector-geometry collaborator boundary.
//!
//! The full detector description lives with the host; this module only
//! defines the surface the vertex estimation needs (local-to-global
//! transforms and edge-pixel predicates), plus a simple concrete
//! implementation for harness and CLI use.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque detector-unit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetId(pub u32);

/// Coarse location of a sensor within the layered detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DetectorRegion {
    /// Central cylindrical section.
    Barrel,
    /// Endcap disk at positive z.
    EndcapForward,
    /// Endcap disk at negative z.
    EndcapBackward,
}

/// Position in a sensor's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalPoint {
    /// Local x coordinate.
    pub x: f64,
    /// Local y coordinate.
    pub y: f64,
    /// Local z coordinate (out of the sensor plane).
    pub z: f64,
}

impl LocalPoint {
    /// Creates a new local point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Position in the global detector frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobalPoint {
    /// Global x coordinate.
    pub x: f64,
    /// Global y coordinate.
    pub y: f64,
    /// Global z coordinate (along the beam axis).
    pub z: f64,
}

impl GlobalPoint {
    /// Creates a new global point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Transverse distance from the beam axis.
    #[inline]
    #[must_use]
    pub fn perp(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Sensor-level geometry: local-to-global transform and edge-pixel tests.
///
/// Object safe so geometries can hand out heterogeneous sensor types.
pub trait Sensor {
    /// Transforms a local position into the global frame.
    fn to_global(&self, local: LocalPoint) -> GlobalPoint;

    /// Whether column `x` lies on the sensor edge.
    fn is_edge_pixel_x(&self, x: u16) -> bool;

    /// Whether row `y` lies on the sensor edge.
    fn is_edge_pixel_y(&self, y: u16) -> bool;
}

/// Lookup from detector id to sensor geometry.
///
/// A missing sensor is reported as `None`; callers drop the hit rather
/// than fail the event.
pub trait TrackerGeometry {
    /// Returns the sensor for `id`, if known.
    fn sensor(&self, id: DetId) -> Option<&dyn Sensor>;
}

/// Rectangular pixel sensor placed tangentially on a barrel cylinder.
///
/// Local x runs along the beam axis, local y along the transverse
/// direction in the sensor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrelSensor {
    /// Cylinder radius the sensor sits on.
    pub radius: f64,
    /// Global z of the sensor center.
    pub z_center: f64,
    /// Number of pixel columns (local x).
    pub n_cols: u16,
    /// Number of pixel rows (local y).
    pub n_rows: u16,
}

impl BarrelSensor {
    /// Creates a new barrel sensor.
    #[must_use]
    pub fn new(radius: f64, z_center: f64, n_cols: u16, n_rows: u16) -> Self {
        Self {
            radius,
            z_center,
            n_cols,
            n_rows,
        }
    }
}

impl Sensor for BarrelSensor {
    fn to_global(&self, local: LocalPoint) -> GlobalPoint {
        GlobalPoint::new(self.radius, local.y, self.z_center + local.x)
    }

    fn is_edge_pixel_x(&self, x: u16) -> bool {
        x == 0 || x >= self.n_cols.saturating_sub(1)
    }

    fn is_edge_pixel_y(&self, y: u16) -> bool {
        y == 0 || y >= self.n_rows.saturating_sub(1)
    }
}

/// Geometry backed by a plain map, for harness and CLI use.
#[derive(Debug, Clone, Default)]
pub struct MapGeometry {
    sensors: HashMap<DetId, BarrelSensor>,
}

impl MapGeometry {
    /// Creates an empty geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sensor under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: DetId, sensor: BarrelSensor) {
        self.sensors.insert(id, sensor);
    }

    /// Number of registered sensors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns true if no sensors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl TrackerGeometry for MapGeometry {
    fn sensor(&self, id: DetId) -> Option<&dyn Sensor> {
        self.sensors.get(&id).map(|s| s as &dyn Sensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_global_point_perp() {
        let p = GlobalPoint::new(3.0, 4.0, 7.0);
        assert_relative_eq!(p.perp(), 5.0);
    }

    #[test]
    fn test_barrel_sensor_to_global() {
        let sensor = BarrelSensor::new(4.4, 10.0, 416, 160);
        let global = sensor.to_global(LocalPoint::new(-2.5, 0.0, 0.0));
        assert_relative_eq!(global.z, 7.5);
        assert_relative_eq!(global.perp(), 4.4);
    }

    #[test]
    fn test_barrel_sensor_edge_pixels() {
        let sensor = BarrelSensor::new(4.4, 0.0, 416, 160);
        assert!(sensor.is_edge_pixel_x(0));
        assert!(sensor.is_edge_pixel_x(415));
        assert!(!sensor.is_edge_pixel_x(1));
        assert!(sensor.is_edge_pixel_y(0));
        assert!(sensor.is_edge_pixel_y(159));
        assert!(!sensor.is_edge_pixel_y(80));
    }

    #[test]
    fn test_map_geometry_lookup() {
        let mut geometry = MapGeometry::new();
        geometry.insert(DetId(7), BarrelSensor::new(4.4, 0.0, 416, 160));

        assert!(geometry.sensor(DetId(7)).is_some());
        assert!(geometry.sensor(DetId(8)).is_none());
        assert_eq!(geometry.len(), 1);
    }
}
