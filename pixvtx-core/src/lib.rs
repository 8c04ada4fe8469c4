//! pixvtx-core: Core types for pixel-cluster vertex estimation.
//!
//! This crate provides the foundational abstractions for pixel rec-hit
//! records, the detector-geometry collaborator boundary, vertex data
//! products, and the producer-module contract driven by an outer event
//! loop.

pub mod error;
pub mod geometry;
pub mod hit;
pub mod module;
pub mod vertex;

pub use error::{Error, Result};
pub use geometry::{
    BarrelSensor, DetId, DetectorRegion, GlobalPoint, LocalPoint, MapGeometry, Sensor,
    TrackerGeometry,
};
pub use hit::{Cluster, PixelCoord, PixelRecHit, VertexHit};
pub use module::{Event, EventSetup, ProducerModule};
pub use vertex::Vertex;
