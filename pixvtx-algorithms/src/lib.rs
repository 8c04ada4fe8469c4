//! pixvtx-algorithms: Vertex z estimation from pixel cluster widths.
//!
//! This crate provides the estimation pipeline:
//! - **`HitExtractor`** - filters rec-hits and projects them to global coordinates
//! - **`ZScanner`** - sweeps candidate z positions with a v-shaped width window
//! - **`ClusterVertexProducer`** - producer module combining the two
//!
#![warn(missing_docs)]

mod extract;
mod producer;
mod scan;

pub use extract::HitExtractor;
pub use producer::{ClusterVertexConfig, ClusterVertexProducer};
pub use scan::{contained_hits, ScanConfig, ScanResult, ZScanner};

// Re-export the harness types modules are driven with
pub use pixvtx_core::module::{Event, EventSetup, ProducerModule};
