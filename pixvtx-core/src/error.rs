//! Error types for pixvtx-core.

use thiserror::Error;

/// Result type alias for pixvtx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for pixvtx operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Scan range rejected at construction.
    #[error("invalid scan range: min_z {min_z} > max_z {max_z}")]
    InvalidScanRange {
        /// Lower edge of the rejected range.
        min_z: f64,
        /// Upper edge of the rejected range.
        max_z: f64,
    },

    /// Scan step rejected at construction (must be strictly positive).
    #[error("invalid scan step: {0}")]
    InvalidScanStep(f64),
}
