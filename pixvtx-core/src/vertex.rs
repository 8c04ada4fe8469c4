//! Vertex data products.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An estimated interaction vertex.
///
/// Position and a 3x3 covariance matrix in the global frame, plus the
/// usual fit bookkeeping fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Vertex position (x, y, z).
    pub position: [f64; 3],
    /// Position covariance matrix.
    pub covariance: [[f64; 3]; 3],
    /// Fit chi-square.
    pub chi2: f64,
    /// Fit degrees of freedom.
    pub ndof: f64,
    /// Vertex weight.
    pub weight: f64,
}

impl Vertex {
    /// One-dimensional vertex at `z` on the beam line.
    ///
    /// Only the (z, z) covariance entry is filled, with the canonical
    /// 0.6 cm uncertainty of the cluster-width estimate.
    #[must_use]
    pub fn from_z(z: f64) -> Self {
        let mut covariance = [[0.0; 3]; 3];
        covariance[2][2] = 0.6 * 0.6;
        Self {
            position: [0.0, 0.0, z],
            covariance,
            chi2: 0.0,
            ndof: 1.0,
            weight: 1.0,
        }
    }

    /// Longitudinal position.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f64 {
        self.position[2]
    }
}
