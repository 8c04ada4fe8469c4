//! Vertex z-scan: window scoring and candidate sweep.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pixvtx_core::error::{Error, Result};
use pixvtx_core::hit::VertexHit;
use rayon::prelude::*;

/// Configuration for the candidate z sweep.
///
/// Immutable once constructed; `new` validates the range and step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanConfig {
    min_z: f64,
    max_z: f64,
    step: f64,
}

impl ScanConfig {
    /// Creates a scan configuration.
    ///
    /// # Errors
    /// Returns [`Error::InvalidScanStep`] unless `step > 0` (NaN is
    /// rejected), and [`Error::InvalidScanRange`] if `min_z > max_z`.
    pub fn new(min_z: f64, max_z: f64, step: f64) -> Result<Self> {
        if step <= 0.0 || step.is_nan() {
            return Err(Error::InvalidScanStep(step));
        }
        if min_z > max_z {
            return Err(Error::InvalidScanRange { min_z, max_z });
        }
        Ok(Self { min_z, max_z, step })
    }

    /// Lower edge of the sweep.
    #[must_use]
    pub fn min_z(&self) -> f64 {
        self.min_z
    }

    /// Upper edge of the sweep (inclusive when reached by stepping).
    #[must_use]
    pub fn max_z(&self) -> f64 {
        self.max_z
    }

    /// Candidate spacing.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Outcome of a completed scan.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanResult {
    /// Best-supported candidate position, 0.0 when nothing matched.
    pub best_z: f64,
    /// Accumulated width residual at `best_z` among candidates with
    /// `best_count` hits; infinite when nothing matched.
    pub best_score: f64,
    /// Contained-hit count at `best_z`.
    pub best_count: usize,
}

impl Default for ScanResult {
    /// Sentinel state before any candidate has matched.
    fn default() -> Self {
        Self {
            best_z: 0.0,
            best_score: f64::INFINITY,
            best_count: 0,
        }
    }
}

/// Counts hits contained in the v-shaped window in cluster width versus
/// z position for candidate `z0`, accumulating the width residual.
///
/// The predicted width `2 * |hit.z - z0| / hit.r + 0.5` is a linear
/// model of transverse cluster size against incidence angle; a hit is
/// contained when the prediction is within one pixel of the observed
/// width. Hits with non-positive radius never match.
#[must_use]
pub fn contained_hits(hits: &[VertexHit], z0: f64) -> (usize, f64) {
    let mut count = 0usize;
    let mut score = 0.0f64;
    for hit in hits {
        if hit.r <= 0.0 {
            continue;
        }
        let predicted = 2.0 * (hit.z - z0).abs() / hit.r + 0.5;
        let residual = (predicted - f64::from(hit.w)).abs();
        if residual <= 1.0 {
            score += residual;
            count += 1;
        }
    }
    (count, score)
}

/// Sweeps candidate z positions over a configured range and keeps the
/// best-supported one.
///
/// Candidates are ranked by contained-hit count first, then by
/// accumulated residual among candidates tied at the leading count.
#[derive(Clone, Copy, Debug)]
pub struct ZScanner {
    config: ScanConfig,
}

impl ZScanner {
    /// Creates a scanner for the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan configuration.
    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Runs the sweep in increasing z order.
    ///
    /// Candidates are produced by repeated accumulation (`z0 += step`),
    /// not `min_z + i * step`; the two differ in whether the last
    /// candidate at the upper boundary is kept.
    #[must_use]
    pub fn scan(&self, hits: &[VertexHit]) -> ScanResult {
        let mut best = ScanResult::default();
        let mut z0 = self.config.min_z;
        while z0 <= self.config.max_z {
            let (count, score) = contained_hits(hits, z0);
            if count > 0 {
                Self::update(&mut best, z0, count, score);
            }
            z0 += self.config.step;
        }
        best
    }

    /// Scores candidates in parallel, then applies updates sequentially
    /// in increasing z order so the tie-break matches [`Self::scan`]
    /// exactly.
    #[must_use]
    pub fn scan_par(&self, hits: &[VertexHit]) -> ScanResult {
        let scored: Vec<(f64, usize, f64)> = self
            .candidates()
            .into_par_iter()
            .map(|z0| {
                let (count, score) = contained_hits(hits, z0);
                (z0, count, score)
            })
            .collect();

        let mut best = ScanResult::default();
        for (z0, count, score) in scored {
            if count > 0 {
                Self::update(&mut best, z0, count, score);
            }
        }
        best
    }

    /// Candidate positions, stepped by the same accumulation as
    /// [`Self::scan`].
    fn candidates(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut z0 = self.config.min_z;
        while z0 <= self.config.max_z {
            out.push(z0);
            z0 += self.config.step;
        }
        out
    }

    // A new count leader resets the score threshold before the score
    // comparison runs on the same candidate.
    fn update(best: &mut ScanResult, z0: f64, count: usize, score: f64) {
        if count > best.best_count {
            best.best_score = f64::INFINITY;
            best.best_count = count;
        }
        if count >= best.best_count && score < best.best_score {
            best.best_score = score;
            best.best_z = z0;
        }
    }
}
