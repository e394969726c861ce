//! Geometric tolerances shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// Numeric tolerances used by the outline engine.
///
/// All distances are in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// General comparison epsilon (boundary touch tests, on-edge tests).
    pub epsilon: f64,
    /// Consecutive points closer than this are merged.
    pub dedupe_distance: f64,
    /// Cutout edges within this distance of a boundary line snap onto it.
    pub snap_distance: f64,
    /// Fixed samples per bezier for distance and containment tests.
    pub curve_samples: usize,
    /// Corner notch L-cuts may use at most this fraction of an adjacent edge.
    pub corner_notch_limit: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            epsilon: 1e-3,
            dedupe_distance: 1e-4,
            snap_distance: 0.01,
            curve_samples: 20,
            corner_notch_limit: 0.98,
        }
    }
}

impl Tolerances {
    /// Returns the first problem found, if any.
    pub fn check(&self) -> Option<String> {
        if !(self.epsilon > 0.0) {
            return Some("epsilon must be > 0".to_string());
        }
        if !(self.dedupe_distance > 0.0) {
            return Some("dedupe_distance must be > 0".to_string());
        }
        if !(self.snap_distance >= 0.0) {
            return Some("snap_distance must be >= 0".to_string());
        }
        if self.curve_samples < 2 {
            return Some("curve_samples must be >= 2".to_string());
        }
        if !(self.corner_notch_limit > 0.0 && self.corner_notch_limit <= 1.0) {
            return Some("corner_notch_limit must be in (0, 1]".to_string());
        }
        None
    }
}
