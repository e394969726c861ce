use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CanonicalEdge;

/// Maps a stored corner index to a usable one. Negative or out of range
/// indices resolve to `None`.
pub(crate) fn checked_index(index: i32, count: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|i| *i < count)
}

/// Start and end corner of a partial curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerSpan {
    pub start: i32,
    pub end: i32,
}

/// A convex or concave curve replacing a straight edge, or the part of it
/// between two corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvedEdge {
    pub edge: CanonicalEdge,
    pub radius: f64,
    #[serde(default)]
    pub concave: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<CornerSpan>,
}

impl CurvedEdge {
    pub fn whole(edge: CanonicalEdge, radius: f64, concave: bool) -> Self {
        Self {
            edge,
            radius,
            concave,
            span: None,
        }
    }

    pub fn spanning(edge: CanonicalEdge, radius: f64, concave: bool, start: i32, end: i32) -> Self {
        Self {
            edge,
            radius,
            concave,
            span: Some(CornerSpan { start, end }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0
    }
}

/// Rounded corner. `inside` selects a cove cut into the corner instead of
/// a round-over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRadius {
    pub corner_index: i32,
    pub radius: f64,
    #[serde(default)]
    pub inside: bool,
}

impl CornerRadius {
    pub fn new(corner_index: i32, radius: f64) -> Self {
        Self {
            corner_index,
            radius,
            inside: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0
    }
}

/// Chamfer at a corner.
///
/// `offset_in` is measured from the corner toward the previous vertex and
/// `offset_out` toward the next one, in clockwise drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleCut {
    #[serde(default)]
    pub id: Uuid,
    pub anchor_corner_index: i32,
    pub offset_in: f64,
    pub offset_out: f64,
}

impl AngleCut {
    pub fn new(anchor_corner_index: i32, offset_in: f64, offset_out: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor_corner_index,
            offset_in,
            offset_out,
        }
    }

    /// Chamfer given by one offset and the cut angle in degrees, measured
    /// from the incoming edge. 45 degrees gives equal offsets.
    pub fn from_angle(anchor_corner_index: i32, offset: f64, angle_deg: f64) -> Self {
        Self::new(
            anchor_corner_index,
            offset,
            offset * angle_deg.to_radians().tan(),
        )
    }

    pub fn is_active(&self) -> bool {
        self.offset_in.is_finite()
            && self.offset_out.is_finite()
            && self.offset_in > 0.0
            && self.offset_out > 0.0
    }
}
