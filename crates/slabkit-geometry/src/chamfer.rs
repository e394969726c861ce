//! Chamfer applier.
//!
//! Each angle cut replaces one corner with two points along its adjacent
//! edges. Cuts run in declaration order and always resolve their anchor
//! against the current outline by nearest vertex, so stacked cuts on the
//! same or neighbouring corners compose.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use slabkit_core::Tolerances;

use crate::geometry::{nearest_point_index, normalize_outline, Point};
use crate::model::{checked_index, AngleCut};

/// Boundary segment created by a chamfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSegment {
    pub id: Uuid,
    pub anchor_corner_index: usize,
    pub start: Point,
    pub end: Point,
}

impl AngleSegment {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Whether `a -> b` is this segment in either direction.
    pub fn matches(&self, a: Point, b: Point, tolerance: f64) -> bool {
        (self.start.approx_eq(&a, tolerance) && self.end.approx_eq(&b, tolerance))
            || (self.start.approx_eq(&b, tolerance) && self.end.approx_eq(&a, tolerance))
    }
}

/// Outline after chamfering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chamfered {
    pub points: Vec<Point>,
    pub angle_segments: Vec<AngleSegment>,
}

/// Applies `cuts` to the carved outline. `corners` addresses anchors and is
/// normally the carved outline itself.
pub fn apply_chamfers(corners: &[Point], cuts: &[AngleCut], tol: &Tolerances) -> Chamfered {
    let mut points = corners.to_vec();
    let mut angle_segments: Vec<AngleSegment> = Vec::new();

    for cut in cuts {
        if !cut.is_active() {
            debug!("Angle cut {} has no positive offsets, ignoring", cut.id);
            continue;
        }
        let Some(anchor) = checked_index(cut.anchor_corner_index, corners.len()) else {
            debug!(
                "Angle cut {} anchor {} is outside {} corners",
                cut.id,
                cut.anchor_corner_index,
                corners.len()
            );
            continue;
        };
        let n = points.len();
        if n < 3 {
            break;
        }
        let Some(index) = nearest_point_index(&points, corners[anchor]) else {
            continue;
        };

        let v = points[index];
        let prev = points[(index + n - 1) % n];
        let next = points[(index + 1) % n];
        let len_in = v.distance_to(&prev);
        let len_out = v.distance_to(&next);
        if cut.offset_in > len_in + tol.epsilon || cut.offset_out > len_out + tol.epsilon {
            debug!(
                "Angle cut {} offsets ({}, {}) exceed edges ({}, {}), skipping",
                cut.id, cut.offset_in, cut.offset_out, len_in, len_out
            );
            continue;
        }
        let (Some(to_prev), Some(to_next)) = ((prev - v).normalized(), (next - v).normalized())
        else {
            continue;
        };
        let a = v + to_prev * cut.offset_in.min(len_in);
        let b = v + to_next * cut.offset_out.min(len_out);

        // Earlier angle segments ending on the consumed vertex now end on
        // whichever new point lies along them.
        let moved = |other: Point| {
            if other.approx_eq(&prev, tol.epsilon) {
                Some(a)
            } else if other.approx_eq(&next, tol.epsilon) {
                Some(b)
            } else {
                None
            }
        };
        for segment in angle_segments.iter_mut() {
            let (start, end) = (segment.start, segment.end);
            if start.approx_eq(&v, tol.epsilon) {
                if let Some(p) = moved(end) {
                    segment.start = p;
                }
            }
            if end.approx_eq(&v, tol.epsilon) {
                if let Some(p) = moved(start) {
                    segment.end = p;
                }
            }
        }

        let mut edited = Vec::with_capacity(n + 1);
        edited.extend_from_slice(&points[..index]);
        edited.push(a);
        edited.push(b);
        edited.extend_from_slice(&points[index + 1..]);
        points = normalize_outline(&edited, tol.dedupe_distance);

        angle_segments.push(AngleSegment {
            id: cut.id,
            anchor_corner_index: anchor,
            start: a,
            end: b,
        });
    }

    Chamfered {
        points,
        angle_segments,
    }
}
