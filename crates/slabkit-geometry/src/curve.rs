//! Curve composer.
//!
//! A curved edge is one quadratic bezier over a chord: the whole canonical
//! edge, or the straight line between two corners of it. Every straight
//! outline segment lying on that chord is replaced by the matching piece of
//! the bezier, so a single curve runs smoothly across notch-introduced
//! vertices.

use serde::{Deserialize, Serialize};
use tracing::debug;

use slabkit_core::Tolerances;

use crate::base::BaseShape;
use crate::bezier::QuadBezier;
use crate::geometry::{segment_parameter, Point};
use crate::model::{checked_index, CanonicalEdge, CornerSpan, CurvedEdge};
use crate::segments::TaggedEdge;

/// A curve that made it into the outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedCurve {
    pub edge: CanonicalEdge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<CornerSpan>,
    pub concave: bool,
    pub radius: f64,
    /// Full curve over the chord, before clipping to outline segments.
    pub bezier: QuadBezier,
}

/// Per outline edge replacement curves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurvePlan {
    /// Indexed like the outline edges (`points[i] -> points[i + 1]`).
    pub replacements: Vec<Option<QuadBezier>>,
    pub applied: Vec<AppliedCurve>,
}

impl CurvePlan {
    pub fn empty(edge_count: usize) -> Self {
        Self {
            replacements: vec![None; edge_count],
            applied: Vec::new(),
        }
    }

    /// Whether a vertex touches a curved edge.
    pub fn occupies_vertex(&self, vertex: usize) -> bool {
        let n = self.replacements.len();
        if n == 0 {
            return false;
        }
        self.replacements[vertex % n].is_some() || self.replacements[(vertex + n - 1) % n].is_some()
    }
}

/// Bezier over `from -> to` bulging `2 * radius` along `normal` at its
/// control point.
pub fn edge_curve(from: Point, to: Point, normal: Point, radius: f64, concave: bool) -> QuadBezier {
    let sign = if concave { -1.0 } else { 1.0 };
    let mid = (from + to) * 0.5;
    QuadBezier::new(from, mid + normal * (2.0 * radius * sign), to)
}

/// Chord of a curve in drawing order, `None` when the span is unusable.
fn chord_for(
    shape: &BaseShape,
    curve: &CurvedEdge,
    corners: &[Point],
    tol: &Tolerances,
) -> Option<(Point, Point)> {
    let (a, b) = shape.edge_line(curve.edge)?;
    let Some(span) = curve.span else {
        return Some((a, b));
    };
    let start = corners[checked_index(span.start, corners.len())?];
    let end = corners[checked_index(span.end, corners.len())?];
    if start.distance_to(&end) <= tol.epsilon {
        return None;
    }
    if !shape.on_edge(curve.edge, start, tol.epsilon) || !shape.on_edge(curve.edge, end, tol.epsilon) {
        return None;
    }
    if (end - start).dot(b - a) < 0.0 {
        Some((end, start))
    } else {
        Some((start, end))
    }
}

/// Resolves `curves` against the chamfered outline.
///
/// `corners` is the carved outline used to address span corners and
/// `tagged` the edge tags of `points`.
pub(crate) fn compose_curves(
    shape: &BaseShape,
    points: &[Point],
    corners: &[Point],
    tagged: &[TaggedEdge],
    curves: &[CurvedEdge],
    tol: &Tolerances,
) -> CurvePlan {
    let n = points.len();
    let mut plan = CurvePlan::empty(n);

    for curve in curves {
        if !curve.is_active() {
            continue;
        }
        if !curve.edge.belongs_to(shape.kind) {
            debug!("Curved edge {} does not exist on a {}", curve.edge, shape.kind);
            continue;
        }
        let Some((from, to)) = chord_for(shape, curve, corners, tol) else {
            debug!("Curved edge {} span {:?} is not on the edge", curve.edge, curve.span);
            continue;
        };
        let slack = tol.epsilon / from.distance_to(&to);

        let mut covered: Vec<(usize, f64, f64)> = Vec::new();
        let mut partial = false;
        for t in tagged.iter().filter(|t| t.edge == curve.edge && t.on_edge) {
            let p = points[t.outline_index];
            let q = points[(t.outline_index + 1) % n];
            let t0 = segment_parameter(p, from, to);
            let t1 = segment_parameter(q, from, to);
            let (lo, hi) = (t0.min(t1), t0.max(t1));
            let inside = lo >= -slack && hi <= 1.0 + slack;
            let overlaps = hi > slack && lo < 1.0 - slack;
            if inside {
                covered.push((t.outline_index, t0.clamp(0.0, 1.0), t1.clamp(0.0, 1.0)));
            } else if overlaps {
                partial = true;
            }
        }

        // Span ends must be real vertices, so a corner consumed by a chamfer
        // leaves the span straight.
        let is_vertex = |c: Point| points.iter().any(|p| p.approx_eq(&c, tol.epsilon));
        if curve.span.is_some() && (partial || !is_vertex(from) || !is_vertex(to)) {
            debug!(
                "Curved edge {} span {:?} does not cover whole segments, leaving it straight",
                curve.edge, curve.span
            );
            continue;
        }
        if covered.is_empty() {
            continue;
        }

        let bezier = edge_curve(from, to, shape.outward_normal(curve.edge), curve.radius, curve.concave);
        let mut claimed = false;
        for (i, t0, t1) in covered {
            if plan.replacements[i].is_none() {
                plan.replacements[i] = Some(bezier.subsegment(t0, t1));
                claimed = true;
            }
        }
        if claimed {
            plan.applied.push(AppliedCurve {
                edge: curve.edge,
                span: curve.span,
                concave: curve.concave,
                radius: curve.radius,
                bezier,
            });
        }
    }
    plan
}
