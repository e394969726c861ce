//! Boundary segmenter.
//!
//! Splits the straight outline into segments tagged with the canonical edge
//! they belong to, ordered along each edge. Chamfer segments are reported
//! separately as angle segments and are skipped here.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use slabkit_core::Tolerances;

use crate::base::BaseShape;
use crate::chamfer::AngleSegment;
use crate::geometry::{point_segment_distance, Point};
use crate::model::CanonicalEdge;

/// One addressable piece of a canonical edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundarySegment {
    pub edge: CanonicalEdge,
    /// Position along the edge, zero based.
    pub index: usize,
    pub start: Point,
    pub end: Point,
    /// `false` for notch walls and floors, which are only assigned to the
    /// nearest edge.
    pub on_edge: bool,
}

impl BoundarySegment {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        point_segment_distance(p, self.start, self.end)
    }
}

/// Canonical edge of one outline edge (`points[i] -> points[i + 1]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TaggedEdge {
    pub outline_index: usize,
    pub edge: CanonicalEdge,
    pub on_edge: bool,
}

fn classify(shape: &BaseShape, a: Point, b: Point, tolerance: f64) -> Option<(CanonicalEdge, bool)> {
    let edges = shape.edges();
    if let Some(edge) = edges
        .iter()
        .find(|e| shape.on_edge(**e, a, tolerance) && shape.on_edge(**e, b, tolerance))
    {
        return Some((*edge, true));
    }

    let score = |edge: CanonicalEdge| {
        shape
            .edge_line(edge)
            .map(|(s, e)| point_segment_distance(a, s, e) + point_segment_distance(b, s, e))
            .unwrap_or(f64::INFINITY)
    };
    edges
        .iter()
        .map(|e| (*e, score(*e)))
        .min_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(Ordering::Equal))
        .map(|(e, _)| (e, false))
}

/// Tags every outline edge that is not a chamfer.
pub(crate) fn tag_edges(
    shape: &BaseShape,
    points: &[Point],
    angle_segments: &[AngleSegment],
    tol: &Tolerances,
) -> Vec<TaggedEdge> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    (0..n)
        .filter_map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            if angle_segments.iter().any(|s| s.matches(a, b, tol.epsilon)) {
                return None;
            }
            let (edge, on_edge) = classify(shape, a, b, tol.epsilon)?;
            Some(TaggedEdge {
                outline_index: i,
                edge,
                on_edge,
            })
        })
        .collect()
}

/// Ordered boundary segments of a straight outline.
///
/// Segments are grouped by canonical edge in the shape's edge order and
/// sorted along each edge's natural direction; `start` and `end` follow that
/// direction too.
pub fn boundary_segments(
    shape: &BaseShape,
    points: &[Point],
    angle_segments: &[AngleSegment],
    tol: &Tolerances,
) -> Vec<BoundarySegment> {
    let n = points.len();
    let tagged = tag_edges(shape, points, angle_segments, tol);
    let mut out = Vec::with_capacity(tagged.len());

    for edge in shape.edges() {
        let dir = shape.natural_direction(*edge);
        let Some((origin, _)) = shape.edge_line(*edge) else {
            continue;
        };
        let key = |p: Point| (p - origin).dot(dir);

        let mut group: Vec<BoundarySegment> = tagged
            .iter()
            .filter(|t| t.edge == *edge)
            .map(|t| {
                let a = points[t.outline_index];
                let b = points[(t.outline_index + 1) % n];
                let (start, end) = if key(b) < key(a) { (b, a) } else { (a, b) };
                BoundarySegment {
                    edge: *edge,
                    index: 0,
                    start,
                    end,
                    on_edge: t.on_edge,
                }
            })
            .collect();
        group.sort_by(|x, y| {
            key(x.midpoint())
                .partial_cmp(&key(y.midpoint()))
                .unwrap_or(Ordering::Equal)
        });
        for (index, mut segment) in group.into_iter().enumerate() {
            segment.index = index;
            out.push(segment);
        }
    }
    out
}
