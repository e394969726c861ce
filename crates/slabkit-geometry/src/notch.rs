//! Notch carver.
//!
//! Cutouts touching the boundary are carved into the outline. A notch on a
//! single edge becomes an [`EdgeSpan`]; spans on the same edge are merged
//! and stepped in while walking the edges. A notch touching two adjacent
//! edges is an L-shaped corner cut, applied afterwards to the normalised
//! list.

use smallvec::SmallVec;
use std::cmp::Ordering;
use tracing::{debug, warn};
use uuid::Uuid;

use slabkit_core::Tolerances;

use crate::base::BaseShape;
use crate::geometry::{nearest_point_index, normalize_outline, Bounds, Point};
use crate::model::{CanonicalEdge, Cutout, ShapeKind};

/// Deepest a span may cut, as a fraction of the piece across that edge.
const SPAN_DEPTH_LIMIT: f64 = 0.98;

/// Part of an edge removed by a notch. `start` and `end` are distances from
/// the edge's first corner in drawing order, `depth` is measured inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpan {
    pub start: f64,
    pub end: f64,
    pub depth: f64,
}

impl EdgeSpan {
    pub fn new(start: f64, end: f64, depth: f64) -> Self {
        Self { start, end, depth }
    }
}

/// Union of overlapping spans; the deeper cut wins where they overlap.
pub fn merge_spans(spans: &[EdgeSpan]) -> Vec<EdgeSpan> {
    let mut sorted: Vec<EdgeSpan> = spans.to_vec();
    sorted.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(Ordering::Equal)
            .then(a.end.partial_cmp(&b.end).unwrap_or(Ordering::Equal))
    });

    let mut merged: Vec<EdgeSpan> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
                last.depth = last.depth.max(span.depth);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// How a cutout relates to the piece outline.
#[derive(Debug, Clone, PartialEq)]
pub enum CutoutPlacement {
    /// Negative centre or no size.
    Unplaced,
    /// Separate hole inside the piece.
    Interior(Bounds),
    /// Carved into a single edge.
    EdgeNotch { edge: CanonicalEdge, span: EdgeSpan },
    /// L-shaped cut at the base corner shared by two touched edges.
    CornerNotch { corner: usize, footprint: Bounds },
    /// Touches the boundary in a way that cannot be carved.
    Inert,
}

impl CutoutPlacement {
    pub fn is_notch(&self) -> bool {
        matches!(
            self,
            CutoutPlacement::EdgeNotch { .. } | CutoutPlacement::CornerNotch { .. }
        )
    }
}

/// Boundary lines touched by `rect`, snapping its sides onto the lines they
/// touch.
pub fn touched_edges(
    shape: &BaseShape,
    rect: &mut Bounds,
    threshold: f64,
) -> SmallVec<[CanonicalEdge; 4]> {
    let mut touched = SmallVec::new();
    let (w, h) = (shape.width, shape.height);
    for edge in shape.edges() {
        let hit = match edge {
            CanonicalEdge::Top | CanonicalEdge::LegA => {
                let hit = rect.min_y <= threshold;
                if hit {
                    rect.min_y = 0.0;
                }
                hit
            }
            CanonicalEdge::Right => {
                let hit = rect.max_x >= w - threshold;
                if hit {
                    rect.max_x = w;
                }
                hit
            }
            CanonicalEdge::Bottom => {
                let hit = rect.max_y >= h - threshold;
                if hit {
                    rect.max_y = h;
                }
                hit
            }
            CanonicalEdge::Left | CanonicalEdge::LegB => {
                let hit = rect.min_x <= threshold;
                if hit {
                    rect.min_x = 0.0;
                }
                hit
            }
            // Tested on the far corner against the diagonal, not by axis.
            CanonicalEdge::Hypotenuse => {
                let far = Point::new(rect.max_x, rect.max_y);
                shape.signed_distance(*edge, far) >= -threshold
            }
        };
        if hit {
            touched.push(*edge);
        }
    }
    touched
}

/// Gap between `rect` and the line of `edge`.
fn gap_to_edge(shape: &BaseShape, rect: &Bounds, edge: CanonicalEdge) -> f64 {
    match edge {
        CanonicalEdge::Top | CanonicalEdge::LegA => rect.min_y,
        CanonicalEdge::Right => shape.width - rect.max_x,
        CanonicalEdge::Bottom => shape.height - rect.max_y,
        CanonicalEdge::Left | CanonicalEdge::LegB => rect.min_x,
        CanonicalEdge::Hypotenuse => {
            -shape.signed_distance(edge, Point::new(rect.max_x, rect.max_y))
        }
    }
}

/// Moves a free-floating notch onto its nearest boundary line.
fn snap_to_nearest_edge(shape: &BaseShape, rect: &Bounds) -> Option<(CanonicalEdge, Bounds)> {
    let (edge, gap) = shape
        .edges()
        .iter()
        .map(|e| (*e, gap_to_edge(shape, rect, *e)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))?;
    let shift = shape.outward_normal(edge) * gap;
    Some((
        edge,
        Bounds::new(
            rect.min_x + shift.x,
            rect.min_y + shift.y,
            rect.max_x + shift.x,
            rect.max_y + shift.y,
        ),
    ))
}

/// Projects `rect` onto `edge` to get the removed span.
fn span_on_edge(shape: &BaseShape, edge: CanonicalEdge, rect: &Bounds) -> Option<EdgeSpan> {
    let (a, b) = shape.edge_line(edge)?;
    let along = (b - a).normalized()?;
    let inward = -shape.outward_normal(edge);
    let len = a.distance_to(&b);

    let mut start = f64::INFINITY;
    let mut end = f64::NEG_INFINITY;
    let mut depth = f64::NEG_INFINITY;
    for c in rect.corners() {
        let rel = c - a;
        start = start.min(rel.dot(along));
        end = end.max(rel.dot(along));
        depth = depth.max(rel.dot(inward));
    }
    let max_depth = shape.perpendicular_extent(edge) * SPAN_DEPTH_LIMIT;
    Some(EdgeSpan::new(
        start.clamp(0.0, len),
        end.clamp(0.0, len),
        depth.min(max_depth),
    ))
}

/// Decides whether `cutout` is a hole, an edge notch or a corner notch.
pub fn classify_cutout(shape: &BaseShape, cutout: &Cutout, tol: &Tolerances) -> CutoutPlacement {
    let Some(footprint) = cutout.footprint() else {
        return CutoutPlacement::Unplaced;
    };
    if !shape.kind.is_straight() {
        if cutout.is_notch {
            debug!("{} pieces cannot be notched, drawing cutout {} as a hole", shape.kind, cutout.id);
        }
        return CutoutPlacement::Interior(footprint);
    }

    let mut rect = Bounds::new(
        footprint.min_x.max(0.0),
        footprint.min_y.max(0.0),
        footprint.max_x.min(shape.width),
        footprint.max_y.min(shape.height),
    );
    if rect.width() <= tol.epsilon || rect.height() <= tol.epsilon {
        debug!("Cutout {} lies outside the piece", cutout.id);
        return CutoutPlacement::Inert;
    }

    let threshold = tol.snap_distance.max(tol.epsilon);
    let mut touched = touched_edges(shape, &mut rect, threshold);
    if touched.is_empty() {
        if !cutout.is_notch {
            return CutoutPlacement::Interior(footprint);
        }
        match snap_to_nearest_edge(shape, &rect) {
            Some((edge, snapped)) => {
                debug!("Notch {} snapped onto {} edge", cutout.id, edge);
                rect = snapped;
                touched.push(edge);
            }
            None => return CutoutPlacement::Inert,
        }
    }

    match touched.as_slice() {
        [edge] => match span_on_edge(shape, *edge, &rect) {
            Some(span) if span.end - span.start > tol.epsilon && span.depth > tol.epsilon => {
                CutoutPlacement::EdgeNotch { edge: *edge, span }
            }
            _ => {
                debug!("Notch {} has no usable span on {} edge", cutout.id, edge);
                CutoutPlacement::Inert
            }
        },
        [a, b] => match shape.corner_between(*a, *b) {
            Some(corner) => CutoutPlacement::CornerNotch {
                corner,
                footprint: rect,
            },
            None => {
                warn!(
                    "Notch {} touches opposite edges {} and {}, ignoring it",
                    cutout.id, a, b
                );
                CutoutPlacement::Inert
            }
        },
        [_, _, _] if shape.kind == ShapeKind::RightTriangle => {
            let center = rect.center();
            match nearest_point_index(&shape.corners(), center) {
                Some(corner) => CutoutPlacement::CornerNotch {
                    corner,
                    footprint: rect,
                },
                None => CutoutPlacement::Inert,
            }
        }
        _ => {
            warn!(
                "Notch {} touches {} edges and would split the piece, ignoring it",
                cutout.id,
                touched.len()
            );
            CutoutPlacement::Inert
        }
    }
}

#[derive(Debug, Clone)]
struct CornerNotch {
    id: Uuid,
    /// Position in the cutout list.
    order: usize,
    target: Point,
    index: usize,
    footprint: Bounds,
}

/// Vertex a corner notch belongs to: anchor, then hint, then the corner
/// found by classification. Always nearest-vertex matched.
fn resolve_corner_notch(
    shape: &BaseShape,
    cutout: &Cutout,
    corner: usize,
    points: &[Point],
) -> Option<usize> {
    let base = shape.corners();
    let reference = match (cutout.anchor, cutout.corner_hint) {
        (Some(anchor), _) => anchor,
        (None, Some(hint)) if hint < base.len() => base[hint],
        _ => *base.get(corner)?,
    };
    nearest_point_index(points, reference)
}

/// Vertex a pending corner notch cuts: its original corner while that still
/// exists, otherwise the convex vertex under its footprint nearest to it.
/// `None` once the footprint holds no convex vertex, i.e. an earlier cut
/// already removed its material.
fn current_corner(points: &[Point], notch: &CornerNotch, tol: &Tolerances) -> Option<usize> {
    if let Some(i) = nearest_point_index(points, notch.target)
        .filter(|i| points[*i].distance_to(&notch.target) <= tol.epsilon)
    {
        return Some(i);
    }
    let n = points.len();
    (0..n)
        .filter(|i| notch.footprint.contains(points[*i], tol.epsilon))
        .filter(|i| {
            let v = points[*i];
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            (v - prev).cross(next - v) > 0.0
        })
        .min_by(|a, b| {
            points[*a]
                .distance_to(&notch.target)
                .partial_cmp(&points[*b].distance_to(&notch.target))
                .unwrap_or(Ordering::Equal)
        })
}

/// Deepest a step-in starting at `p` on `edge` may go before it reaches
/// another edge of the base shape.
fn step_in_limit(shape: &BaseShape, edge: CanonicalEdge, p: Point) -> f64 {
    let inward = -shape.outward_normal(edge);
    shape
        .edges()
        .iter()
        .filter(|other| **other != edge)
        .filter_map(|other| {
            let approach = inward.dot(shape.outward_normal(*other));
            (approach > 1e-9).then(|| (-shape.signed_distance(*other, p)).max(0.0) / approach)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Replaces vertex `index` with an L-shaped cut sized to `footprint`.
fn cut_corner(points: &[Point], index: usize, footprint: &Bounds, tol: &Tolerances) -> Option<Vec<Point>> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let v = points[index];
    let prev = points[(index + n - 1) % n];
    let next = points[(index + 1) % n];
    let to_prev = (prev - v).normalized()?;
    let to_next = (next - v).normalized()?;

    let extent = |dir: Point| {
        footprint
            .corners()
            .iter()
            .map(|c| (*c - v).dot(dir))
            .fold(0.0_f64, f64::max)
    };
    let a = extent(to_prev).min(v.distance_to(&prev) * tol.corner_notch_limit);
    let b = extent(to_next).min(v.distance_to(&next) * tol.corner_notch_limit);
    if a <= tol.epsilon || b <= tol.epsilon {
        return None;
    }

    let mut out = Vec::with_capacity(n + 2);
    out.extend_from_slice(&points[..index]);
    out.push(v + to_prev * a);
    out.push(v + to_prev * a + to_next * b);
    out.push(v + to_next * b);
    out.extend_from_slice(&points[index + 1..]);
    Some(out)
}

/// Carves every notch among `cutouts` into the base outline.
///
/// Returns the normalised carved outline. Parametric shapes return an empty
/// list.
pub fn carve_notches(shape: &BaseShape, cutouts: &[Cutout], tol: &Tolerances) -> Vec<Point> {
    let corners = shape.corners();
    if corners.is_empty() {
        return corners;
    }

    let edges = shape.edges();
    let mut spans: Vec<Vec<EdgeSpan>> = vec![Vec::new(); edges.len()];
    let mut corner_cuts: Vec<(usize, &Cutout, usize, Bounds)> = Vec::new();
    for (order, cutout) in cutouts.iter().enumerate() {
        match classify_cutout(shape, cutout, tol) {
            CutoutPlacement::EdgeNotch { edge, span } => {
                if let Some(i) = edges.iter().position(|e| *e == edge) {
                    spans[i].push(span);
                }
            }
            CutoutPlacement::CornerNotch { corner, footprint } => {
                corner_cuts.push((order, cutout, corner, footprint));
            }
            CutoutPlacement::Unplaced | CutoutPlacement::Interior(_) | CutoutPlacement::Inert => {}
        }
    }

    let mut points = Vec::with_capacity(corners.len() + 4 * cutouts.len());
    for (i, edge) in edges.iter().enumerate() {
        let Some((a, b)) = shape.edge_line(*edge) else {
            continue;
        };
        points.push(a);
        let Some(along) = (b - a).normalized() else {
            continue;
        };
        let inward = -shape.outward_normal(*edge);
        for span in merge_spans(&spans[i]) {
            let enter = a + along * span.start;
            let exit = a + along * span.end;
            // Near an acute corner the floor would cross the neighbouring leg
            let limit = step_in_limit(shape, *edge, enter).min(step_in_limit(shape, *edge, exit));
            let depth = span.depth.min(limit * SPAN_DEPTH_LIMIT);
            if depth <= tol.epsilon {
                debug!("Notch on {} edge at {:.3} has no room to step in", edge, span.start);
                continue;
            }
            points.push(enter);
            points.push(enter + inward * depth);
            points.push(exit + inward * depth);
            points.push(exit);
        }
    }
    let mut points = normalize_outline(&points, tol.dedupe_distance);

    let mut pending: Vec<CornerNotch> = corner_cuts
        .into_iter()
        .filter_map(|(order, cutout, corner, footprint)| {
            let index = resolve_corner_notch(shape, cutout, corner, &points)?;
            Some(CornerNotch {
                id: cutout.id,
                order,
                target: points[index],
                index,
                footprint,
            })
        })
        .collect();
    pending.sort_by(|a, b| {
        a.index
            .cmp(&b.index)
            .then(
                b.footprint
                    .area()
                    .partial_cmp(&a.footprint.area())
                    .unwrap_or(Ordering::Equal),
            )
            .then(a.order.cmp(&b.order))
    });

    for notch in pending {
        let Some(index) = current_corner(&points, &notch, tol) else {
            debug!("Corner notch {} lies inside an earlier cut, skipping", notch.id);
            continue;
        };
        match cut_corner(&points, index, &notch.footprint, tol) {
            Some(cut) => points = normalize_outline(&cut, tol.dedupe_distance),
            None => debug!("Corner notch {} is degenerate, skipping", notch.id),
        }
    }
    points
}
