//! Fillet applier.
//!
//! A round-over replaces a corner with an arc tangent to both adjacent
//! edges. A cove (`inside`) cuts a quarter-round into the corner, centred
//! on the vertex. Corners touching a curved edge are never filleted.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use tracing::debug;

use slabkit_core::Tolerances;

use crate::bezier::{arc_quads, QuadBezier};
use crate::corners::CornerMap;
use crate::curve::CurvePlan;
use crate::geometry::Point;
use crate::model::{checked_index, CornerRadius};

/// Shortest cove may leave of an edge, as a fraction of it.
const COVE_EDGE_LIMIT: f64 = 0.98;

/// Interior angles this close to 0 or 180 degrees are left sharp.
const MIN_CORNER_ANGLE: f64 = 1e-3;

/// Arc drawn in place of a corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilletArc {
    pub corner_index: usize,
    pub vertex: Point,
    pub center: Point,
    pub radius: f64,
    /// Point on the incoming edge where the arc starts.
    pub start: Point,
    /// Point on the outgoing edge where the arc ends.
    pub end: Point,
    pub inside: bool,
    pub quads: Vec<QuadBezier>,
}

/// Fillets keyed by vertex of the chamfered outline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilletPlan {
    by_vertex: Vec<Option<FilletArc>>,
}

impl FilletPlan {
    pub fn get(&self, vertex: usize) -> Option<&FilletArc> {
        self.by_vertex.get(vertex).and_then(Option::as_ref)
    }

    /// Applied fillets in outline order.
    pub fn arcs(&self) -> impl Iterator<Item = &FilletArc> {
        self.by_vertex.iter().flatten()
    }

    pub fn into_arcs(self) -> Vec<FilletArc> {
        self.by_vertex.into_iter().flatten().collect()
    }
}

fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Arc around `center` from `start` to `end` along the shorter way.
fn arc_between(center: Point, radius: f64, start: Point, end: Point) -> Vec<QuadBezier> {
    let a0 = (start.y - center.y).atan2(start.x - center.x);
    let a1 = (end.y - center.y).atan2(end.x - center.x);
    let mut quads = arc_quads(center, radius, radius, a0, wrap_angle(a1 - a0));
    // Pin the ends to the exact tangent points
    if let Some(first) = quads.first_mut() {
        first.from = start;
    }
    if let Some(last) = quads.last_mut() {
        last.to = end;
    }
    quads
}

struct Request {
    corner_index: usize,
    radius: f64,
    inside: bool,
}

/// Builds the arc for one corner. `avail_in`/`avail_out` is how much of each
/// adjacent edge the fillet may use.
fn fillet_at(
    prev: Point,
    vertex: Point,
    next: Point,
    request: &Request,
    avail_in: f64,
    avail_out: f64,
    tol: &Tolerances,
) -> Option<FilletArc> {
    let to_prev = (prev - vertex).normalized()?;
    let to_next = (next - vertex).normalized()?;
    let theta = to_prev.dot(to_next).clamp(-1.0, 1.0).acos();
    if theta < MIN_CORNER_ANGLE || PI - theta < MIN_CORNER_ANGLE {
        return None;
    }
    let avail = avail_in.min(avail_out);

    let (radius, start, end, center) = if request.inside {
        let radius = request.radius.min(avail * COVE_EDGE_LIMIT);
        (
            radius,
            vertex + to_prev * radius,
            vertex + to_next * radius,
            vertex,
        )
    } else {
        let half = theta / 2.0;
        let radius = request.radius.min(avail * half.tan());
        let tangent = radius / half.tan();
        let bisector = (to_prev + to_next).normalized()?;
        (
            radius,
            vertex + to_prev * tangent,
            vertex + to_next * tangent,
            vertex + bisector * (radius / half.sin()),
        )
    };
    if radius <= tol.epsilon || start.distance_to(&vertex) <= tol.epsilon {
        return None;
    }

    Some(FilletArc {
        corner_index: request.corner_index,
        vertex,
        center,
        radius,
        start,
        end,
        inside: request.inside,
        quads: arc_between(center, radius, start, end),
    })
}

/// Resolves corner radii against the chamfered outline and computes their
/// arcs. `corners` is the carved outline the indices refer to.
pub fn plan_fillets(
    points: &[Point],
    corners: &[Point],
    radii: &[CornerRadius],
    curves: &CurvePlan,
    tol: &Tolerances,
) -> FilletPlan {
    let n = points.len();
    let mut requests: Vec<Option<Request>> = (0..n).map(|_| None).collect();
    let map = CornerMap::resolve(corners, points, tol.epsilon);

    for r in radii {
        if !r.is_active() {
            continue;
        }
        let Some(corner) = checked_index(r.corner_index, corners.len()) else {
            debug!("Corner radius index {} is outside the outline", r.corner_index);
            continue;
        };
        let Some(vertex) = map.vertex(corner) else {
            debug!("Corner {} no longer exists, not filleting it", corner);
            continue;
        };
        if curves.occupies_vertex(vertex) {
            debug!("Corner {} touches a curved edge, not filleting it", corner);
            continue;
        }
        if requests[vertex].is_none() {
            requests[vertex] = Some(Request {
                corner_index: corner,
                radius: r.radius,
                inside: r.inside,
            });
        }
    }

    let by_vertex = (0..n)
        .map(|i| {
            let request = requests[i].as_ref()?;
            let p = (i + n - 1) % n;
            let q = (i + 1) % n;
            let len_in = points[i].distance_to(&points[p]);
            let len_out = points[i].distance_to(&points[q]);
            // Shared edges are split between the two fillets
            let avail_in = if requests[p].is_some() { len_in / 2.0 } else { len_in };
            let avail_out = if requests[q].is_some() { len_out / 2.0 } else { len_out };
            let arc = fillet_at(points[p], points[i], points[q], request, avail_in, avail_out, tol);
            if arc.is_none() {
                debug!("Corner {} is degenerate, leaving it sharp", request.corner_index);
            }
            arc
        })
        .collect();

    FilletPlan { by_vertex }
}
