//! Outline engine.
//!
//! Runs the pipeline base outline -> notches -> chamfers -> curves and
//! fillets -> segments. Every stage takes the previous stage's point list
//! and returns a new one; nothing is cached between calls, so computing the
//! same piece twice gives the same geometry.

use serde::Serialize;
use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::{debug, warn};
use uuid::Uuid;

use slabkit_core::Tolerances;

use crate::base::{BaseShape, ParametricPiece};
use crate::bezier::arc_quads_n;
use crate::chamfer::{apply_chamfers, AngleSegment};
use crate::corners::{corner_points, CornerPoint};
use crate::curve::{compose_curves, AppliedCurve, CurvePlan};
use crate::fillet::{plan_fillets, FilletArc, FilletPlan};
use crate::geometry::{Bounds, Point};
use crate::model::{CutoutKind, PieceSpec, ShapeKind};
use crate::notch::{carve_notches, classify_cutout, CutoutPlacement};
use crate::outline::{Outline, OutlineBuilder};
use crate::segments::{boundary_segments, tag_edges, BoundarySegment};

/// An interior cutout drawn as a separate hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoutHole {
    pub id: Uuid,
    pub kind: CutoutKind,
    pub bounds: Bounds,
    pub outline: Outline,
}

/// Everything computed for one piece.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceGeometry {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    /// Drawn outline, curves and fillets included.
    pub outline: Outline,
    /// Straight outline after notches and chamfers. Empty for parametric
    /// shapes.
    pub vertices: Vec<Point>,
    pub holes: Vec<CutoutHole>,
    pub segments: Vec<BoundarySegment>,
    pub corners: Vec<CornerPoint>,
    pub angle_segments: Vec<AngleSegment>,
    pub curves: Vec<AppliedCurve>,
    pub fillets: Vec<FilletArc>,
    #[serde(skip)]
    samples: usize,
}

impl PieceGeometry {
    fn empty(piece: &PieceSpec, samples: usize) -> Self {
        Self {
            kind: piece.kind,
            width: piece.width,
            height: piece.height,
            outline: Outline::default(),
            vertices: Vec::new(),
            holes: Vec::new(),
            segments: Vec::new(),
            corners: Vec::new(),
            angle_segments: Vec::new(),
            curves: Vec::new(),
            fillets: Vec::new(),
            samples,
        }
    }

    /// Whether `p` is on the material: inside the outline and outside every
    /// hole.
    pub fn contains(&self, p: Point) -> bool {
        self.outline.contains(p, self.samples)
            && !self.holes.iter().any(|h| h.outline.contains(p, self.samples))
    }

    pub fn distance_to_outline(&self, p: Point) -> f64 {
        self.outline.distance_to(p, self.samples)
    }

    /// Closest boundary segment within `max_distance`.
    pub fn nearest_segment(&self, p: Point, max_distance: f64) -> Option<&BoundarySegment> {
        self.segments
            .iter()
            .map(|s| (s, s.distance_to(p)))
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(s, _)| s)
    }

    /// Closest corner point within `max_distance`.
    pub fn nearest_corner(&self, p: Point, max_distance: f64) -> Option<&CornerPoint> {
        self.corners
            .iter()
            .map(|c| (c, c.point.distance_to(&p)))
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(c, _)| c)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.outline.bounds()
    }

    /// Ids of cutouts drawn as holes, in declaration order.
    pub fn interior_cutouts(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.holes.iter().map(|h| h.id)
    }
}

/// Computes piece geometry with a fixed set of tolerances.
#[derive(Debug, Clone, Default)]
pub struct OutlineEngine {
    tolerances: Tolerances,
}

impl OutlineEngine {
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Runs the full pipeline. Never fails: an invalid piece gives an empty
    /// geometry and invalid modifiers are left out.
    pub fn compute(&self, piece: &PieceSpec) -> PieceGeometry {
        let tol = &self.tolerances;
        if let Err(e) = piece.validate() {
            warn!("Not computing outline for invalid piece: {}", e);
            return PieceGeometry::empty(piece, tol.curve_samples);
        }

        let shape = BaseShape::new(piece.kind, piece.width, piece.height);
        let mut geometry = PieceGeometry::empty(piece, tol.curve_samples);
        geometry.holes = interior_holes(&shape, piece, tol);

        if !shape.kind.is_straight() {
            geometry.outline = parametric_outline(&shape, tol);
            debug!("Computed {} outline", shape.kind);
            return geometry;
        }

        let carved = carve_notches(&shape, &piece.cutouts, tol);
        let chamfered = apply_chamfers(&carved, &piece.angle_cuts, tol);
        let points = chamfered.points;

        let tagged = tag_edges(&shape, &points, &chamfered.angle_segments, tol);
        let curves = compose_curves(&shape, &points, &carved, &tagged, &piece.curved_edges, tol);
        let fillets = plan_fillets(&points, &carved, &piece.corner_radii, &curves, tol);

        geometry.outline = assemble(&points, &curves, &fillets, tol);
        geometry.segments = boundary_segments(&shape, &points, &chamfered.angle_segments, tol);
        let hole_corners: Vec<(Uuid, Bounds)> =
            geometry.holes.iter().map(|h| (h.id, h.bounds)).collect();
        geometry.corners = corner_points(&carved, &hole_corners);
        geometry.angle_segments = chamfered.angle_segments;
        geometry.curves = curves.applied;
        geometry.fillets = fillets.into_arcs();
        geometry.vertices = points;

        debug!(
            "Computed {} outline: {} vertices, {} segments, {} corners",
            shape.kind,
            geometry.vertices.len(),
            geometry.segments.len(),
            geometry.corners.len()
        );
        geometry
    }
}

/// Computes geometry with default tolerances.
pub fn compute_outline(piece: &PieceSpec) -> PieceGeometry {
    OutlineEngine::default().compute(piece)
}

fn interior_holes(shape: &BaseShape, piece: &PieceSpec, tol: &Tolerances) -> Vec<CutoutHole> {
    piece
        .cutouts
        .iter()
        .filter_map(|cutout| match classify_cutout(shape, cutout, tol) {
            CutoutPlacement::Interior(bounds) => Some(CutoutHole {
                id: cutout.id,
                kind: cutout.kind,
                bounds,
                outline: hole_outline(cutout.kind, &bounds, tol),
            }),
            CutoutPlacement::Unplaced
            | CutoutPlacement::EdgeNotch { .. }
            | CutoutPlacement::CornerNotch { .. }
            | CutoutPlacement::Inert => None,
        })
        .collect()
}

fn hole_outline(kind: CutoutKind, bounds: &Bounds, tol: &Tolerances) -> Outline {
    match kind {
        CutoutKind::Circle => {
            let quads = arc_quads_n(
                bounds.center(),
                bounds.width() / 2.0,
                bounds.height() / 2.0,
                -FRAC_PI_2,
                TAU,
                8,
            );
            let mut builder = OutlineBuilder::new(
                Point::new(bounds.center().x, bounds.min_y),
                tol.dedupe_distance,
            );
            for q in &quads {
                builder.quad(q);
            }
            builder.close()
        }
        CutoutKind::Square | CutoutKind::Rectangle => Outline::from_polygon(&bounds.corners()),
    }
}

fn parametric_outline(shape: &BaseShape, tol: &Tolerances) -> Outline {
    let mut builder = OutlineBuilder::new(shape.parametric_start(), tol.dedupe_distance);
    for piece in shape.parametric_outline() {
        match piece {
            ParametricPiece::Line(p) => builder.line_to(p),
            ParametricPiece::Curve(q) => builder.quad(&q),
        }
    }
    builder.close()
}

/// Draws the straight outline with curve replacements and fillet arcs.
fn assemble(points: &[Point], curves: &CurvePlan, fillets: &FilletPlan, tol: &Tolerances) -> Outline {
    let n = points.len();
    if n < 3 {
        return Outline::from_polygon(points);
    }
    let entry = |i: usize| fillets.get(i).map(|f| f.start).unwrap_or(points[i]);
    let exit = |i: usize| fillets.get(i).map(|f| f.end).unwrap_or(points[i]);

    let mut builder = OutlineBuilder::new(exit(0), tol.dedupe_distance);
    for i in 0..n {
        let j = (i + 1) % n;
        if let Some(curve) = curves.replacements.get(i).copied().flatten() {
            builder.quad(&curve);
        }
        builder.line_to(entry(j));
        if let Some(fillet) = fillets.get(j) {
            for q in &fillet.quads {
                builder.quad(q);
            }
        }
    }
    builder.close()
}
