//! Base outline builder.
//!
//! Straight shapes are vertex lists in corner order. Circles and quarter
//! circles are parametric and only ever become path commands.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::bezier::{arc_quads_n, QuadBezier};
use crate::geometry::Point;
use crate::model::{CanonicalEdge, ShapeKind};

/// Nominal shape and size of a piece, with the canonical edge geometry
/// derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseShape {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
}

impl BaseShape {
    pub fn new(kind: ShapeKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
        }
    }

    /// Unmodified corners in clockwise order starting at the origin.
    pub fn corners(&self) -> Vec<Point> {
        let (w, h) = (self.width, self.height);
        match self.kind {
            ShapeKind::Rectangle => vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
            ShapeKind::RightTriangle => vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(0.0, h),
            ],
            ShapeKind::Circle | ShapeKind::QuarterCircle => Vec::new(),
        }
    }

    pub fn edges(&self) -> &'static [CanonicalEdge] {
        self.kind.edges()
    }

    fn edge_position(&self, edge: CanonicalEdge) -> Option<usize> {
        self.edges().iter().position(|e| *e == edge)
    }

    /// Nominal endpoints of `edge` in drawing order.
    pub fn edge_line(&self, edge: CanonicalEdge) -> Option<(Point, Point)> {
        let i = self.edge_position(edge)?;
        let corners = self.corners();
        let n = corners.len();
        Some((corners[i], corners[(i + 1) % n]))
    }

    /// Corner indices at the start and end of `edge`.
    pub fn edge_corners(&self, edge: CanonicalEdge) -> Option<(usize, usize)> {
        let i = self.edge_position(edge)?;
        Some((i, (i + 1) % self.edges().len()))
    }

    /// The corner shared by two edges, if they are adjacent.
    pub fn corner_between(&self, a: CanonicalEdge, b: CanonicalEdge) -> Option<usize> {
        let (a_start, a_end) = self.edge_corners(a)?;
        let (b_start, b_end) = self.edge_corners(b)?;
        if a_end == b_start {
            Some(a_end)
        } else if b_end == a_start {
            Some(b_end)
        } else {
            None
        }
    }

    pub fn edge_length(&self, edge: CanonicalEdge) -> f64 {
        self.edge_line(edge)
            .map(|(a, b)| a.distance_to(&b))
            .unwrap_or(0.0)
    }

    /// Outward unit normal. Fixed for axis edges, the drawing direction
    /// turned a quarter for the hypotenuse.
    pub fn outward_normal(&self, edge: CanonicalEdge) -> Point {
        if let Some(n) = edge.fixed_normal() {
            return n;
        }
        self.edge_line(edge)
            .and_then(|(a, b)| (b - a).normalized())
            .map(|d| d.outward_perp())
            .unwrap_or_default()
    }

    /// Unit direction segments along `edge` are ordered by.
    pub fn natural_direction(&self, edge: CanonicalEdge) -> Point {
        match edge {
            CanonicalEdge::Top | CanonicalEdge::Bottom | CanonicalEdge::LegA => {
                Point::new(1.0, 0.0)
            }
            CanonicalEdge::Right | CanonicalEdge::Left | CanonicalEdge::LegB => {
                Point::new(0.0, 1.0)
            }
            CanonicalEdge::Hypotenuse => self
                .edge_line(edge)
                .and_then(|(a, b)| (b - a).normalized())
                .unwrap_or_default(),
        }
    }

    /// Distance across the piece measured perpendicular to `edge`.
    pub fn perpendicular_extent(&self, edge: CanonicalEdge) -> f64 {
        let (w, h) = (self.width, self.height);
        match edge {
            CanonicalEdge::Top | CanonicalEdge::Bottom | CanonicalEdge::LegA => h,
            CanonicalEdge::Left | CanonicalEdge::Right | CanonicalEdge::LegB => w,
            CanonicalEdge::Hypotenuse => {
                let diag = w.hypot(h);
                if diag > 0.0 {
                    w * h / diag
                } else {
                    0.0
                }
            }
        }
    }

    /// Signed distance from `p` to the line of `edge`, positive outside.
    pub fn signed_distance(&self, edge: CanonicalEdge, p: Point) -> f64 {
        match self.edge_line(edge) {
            Some((a, _)) => (p - a).dot(self.outward_normal(edge)),
            None => f64::INFINITY,
        }
    }

    /// Whether `p` lies on the nominal segment of `edge`.
    pub fn on_edge(&self, edge: CanonicalEdge, p: Point, tolerance: f64) -> bool {
        match self.edge_line(edge) {
            Some((a, b)) => crate::geometry::point_segment_distance(p, a, b) <= tolerance,
            None => false,
        }
    }

    /// Closed curve of a parametric shape as quadratic beziers, clockwise
    /// from its top-most/left-most point. Empty for straight shapes.
    pub fn parametric_outline(&self) -> Vec<ParametricPiece> {
        let (w, h) = (self.width, self.height);
        match self.kind {
            ShapeKind::Circle => {
                let center = Point::new(w / 2.0, h / 2.0);
                arc_quads_n(center, w / 2.0, h / 2.0, -FRAC_PI_2, TAU, 8)
                    .into_iter()
                    .map(ParametricPiece::Curve)
                    .collect()
            }
            ShapeKind::QuarterCircle => {
                let mut out = vec![ParametricPiece::Line(Point::new(w, 0.0))];
                out.extend(
                    arc_quads_n(Point::new(0.0, 0.0), w, h, 0.0, FRAC_PI_2, 2)
                        .into_iter()
                        .map(ParametricPiece::Curve),
                );
                out.push(ParametricPiece::Line(Point::new(0.0, 0.0)));
                out
            }
            ShapeKind::Rectangle | ShapeKind::RightTriangle => Vec::new(),
        }
    }

    /// Where a parametric outline begins.
    pub fn parametric_start(&self) -> Point {
        match self.kind {
            ShapeKind::Circle => Point::new(self.width / 2.0, 0.0),
            ShapeKind::QuarterCircle
            | ShapeKind::Rectangle
            | ShapeKind::RightTriangle => Point::new(0.0, 0.0),
        }
    }
}

/// One piece of a parametric outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParametricPiece {
    Line(Point),
    Curve(QuadBezier),
}
