//! # Slabkit Geometry
//!
//! Boundary geometry for countertop and slab pieces. A piece is a base
//! shape plus declarative modifiers; the engine turns it into a closed
//! outline made of lines and quadratic curves.
//!
//! ## Pipeline
//!
//! 1. **Base shape**: rectangle, right triangle, circle or quarter circle
//! 2. **Notches**: cutouts touching an edge are carved into the outline
//! 3. **Chamfers**: angle cuts replace corners with straight segments
//! 4. **Curved edges**: whole edges or corner spans become bezier arcs
//! 5. **Fillets**: round-over or cove arcs at corners
//!
//! Straight outlines are normalised after every edit: clockwise in y-down
//! coordinates, starting at the top-most then left-most vertex.
//!
//! ```
//! use slabkit_geometry::{compute_outline, AngleCut, PieceSpec};
//!
//! let piece = PieceSpec::rectangle(24.0, 18.0).with_angle_cut(AngleCut::new(0, 2.0, 2.0));
//! let geometry = compute_outline(&piece);
//! assert_eq!(geometry.vertices.len(), 5);
//! assert_eq!(geometry.angle_segments.len(), 1);
//! ```

pub mod base;
pub mod bezier;
pub mod chamfer;
pub mod corners;
pub mod curve;
pub mod engine;
pub mod fillet;
pub mod geometry;
pub mod model;
pub mod notch;
pub mod outline;
pub mod segments;

pub use base::{BaseShape, ParametricPiece};
pub use bezier::{arc_quads, QuadBezier};
pub use chamfer::{apply_chamfers, AngleSegment, Chamfered};
pub use corners::{corner_points, CornerMap, CornerPoint, CornerSource};
pub use curve::{edge_curve, AppliedCurve, CurvePlan};
pub use engine::{compute_outline, CutoutHole, OutlineEngine, PieceGeometry};
pub use fillet::{plan_fillets, FilletArc, FilletPlan};
pub use geometry::{normalize_outline, Bounds, Point};
pub use model::{
    AngleCut, CanonicalEdge, CornerRadius, CornerSpan, CurvedEdge, Cutout, CutoutKind, PieceSpec,
    ShapeKind,
};
pub use notch::{carve_notches, classify_cutout, merge_spans, CutoutPlacement, EdgeSpan};
pub use outline::{Outline, OutlineBuilder, PathCommand};
pub use segments::{boundary_segments, BoundarySegment};

pub use slabkit_core::Tolerances;
