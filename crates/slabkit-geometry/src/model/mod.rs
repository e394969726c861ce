//! Piece description model.
//!
//! Everything here is plain value data handed to the engine. Shape kinds and
//! canonical edges are closed enums; every lookup on them is an exhaustive
//! `match`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use slabkit_core::PieceError;

use crate::geometry::Point;

mod cutout;
mod modifiers;
mod piece;

pub use cutout::{Cutout, CutoutKind};
pub(crate) use modifiers::checked_index;
pub use modifiers::{AngleCut, CornerRadius, CornerSpan, CurvedEdge};
pub use piece::PieceSpec;

/// Outline kind of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    #[serde(alias = "quarterCircle")]
    QuarterCircle,
    #[serde(alias = "rightTriangle", alias = "triangle")]
    RightTriangle,
}

impl ShapeKind {
    /// Canonical edges in drawing (clockwise) order. Parametric shapes have
    /// none.
    pub fn edges(&self) -> &'static [CanonicalEdge] {
        match self {
            ShapeKind::Rectangle => &[
                CanonicalEdge::Top,
                CanonicalEdge::Right,
                CanonicalEdge::Bottom,
                CanonicalEdge::Left,
            ],
            ShapeKind::RightTriangle => &[
                CanonicalEdge::LegA,
                CanonicalEdge::Hypotenuse,
                CanonicalEdge::LegB,
            ],
            ShapeKind::Circle | ShapeKind::QuarterCircle => &[],
        }
    }

    /// Whether the outline is a vertex list (and so exposes corners).
    pub fn is_straight(&self) -> bool {
        match self {
            ShapeKind::Rectangle | ShapeKind::RightTriangle => true,
            ShapeKind::Circle | ShapeKind::QuarterCircle => false,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => write!(f, "rectangle"),
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::QuarterCircle => write!(f, "quarter_circle"),
            ShapeKind::RightTriangle => write!(f, "right_triangle"),
        }
    }
}

impl FromStr for ShapeKind {
    type Err = PieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "quarter_circle" | "quartercircle" => Ok(ShapeKind::QuarterCircle),
            "right_triangle" | "righttriangle" | "triangle" => Ok(ShapeKind::RightTriangle),
            _ => Err(PieceError::UnknownShape(s.to_string())),
        }
    }
}

/// A named side of a straight shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalEdge {
    Top,
    Right,
    Bottom,
    Left,
    #[serde(alias = "legA")]
    LegA,
    Hypotenuse,
    #[serde(alias = "legB")]
    LegB,
}

impl CanonicalEdge {
    /// Outward normal for edges whose direction never changes. The
    /// hypotenuse depends on the piece proportions and returns `None`.
    pub fn fixed_normal(&self) -> Option<Point> {
        match self {
            CanonicalEdge::Top | CanonicalEdge::LegA => Some(Point::new(0.0, -1.0)),
            CanonicalEdge::Right => Some(Point::new(1.0, 0.0)),
            CanonicalEdge::Bottom => Some(Point::new(0.0, 1.0)),
            CanonicalEdge::Left | CanonicalEdge::LegB => Some(Point::new(-1.0, 0.0)),
            CanonicalEdge::Hypotenuse => None,
        }
    }

    pub fn belongs_to(&self, kind: ShapeKind) -> bool {
        kind.edges().contains(self)
    }
}

impl fmt::Display for CanonicalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanonicalEdge::Top => "top",
            CanonicalEdge::Right => "right",
            CanonicalEdge::Bottom => "bottom",
            CanonicalEdge::Left => "left",
            CanonicalEdge::LegA => "leg_a",
            CanonicalEdge::Hypotenuse => "hypotenuse",
            CanonicalEdge::LegB => "leg_b",
        };
        write!(f, "{}", name)
    }
}
