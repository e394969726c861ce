use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoutKind {
    Circle,
    Square,
    Rectangle,
}

/// A sink, cooktop or notch opening.
///
/// Whether it is carved into the outline or drawn as a separate hole is
/// decided by the engine from its placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    /// Nil when absent from a piece file, then derived from its position.
    #[serde(default)]
    pub id: Uuid,
    pub kind: CutoutKind,
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Forces boundary carving even when the cutout does not touch an edge.
    #[serde(default)]
    pub is_notch: bool,
    /// Corner notches only: a point near the intended corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
    /// Corner notches only: the intended corner index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_hint: Option<usize>,
}

impl Cutout {
    pub fn new(kind: CutoutKind, width: f64, height: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            width,
            height,
            center_x,
            center_y,
            is_notch: false,
            anchor: None,
            corner_hint: None,
        }
    }

    pub fn rectangle(width: f64, height: f64, center_x: f64, center_y: f64) -> Self {
        Self::new(CutoutKind::Rectangle, width, height, center_x, center_y)
    }

    pub fn circle(diameter: f64, center_x: f64, center_y: f64) -> Self {
        Self::new(CutoutKind::Circle, diameter, diameter, center_x, center_y)
    }

    pub fn with_notch(mut self, is_notch: bool) -> Self {
        self.is_notch = is_notch;
        self
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_corner_hint(mut self, corner: usize) -> Self {
        self.corner_hint = Some(corner);
        self
    }

    /// Width and height of the footprint. Squares and circles only use
    /// `width`.
    pub fn size(&self) -> (f64, f64) {
        match self.kind {
            CutoutKind::Circle | CutoutKind::Square => (self.width, self.width),
            CutoutKind::Rectangle => (self.width, self.height),
        }
    }

    pub fn is_placed(&self) -> bool {
        let (w, h) = self.size();
        self.center_x.is_finite()
            && self.center_y.is_finite()
            && self.center_x >= 0.0
            && self.center_y >= 0.0
            && w.is_finite()
            && h.is_finite()
            && w > 0.0
            && h > 0.0
    }

    /// Bounding rectangle, `None` while unplaced.
    pub fn footprint(&self) -> Option<Bounds> {
        if !self.is_placed() {
            return None;
        }
        let (w, h) = self.size();
        Some(Bounds::new(
            self.center_x - w / 2.0,
            self.center_y - h / 2.0,
            self.center_x + w / 2.0,
            self.center_y + h / 2.0,
        ))
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}
