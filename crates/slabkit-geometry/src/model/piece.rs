use serde::{Deserialize, Serialize};
use uuid::Uuid;

use slabkit_core::PieceError;

use super::{AngleCut, CornerRadius, CurvedEdge, Cutout, ShapeKind};

/// Declarative description of one piece.
///
/// Sizes are inches. Modifier lists are applied in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PieceFile")]
pub struct PieceSpec {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
    pub cutouts: Vec<Cutout>,
    pub curved_edges: Vec<CurvedEdge>,
    pub corner_radii: Vec<CornerRadius>,
    pub angle_cuts: Vec<AngleCut>,
}

/// Piece as written in a file, before missing ids are filled in.
#[derive(Deserialize)]
struct PieceFile {
    kind: ShapeKind,
    width: f64,
    height: f64,
    #[serde(default)]
    cutouts: Vec<Cutout>,
    #[serde(default)]
    curved_edges: Vec<CurvedEdge>,
    #[serde(default)]
    corner_radii: Vec<CornerRadius>,
    #[serde(default)]
    angle_cuts: Vec<AngleCut>,
}

impl From<PieceFile> for PieceSpec {
    fn from(file: PieceFile) -> Self {
        let mut piece = PieceSpec {
            kind: file.kind,
            width: file.width,
            height: file.height,
            cutouts: file.cutouts,
            curved_edges: file.curved_edges,
            corner_radii: file.corner_radii,
            angle_cuts: file.angle_cuts,
        };
        piece.assign_missing_ids();
        piece
    }
}

/// Id for the modifier at `index` of `list`, the same on every load.
fn positional_id(list: &str, index: usize) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("slabkit/{}/{}", list, index).as_bytes())
}

impl PieceSpec {
    pub fn new(kind: ShapeKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            width,
            height,
            cutouts: Vec::new(),
            curved_edges: Vec::new(),
            corner_radii: Vec::new(),
            angle_cuts: Vec::new(),
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rectangle, width, height)
    }

    pub fn right_triangle(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::RightTriangle, width, height)
    }

    pub fn with_cutout(mut self, cutout: Cutout) -> Self {
        self.cutouts.push(cutout);
        self
    }

    pub fn with_curved_edge(mut self, edge: CurvedEdge) -> Self {
        self.curved_edges.push(edge);
        self
    }

    pub fn with_corner_radius(mut self, radius: CornerRadius) -> Self {
        self.corner_radii.push(radius);
        self
    }

    pub fn with_angle_cut(mut self, cut: AngleCut) -> Self {
        self.angle_cuts.push(cut);
        self
    }

    /// Gives every cutout and angle cut without an id one derived from its
    /// position in its list.
    pub fn assign_missing_ids(&mut self) {
        for (i, cutout) in self.cutouts.iter_mut().enumerate() {
            if cutout.id.is_nil() {
                cutout.id = positional_id("cutouts", i);
            }
        }
        for (i, cut) in self.angle_cuts.iter_mut().enumerate() {
            if cut.id.is_nil() {
                cut.id = positional_id("angle_cuts", i);
            }
        }
    }

    /// Parses a JSON piece description and validates it.
    pub fn from_json(text: &str) -> slabkit_core::Result<Self> {
        let piece: PieceSpec = serde_json::from_str(text)?;
        piece.validate()?;
        Ok(piece)
    }

    /// Rejects descriptions the engine cannot draw at all.
    ///
    /// Modifiers that merely do nothing (zero radius, bad corner index) are
    /// accepted; only non-finite numbers are errors.
    pub fn validate(&self) -> Result<(), PieceError> {
        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PieceError::InvalidDimension {
                    dimension: dimension.to_string(),
                    value,
                });
            }
        }

        let finite = |field: String, values: &[f64]| {
            if values.iter().all(|v| v.is_finite()) {
                Ok(())
            } else {
                Err(PieceError::NonFinite { field })
            }
        };

        for (i, c) in self.cutouts.iter().enumerate() {
            finite(
                format!("cutouts[{}]", i),
                &[c.width, c.height, c.center_x, c.center_y],
            )?;
            if let Some(anchor) = c.anchor {
                finite(format!("cutouts[{}].anchor", i), &[anchor.x, anchor.y])?;
            }
        }
        for (i, e) in self.curved_edges.iter().enumerate() {
            finite(format!("curved_edges[{}]", i), &[e.radius])?;
        }
        for (i, r) in self.corner_radii.iter().enumerate() {
            finite(format!("corner_radii[{}]", i), &[r.radius])?;
        }
        for (i, a) in self.angle_cuts.iter().enumerate() {
            finite(format!("angle_cuts[{}]", i), &[a.offset_in, a.offset_out])?;
        }
        Ok(())
    }
}
