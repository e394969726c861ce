//! Corner addressing.
//!
//! Corner indices refer to the carved outline. Later stages rewrite the
//! vertex list, so each stage maps the carved corners onto its current
//! vertices by nearest position instead of trusting raw indices.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{nearest_point_index, Bounds, Point};

/// Where a corner point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CornerSource {
    /// A vertex of the piece outline.
    Boundary,
    /// One of the four corners of an interior cutout.
    Cutout { cutout_id: Uuid },
}

/// An addressable corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerPoint {
    pub index: usize,
    pub point: Point,
    #[serde(flatten)]
    pub source: CornerSource,
}

/// Corner points for a carved outline followed by the virtual corners of
/// each interior cutout (top-left, top-right, bottom-right, bottom-left).
pub fn corner_points(carved: &[Point], holes: &[(Uuid, Bounds)]) -> Vec<CornerPoint> {
    let boundary = carved.iter().map(|p| (*p, CornerSource::Boundary));
    let virtual_corners = holes.iter().flat_map(|(id, bounds)| {
        bounds
            .corners()
            .into_iter()
            .map(move |p| (p, CornerSource::Cutout { cutout_id: *id }))
    });
    boundary
        .chain(virtual_corners)
        .enumerate()
        .map(|(index, (point, source))| CornerPoint {
            index,
            point,
            source,
        })
        .collect()
}

/// Parallel mapping from reference corner index to current vertex index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CornerMap {
    slots: Vec<Option<usize>>,
}

impl CornerMap {
    /// Matches every reference corner to its nearest current vertex. Matches
    /// farther than `max_distance` are dropped.
    pub fn resolve(reference: &[Point], current: &[Point], max_distance: f64) -> Self {
        let slots = reference
            .iter()
            .map(|r| {
                nearest_point_index(current, *r).filter(|i| current[*i].distance_to(r) <= max_distance)
            })
            .collect();
        Self { slots }
    }

    /// Current vertex for a reference corner.
    pub fn vertex(&self, corner: usize) -> Option<usize> {
        self.slots.get(corner).copied().flatten()
    }
}
