use slabkit_geometry::outline::PathCommand;
use slabkit_geometry::{
    compute_outline, CanonicalEdge, CornerSource, Cutout, OutlineEngine, PieceSpec, Point,
    ShapeKind, Tolerances,
};

const KITCHEN_RUN: &str = r#"{
    "kind": "rectangle",
    "width": 96,
    "height": 25.5,
    "cutouts": [
        {"kind": "rectangle", "width": 30, "height": 16, "center_x": 48, "center_y": 12.75},
        {"kind": "rectangle", "width": 4, "height": 2, "center_x": 10, "center_y": 1}
    ],
    "curved_edges": [{"edge": "bottom", "radius": 0.5}],
    "corner_radii": [{"corner_index": 1, "radius": 1.5}],
    "angle_cuts": [{"anchor_corner_index": 6, "offset_in": 3, "offset_out": 3}]
}"#;

#[test]
fn test_compute_from_json() {
    let piece = PieceSpec::from_json(KITCHEN_RUN).unwrap();
    let geometry = compute_outline(&piece);

    // Top-edge notch adds four vertices, the chamfer one more
    assert_eq!(geometry.vertices.len(), 9);
    assert_eq!(geometry.holes.len(), 1);
    assert_eq!(geometry.curves.len(), 1);
    assert_eq!(geometry.fillets.len(), 1);
    assert_eq!(geometry.angle_segments.len(), 1);
    // Eight carved corners plus four for the sink
    assert_eq!(geometry.corners.len(), 12);
    assert!(matches!(geometry.corners[8].source, CornerSource::Cutout { .. }));
    assert_eq!(geometry.outline.commands.last(), Some(&PathCommand::Close));

    assert!(!geometry.contains(Point::new(48.0, 12.75)));
    assert!(!geometry.contains(Point::new(10.0, 1.0)));
    assert!(geometry.contains(Point::new(80.0, 20.0)));
}

#[test]
fn test_recompute_is_stable() {
    let piece = PieceSpec::from_json(KITCHEN_RUN).unwrap();
    let engine = OutlineEngine::new(Tolerances::default());
    assert_eq!(engine.compute(&piece), engine.compute(&piece));
}

#[test]
fn test_geometry_serializes() {
    let piece = PieceSpec::from_json(KITCHEN_RUN).unwrap();
    let json = serde_json::to_value(compute_outline(&piece)).unwrap();
    assert_eq!(json["kind"], "rectangle");
    assert!(json["outline"].is_array());
    assert_eq!(json["corners"][0]["source"], "boundary");
    assert_eq!(json["corners"][8]["source"], "cutout");
    assert!(json.get("samples").is_none());
}

#[test]
fn test_nearest_segment_on_notched_edge() {
    let piece = PieceSpec::rectangle(24.0, 18.0).with_cutout(Cutout::rectangle(4.0, 2.0, 12.0, 1.0));
    let geometry = compute_outline(&piece);
    let floor = geometry.nearest_segment(Point::new(12.0, 2.2), 0.5).unwrap();
    assert_eq!(floor.edge, CanonicalEdge::Top);
    assert!(!floor.on_edge);
    assert_eq!(floor.index, 2);
    let right = geometry.nearest_segment(Point::new(20.0, 0.1), 0.5).unwrap();
    assert_eq!(right.index, 4);
}

#[test]
fn test_quarter_circle_outline() {
    let geometry = compute_outline(&PieceSpec::new(ShapeKind::QuarterCircle, 20.0, 20.0));
    assert_eq!(geometry.outline.commands.len(), 5);
    assert!(geometry.corners.is_empty());
    assert!(geometry.contains(Point::new(5.0, 5.0)));
    assert!(!geometry.contains(Point::new(19.0, 19.0)));
}

#[test]
fn test_circle_cutouts_are_holes() {
    let piece = PieceSpec::new(ShapeKind::Circle, 30.0, 30.0).with_cutout(Cutout::circle(4.0, 15.0, 15.0));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.holes.len(), 1);
    assert!(!geometry.contains(Point::new(15.0, 15.0)));
    assert!(geometry.contains(Point::new(15.0, 5.0)));
    // No corners on a circle, not even virtual ones
    assert!(geometry.corners.is_empty());
}
