use slabkit_geometry::{
    carve_notches, classify_cutout, compute_outline, merge_spans, BaseShape, CanonicalEdge,
    CutoutPlacement, Cutout, EdgeSpan, PieceSpec, Point, ShapeKind, Tolerances,
};

fn shape() -> BaseShape {
    BaseShape::new(ShapeKind::Rectangle, 24.0, 18.0)
}

#[test]
fn test_spans_merge_into_union() {
    let merged = merge_spans(&[
        EdgeSpan::new(12.0, 16.0, 1.0),
        EdgeSpan::new(2.0, 6.0, 2.0),
        EdgeSpan::new(5.0, 8.0, 3.0),
    ]);
    assert_eq!(
        merged,
        vec![EdgeSpan::new(2.0, 8.0, 3.0), EdgeSpan::new(12.0, 16.0, 1.0)]
    );
}

#[test]
fn test_corner_notch_is_never_interior() {
    let tol = Tolerances::default();
    let notch = Cutout::rectangle(4.0, 4.0, 2.0, 2.0);
    let placement = classify_cutout(&shape(), &notch, &tol);
    assert!(placement.is_notch());

    let geometry = compute_outline(&PieceSpec::rectangle(24.0, 18.0).with_cutout(notch));
    assert!(geometry.holes.is_empty());
    assert_eq!(
        geometry.vertices,
        vec![
            Point::new(4.0, 0.0),
            Point::new(24.0, 0.0),
            Point::new(24.0, 18.0),
            Point::new(0.0, 18.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
        ]
    );
    assert!(!geometry.contains(Point::new(2.0, 2.0)));
    assert!(geometry.contains(Point::new(5.0, 5.0)));
}

#[test]
fn test_edge_notch_steps_in() {
    let tol = Tolerances::default();
    let carved = carve_notches(&shape(), &[Cutout::rectangle(4.0, 2.0, 12.0, 1.0)], &tol);
    assert_eq!(
        carved,
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 2.0),
            Point::new(14.0, 2.0),
            Point::new(14.0, 0.0),
            Point::new(24.0, 0.0),
            Point::new(24.0, 18.0),
            Point::new(0.0, 18.0),
        ]
    );
}

#[test]
fn test_overlapping_notches_merge() {
    let tol = Tolerances::default();
    let cutouts = [
        Cutout::rectangle(4.0, 2.0, 6.0, 1.0),
        Cutout::rectangle(4.0, 3.0, 9.0, 1.5),
    ];
    let carved = carve_notches(&shape(), &cutouts, &tol);
    // One merged step from x = 4 to x = 11 at the deeper depth
    assert_eq!(carved.len(), 8);
    assert!(carved.contains(&Point::new(4.0, 3.0)));
    assert!(carved.contains(&Point::new(11.0, 3.0)));
}

#[test]
fn test_flagged_notch_snaps_to_nearest_edge() {
    let tol = Tolerances::default();
    let notch = Cutout::rectangle(2.0, 2.0, 12.0, 16.0).with_notch(true);
    match classify_cutout(&shape(), &notch, &tol) {
        CutoutPlacement::EdgeNotch { edge, span } => {
            assert_eq!(edge, CanonicalEdge::Bottom);
            assert!((span.depth - 2.0).abs() < 1e-9);
        }
        other => panic!("unexpected placement {:?}", other),
    }
}

#[test]
fn test_notch_across_piece_is_inert() {
    let tol = Tolerances::default();
    // Touches top and bottom at once
    let notch = Cutout::rectangle(2.0, 18.0, 12.0, 9.0);
    assert_eq!(classify_cutout(&shape(), &notch, &tol), CutoutPlacement::Inert);
    let carved = carve_notches(&shape(), &[notch], &tol);
    assert_eq!(carved, shape().corners());
}

#[test]
fn test_triangle_notch_on_hypotenuse() {
    let tol = Tolerances::default();
    let triangle = BaseShape::new(ShapeKind::RightTriangle, 30.0, 40.0);
    // Centre sits on the diagonal, well away from both legs
    let notch = Cutout::rectangle(2.0, 2.0, 15.0, 20.0);
    match classify_cutout(&triangle, &notch, &tol) {
        CutoutPlacement::EdgeNotch { edge, .. } => assert_eq!(edge, CanonicalEdge::Hypotenuse),
        other => panic!("unexpected placement {:?}", other),
    }
    let carved = carve_notches(&triangle, &[notch], &tol);
    assert_eq!(carved.len(), 7);
}

const TWO_CORNER_NOTCHES: &str = r#"{
    "kind": "rectangle",
    "width": 24,
    "height": 18,
    "cutouts": [
        {"kind": "rectangle", "width": 6, "height": 2, "center_x": 3, "center_y": 1},
        {"kind": "rectangle", "width": 2, "height": 6, "center_x": 1, "center_y": 3}
    ],
    "angle_cuts": [{"anchor_corner_index": 2, "offset_in": 1, "offset_out": 1}]
}"#;

#[test]
fn test_same_file_gives_same_geometry() {
    let first = compute_outline(&PieceSpec::from_json(TWO_CORNER_NOTCHES).unwrap());
    for _ in 0..10 {
        let again = compute_outline(&PieceSpec::from_json(TWO_CORNER_NOTCHES).unwrap());
        assert_eq!(again, first);
    }
    assert_eq!(first.angle_segments.len(), 1);
    // Both notches come out of the corner
    assert!(!first.contains(Point::new(5.0, 1.0)));
    assert!(!first.contains(Point::new(1.0, 5.0)));
    assert!(first.contains(Point::new(3.0, 3.0)));
}

#[test]
fn test_stacked_corner_notches_remove_both_cutouts() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_cutout(Cutout::rectangle(8.0, 2.0, 4.0, 1.0))
        .with_cutout(Cutout::rectangle(2.0, 6.0, 1.0, 3.0));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.vertices.len(), 8);
    assert!(geometry.holes.is_empty());
    assert!(!geometry.contains(Point::new(1.0, 5.0)));
    assert!(!geometry.contains(Point::new(7.0, 1.0)));
    assert!(geometry.contains(Point::new(5.0, 5.0)));
}
