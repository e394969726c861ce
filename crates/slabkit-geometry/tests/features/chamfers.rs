use slabkit_geometry::outline::PathCommand;
use slabkit_geometry::{compute_outline, AngleCut, CanonicalEdge, PieceSpec, Point};

#[test]
fn test_chamfer_on_top_left_corner() {
    let piece = PieceSpec::rectangle(24.0, 18.0).with_angle_cut(AngleCut::new(0, 2.0, 2.0));
    let geometry = compute_outline(&piece);
    assert_eq!(
        geometry.vertices,
        vec![
            Point::new(2.0, 0.0),
            Point::new(24.0, 0.0),
            Point::new(24.0, 18.0),
            Point::new(0.0, 18.0),
            Point::new(0.0, 2.0),
        ]
    );
    assert_eq!(geometry.angle_segments.len(), 1);
    let seg = geometry.angle_segments[0];
    assert_eq!(seg.anchor_corner_index, 0);
    assert!((seg.length() - 8f64.sqrt()).abs() < 1e-12);

    // The chamfer is not part of any canonical edge
    assert_eq!(geometry.segments.len(), 4);
    let top = geometry.segments.iter().find(|s| s.edge == CanonicalEdge::Top).unwrap();
    assert_eq!(top.start, Point::new(2.0, 0.0));
    let left = geometry.segments.iter().find(|s| s.edge == CanonicalEdge::Left).unwrap();
    assert_eq!(left.start, Point::new(0.0, 2.0));

    assert_eq!(geometry.outline.commands.len(), 6);
    assert!(matches!(geometry.outline.commands[0], PathCommand::MoveTo(p) if p == Point::new(2.0, 0.0)));
}

#[test]
fn test_chamfer_from_angle() {
    let piece = PieceSpec::rectangle(24.0, 18.0).with_angle_cut(AngleCut::from_angle(1, 3.0, 45.0));
    let geometry = compute_outline(&piece);
    let seg = geometry.angle_segments[0];
    assert!(seg.start.approx_eq(&Point::new(21.0, 0.0), 1e-9));
    assert!(seg.end.approx_eq(&Point::new(24.0, 3.0), 1e-9));
}

#[test]
fn test_corner_indices_survive_chamfer() {
    // Corner 2 still addresses (24, 18) after corner 0 is cut
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_angle_cut(AngleCut::new(0, 2.0, 2.0))
        .with_angle_cut(AngleCut::new(2, 1.0, 1.0));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.angle_segments.len(), 2);
    let second = geometry.angle_segments[1];
    assert_eq!(second.start, Point::new(24.0, 17.0));
    assert_eq!(second.end, Point::new(23.0, 18.0));
    assert_eq!(geometry.corners[2].point, Point::new(24.0, 18.0));
}

#[test]
fn test_inert_angle_cuts() {
    let base = compute_outline(&PieceSpec::rectangle(24.0, 18.0));
    for cut in [
        AngleCut::new(-1, 2.0, 2.0),
        AngleCut::new(7, 2.0, 2.0),
        AngleCut::new(0, 0.0, 2.0),
        AngleCut::new(0, 30.0, 2.0),
    ] {
        let geometry = compute_outline(&PieceSpec::rectangle(24.0, 18.0).with_angle_cut(cut));
        assert_eq!(geometry.outline, base.outline);
        assert!(geometry.angle_segments.is_empty());
    }
}
