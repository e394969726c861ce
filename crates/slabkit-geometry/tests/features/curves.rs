use slabkit_geometry::geometry::point_line_distance;
use slabkit_geometry::outline::PathCommand;
use slabkit_geometry::{compute_outline, CanonicalEdge, CurvedEdge, Cutout, PieceSpec, Point};

fn quad_count(commands: &[PathCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
        .count()
}

#[test]
fn test_whole_edge_apex() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_curved_edge(CurvedEdge::whole(CanonicalEdge::Top, 2.0, false));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.curves.len(), 1);
    let bezier = geometry.curves[0].bezier;
    assert_eq!(bezier.ctrl, Point::new(12.0, -4.0));
    assert!(bezier.sample(0.5).approx_eq(&Point::new(12.0, -2.0), 1e-12));
    assert_eq!(quad_count(&geometry.outline.commands), 1);
    // Bulges outward, so the bounds grow
    let bounds = geometry.bounds().unwrap();
    assert!((bounds.min_y + 2.0).abs() < 1e-3);
}

#[test]
fn test_span_across_notch_keeps_corners() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_cutout(Cutout::rectangle(4.0, 2.0, 12.0, 1.0))
        .with_curved_edge(CurvedEdge::spanning(CanonicalEdge::Top, 1.0, false, 0, 5));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.corners[0].point, Point::new(0.0, 0.0));
    assert_eq!(geometry.corners[5].point, Point::new(24.0, 0.0));
    assert_eq!(geometry.curves.len(), 1);
    assert_eq!(quad_count(&geometry.outline.commands), 2);

    let drawn = geometry.outline.points();
    for corner in [Point::new(0.0, 0.0), Point::new(24.0, 0.0)] {
        assert!(drawn.iter().any(|p| p.approx_eq(&corner, 1e-3)));
    }

    let bezier = geometry.curves[0].bezier;
    let chord = (Point::new(0.0, 0.0), Point::new(24.0, 0.0));
    assert!((point_line_distance(bezier.ctrl, chord.0, chord.1) - 2.0).abs() < 1e-9);
    assert!((point_line_distance(bezier.sample(0.5), chord.0, chord.1) - 1.0).abs() < 1e-9);
}

#[test]
fn test_concave_span_bends_inward() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_curved_edge(CurvedEdge::spanning(CanonicalEdge::Right, 1.5, true, 1, 2));
    let geometry = compute_outline(&piece);
    let bezier = geometry.curves[0].bezier;
    assert_eq!(bezier.ctrl, Point::new(21.0, 9.0));
    assert!(geometry.contains(Point::new(23.0, 1.0)));
    assert!(!geometry.contains(Point::new(23.5, 9.0)));
}

#[test]
fn test_misaligned_span_is_inert() {
    let base = compute_outline(
        &PieceSpec::rectangle(24.0, 18.0).with_cutout(Cutout::rectangle(4.0, 2.0, 12.0, 1.0)),
    );
    // Corner 2 is the notch floor, off the top line
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_cutout(Cutout::rectangle(4.0, 2.0, 12.0, 1.0))
        .with_curved_edge(CurvedEdge::spanning(CanonicalEdge::Top, 1.0, false, 0, 2));
    let geometry = compute_outline(&piece);
    assert!(geometry.curves.is_empty());
    assert_eq!(geometry.outline, base.outline);
}

#[test]
fn test_zero_radius_curve_is_inert() {
    let base = compute_outline(&PieceSpec::rectangle(24.0, 18.0));
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_curved_edge(CurvedEdge::whole(CanonicalEdge::Left, 0.0, false));
    assert_eq!(compute_outline(&piece).outline, base.outline);
}

#[test]
fn test_hypotenuse_curve_uses_diagonal_normal() {
    let piece = PieceSpec::right_triangle(30.0, 40.0)
        .with_curved_edge(CurvedEdge::whole(CanonicalEdge::Hypotenuse, 2.0, false));
    let geometry = compute_outline(&piece);
    let bezier = geometry.curves[0].bezier;
    assert!(bezier.ctrl.approx_eq(&Point::new(18.2, 22.4), 1e-9));
}

#[test]
fn test_curve_on_missing_edge_is_ignored() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_curved_edge(CurvedEdge::whole(CanonicalEdge::Hypotenuse, 2.0, false));
    assert!(compute_outline(&piece).curves.is_empty());
}
