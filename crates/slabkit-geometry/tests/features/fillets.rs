use slabkit_geometry::geometry::{point_line_distance, point_segment_distance};
use slabkit_geometry::{
    compute_outline, CanonicalEdge, CornerRadius, CurvedEdge, Cutout, PieceSpec, Point,
};

#[test]
fn test_fillet_radius_is_clamped() {
    let piece = PieceSpec::rectangle(24.0, 18.0).with_corner_radius(CornerRadius::new(0, 100.0));
    let geometry = compute_outline(&piece);
    let arc = &geometry.fillets[0];
    assert!((arc.radius - 18.0).abs() < 1e-9);
    assert!(arc.start.approx_eq(&Point::new(0.0, 18.0), 1e-9));
}

#[test]
fn test_neighbouring_fillets_share_the_edge() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_corner_radius(CornerRadius::new(0, 100.0))
        .with_corner_radius(CornerRadius::new(1, 100.0));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.fillets.len(), 2);
    for arc in &geometry.fillets {
        assert!((arc.radius - 12.0).abs() < 1e-9);
    }
    assert!(geometry.fillets[0].end.approx_eq(&geometry.fillets[1].start, 1e-9));
}

#[test]
fn test_curve_takes_priority_over_fillet() {
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_curved_edge(CurvedEdge::whole(CanonicalEdge::Top, 1.0, false))
        .with_corner_radius(CornerRadius::new(0, 2.0))
        .with_corner_radius(CornerRadius::new(1, 2.0))
        .with_corner_radius(CornerRadius::new(2, 2.0));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.curves.len(), 1);
    assert_eq!(geometry.fillets.len(), 1);
    assert_eq!(geometry.fillets[0].corner_index, 2);
}

#[test]
fn test_fillet_on_notch_inner_corner() {
    // Corner 5 is the inside corner of the L cut at (4, 4)
    let piece = PieceSpec::rectangle(24.0, 18.0)
        .with_cutout(Cutout::rectangle(4.0, 4.0, 2.0, 2.0))
        .with_corner_radius(CornerRadius::new(5, 1.0));
    let geometry = compute_outline(&piece);
    assert_eq!(geometry.corners[5].point, Point::new(4.0, 4.0));
    let arc = &geometry.fillets[0];
    assert!((arc.radius - 1.0).abs() < 1e-9);
    assert!(arc.start.approx_eq(&Point::new(3.0, 4.0), 1e-9));
    assert!(arc.end.approx_eq(&Point::new(4.0, 3.0), 1e-9));
    // Rounding the inside corner fills the tip of the notch
    assert!(geometry.contains(Point::new(3.85, 3.85)));
    assert!(!geometry.contains(Point::new(3.0, 3.0)));
}

#[test]
fn test_cove_cuts_into_the_corner() {
    let mut radius = CornerRadius::new(3, 2.0);
    radius.inside = true;
    let geometry = compute_outline(&PieceSpec::rectangle(24.0, 18.0).with_corner_radius(radius));
    let arc = &geometry.fillets[0];
    assert!(arc.inside);
    assert_eq!(arc.center, Point::new(0.0, 18.0));
    assert!(!geometry.contains(Point::new(0.5, 17.5)));
    assert!(geometry.contains(Point::new(2.5, 15.0)));
}

#[test]
fn test_inert_corner_radii() {
    let base = compute_outline(&PieceSpec::rectangle(24.0, 18.0));
    for radius in [
        CornerRadius::new(0, 0.0),
        CornerRadius::new(0, -3.0),
        CornerRadius::new(-1, 2.0),
        CornerRadius::new(4, 2.0),
    ] {
        let geometry = compute_outline(&PieceSpec::rectangle(24.0, 18.0).with_corner_radius(radius));
        assert_eq!(geometry.outline, base.outline);
        assert!(geometry.fillets.is_empty());
    }
}

#[test]
fn test_fillet_at_acute_triangle_corner() {
    // Corner 1 at (30, 0): cos = 0.6, so tan(half angle) = 0.5
    let piece = PieceSpec::right_triangle(30.0, 40.0).with_corner_radius(CornerRadius::new(1, 4.0));
    let geometry = compute_outline(&piece);
    let arc = &geometry.fillets[0];
    let (prev, vertex, next) = (
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(0.0, 40.0),
    );
    assert_eq!(arc.vertex, vertex);
    assert!((arc.radius - 4.0).abs() < 1e-9);
    assert!(arc.start.approx_eq(&Point::new(22.0, 0.0), 1e-9));
    assert!(arc.end.approx_eq(&Point::new(25.2, 6.4), 1e-9));
    assert!(point_segment_distance(arc.start, prev, vertex) < 1e-9);
    assert!(point_segment_distance(arc.end, vertex, next) < 1e-9);
    // Centre is one radius from both edges
    assert!((point_line_distance(arc.center, prev, vertex) - 4.0).abs() < 1e-9);
    assert!((point_line_distance(arc.center, vertex, next) - 4.0).abs() < 1e-9);
}

#[test]
fn test_acute_fillet_clamped_by_half_angle() {
    // min(30, 50) * tan(half angle) = 30 * 0.5
    let piece =
        PieceSpec::right_triangle(30.0, 40.0).with_corner_radius(CornerRadius::new(1, 100.0));
    let geometry = compute_outline(&piece);
    let arc = &geometry.fillets[0];
    assert!((arc.radius - 15.0).abs() < 1e-9);
    assert!(arc.start.approx_eq(&Point::new(0.0, 0.0), 1e-9));
    assert!(arc.end.approx_eq(&Point::new(12.0, 24.0), 1e-9));
    assert!(point_segment_distance(arc.end, Point::new(30.0, 0.0), Point::new(0.0, 40.0)) < 1e-9);
}
