use slabkit_geometry::bezier::arc_quads_n;
use slabkit_geometry::{arc_quads, Point, QuadBezier};
use std::f64::consts::{FRAC_PI_2, TAU};

#[test]
fn test_subsegments_join_up() {
    let curve = QuadBezier::new(Point::new(0.0, 0.0), Point::new(12.0, -4.0), Point::new(24.0, 0.0));
    let left = curve.subsegment(0.0, 0.25);
    let middle = curve.subsegment(0.25, 0.75);
    let right = curve.subsegment(0.75, 1.0);
    assert!(left.to.approx_eq(&middle.from, 1e-12));
    assert!(middle.to.approx_eq(&right.from, 1e-12));
    // Sub-curves trace the same path
    assert!(middle.sample(0.5).approx_eq(&curve.sample(0.5), 1e-12));
}

#[test]
fn test_reversed_subsegment() {
    let curve = QuadBezier::new(Point::new(0.0, 0.0), Point::new(12.0, -4.0), Point::new(24.0, 0.0));
    let back = curve.subsegment(0.75, 0.25);
    assert!(back.from.approx_eq(&curve.sample(0.75), 1e-12));
    assert!(back.to.approx_eq(&curve.sample(0.25), 1e-12));
}

#[test]
fn test_quarter_arc_stays_near_circle() {
    let quads = arc_quads(Point::new(0.0, 0.0), 10.0, 10.0, 0.0, FRAC_PI_2);
    assert_eq!(quads.len(), 1);
    let mid = quads[0].sample(0.5);
    // Quadratic quarter arcs overshoot the circle by about 6%
    assert!((mid.length() - 10.0).abs() < 0.7);
}

#[test]
fn test_arc_segment_count() {
    let c = Point::new(0.0, 0.0);
    assert_eq!(arc_quads(c, 1.0, 1.0, 0.0, 0.3).len(), 1);
    assert_eq!(arc_quads(c, 1.0, 1.0, 0.0, -2.0).len(), 2);
    assert_eq!(arc_quads(c, 1.0, 1.0, 0.0, TAU).len(), 4);
    assert_eq!(arc_quads_n(c, 1.0, 1.0, 0.0, TAU, 8).len(), 8);
}

#[test]
fn test_distance_to_curve() {
    let curve = QuadBezier::new(Point::new(0.0, 0.0), Point::new(12.0, -4.0), Point::new(24.0, 0.0));
    // Apex is at (12, -2)
    let d = curve.distance_to_point(Point::new(12.0, -5.0), 40);
    assert!((d - 3.0).abs() < 1e-3);
}
