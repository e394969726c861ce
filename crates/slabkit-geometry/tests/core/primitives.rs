use slabkit_geometry::geometry::{
    bounds, is_clockwise, point_in_polygon, point_line_distance, point_segment_distance,
    rotate_point, segment_parameter, signed_area,
};
use slabkit_geometry::{normalize_outline, Bounds, Point};

fn rect() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(24.0, 0.0),
        Point::new(24.0, 18.0),
        Point::new(0.0, 18.0),
    ]
}

#[test]
fn test_point_distance() {
    let p1 = Point::new(0.0, 0.0);
    let p2 = Point::new(3.0, 4.0);
    assert_eq!(p1.distance_to(&p2), 5.0);
}

#[test]
fn test_point_in_polygon_edges_of_l_shape() {
    let l_shape = vec![
        Point::new(4.0, 0.0),
        Point::new(24.0, 0.0),
        Point::new(24.0, 18.0),
        Point::new(0.0, 18.0),
        Point::new(0.0, 4.0),
        Point::new(4.0, 4.0),
    ];
    assert!(!point_in_polygon(Point::new(2.0, 2.0), &l_shape));
    assert!(point_in_polygon(Point::new(2.0, 10.0), &l_shape));
    assert!(point_in_polygon(Point::new(10.0, 2.0), &l_shape));
}

#[test]
fn test_segment_distances() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(point_segment_distance(Point::new(5.0, 3.0), a, b), 3.0);
    assert_eq!(point_segment_distance(Point::new(13.0, 4.0), a, b), 5.0);
    assert_eq!(point_line_distance(Point::new(13.0, 4.0), a, b), 4.0);
    assert_eq!(segment_parameter(Point::new(2.5, 7.0), a, b), 0.25);
}

#[test]
fn test_winding_is_screen_clockwise() {
    assert!(is_clockwise(&rect()));
    assert_eq!(signed_area(&rect()), 432.0);
    let mut reversed = rect();
    reversed.reverse();
    assert!(!is_clockwise(&reversed));
}

#[test]
fn test_normalize_outline() {
    let messy = vec![
        Point::new(0.0, 18.0),
        Point::new(24.0, 18.0),
        Point::new(24.0, 18.00001),
        Point::new(24.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 18.0),
    ];
    let normalized = normalize_outline(&messy, 1e-4);
    assert_eq!(normalized, rect());
    assert_eq!(normalize_outline(&normalized, 1e-4), normalized);
}

#[test]
fn test_rotate_quarter_turn() {
    let p = rotate_point(Point::new(1.0, 0.0), Point::new(0.0, 0.0), std::f64::consts::FRAC_PI_2);
    assert!(p.approx_eq(&Point::new(0.0, 1.0), 1e-12));
}

#[test]
fn test_bounds() {
    let b = bounds(&rect()).unwrap();
    assert_eq!(b, Bounds::new(0.0, 0.0, 24.0, 18.0));
    assert_eq!(b.center(), Point::new(12.0, 9.0));
    assert!(bounds(&[]).is_none());
}
