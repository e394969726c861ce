use slabkit_geometry::{Outline, OutlineBuilder, PathCommand, Point, QuadBezier};

#[test]
fn test_builder_bridges_curves_with_lines() {
    let mut b = OutlineBuilder::new(Point::new(0.0, 0.0), 1e-4);
    b.quad(&QuadBezier::new(Point::new(2.0, 0.0), Point::new(5.0, -2.0), Point::new(8.0, 0.0)));
    b.line_to(Point::new(8.0, 6.0));
    let outline = b.close();
    assert_eq!(
        outline.commands,
        vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(2.0, 0.0)),
            PathCommand::QuadTo {
                ctrl: Point::new(5.0, -2.0),
                to: Point::new(8.0, 0.0)
            },
            PathCommand::LineTo(Point::new(8.0, 6.0)),
            PathCommand::Close,
        ]
    );
}

#[test]
fn test_builder_snaps_closing_curve() {
    let mut b = OutlineBuilder::new(Point::new(0.0, 0.0), 1e-4);
    b.line_to(Point::new(10.0, 0.0));
    b.quad(&QuadBezier::new(
        Point::new(10.0, 0.0),
        Point::new(5.0, 8.0),
        Point::new(0.00001, 0.0),
    ));
    let outline = b.close();
    assert_eq!(
        outline.commands[2],
        PathCommand::QuadTo {
            ctrl: Point::new(5.0, 8.0),
            to: Point::new(0.0, 0.0)
        }
    );
    assert_eq!(outline.segments().len(), 2);
}

#[test]
fn test_outline_serializes_as_command_list() {
    let outline = Outline::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 3.0),
    ]);
    let json = serde_json::to_value(&outline).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["cmd"], "move_to");
    assert_eq!(json[3]["cmd"], "close");
}

#[test]
fn test_lyon_path_round_trip_to_svg() {
    let mut b = OutlineBuilder::new(Point::new(0.0, 0.0), 1e-4);
    b.quad(&QuadBezier::new(Point::new(0.0, 0.0), Point::new(5.0, -4.0), Point::new(10.0, 0.0)));
    b.line_to(Point::new(10.0, 10.0));
    let svg = b.close().to_svg_path();
    assert_eq!(svg, "M 0 0 Q 5 -4 10 0 L 10 10 Z");
}
