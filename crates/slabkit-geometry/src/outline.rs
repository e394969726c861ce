//! Drawn outline: a closed sequence of line and quadratic draw commands.

use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::bezier::QuadBezier;
use crate::geometry::{point_in_polygon, point_segment_distance, Bounds, Point};

/// One draw command of an outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    Close,
}

/// A drawable segment of an outline with its start point resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawnSegment {
    Line(Point, Point),
    Quad(QuadBezier),
}

impl DrawnSegment {
    pub fn start(&self) -> Point {
        match self {
            DrawnSegment::Line(a, _) => *a,
            DrawnSegment::Quad(q) => q.from,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            DrawnSegment::Line(_, b) => *b,
            DrawnSegment::Quad(q) => q.to,
        }
    }

    pub fn distance_to(&self, p: Point, samples: usize) -> f64 {
        match self {
            DrawnSegment::Line(a, b) => point_segment_distance(p, *a, *b),
            DrawnSegment::Quad(q) => q.distance_to_point(p, samples),
        }
    }
}

/// Closed outline as draw commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    pub commands: Vec<PathCommand>,
}

/// Incremental outline writer that drops zero-length moves.
#[derive(Debug)]
pub struct OutlineBuilder {
    commands: Vec<PathCommand>,
    start: Point,
    current: Point,
    min_distance: f64,
}

impl OutlineBuilder {
    pub fn new(start: Point, min_distance: f64) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(start)],
            start,
            current: start,
            min_distance,
        }
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn line_to(&mut self, to: Point) {
        if self.current.distance_to(&to) < self.min_distance {
            return;
        }
        self.commands.push(PathCommand::LineTo(to));
        self.current = to;
    }

    /// Appends a curve, bridging with a line if it does not start at the
    /// current point.
    pub fn quad(&mut self, curve: &QuadBezier) {
        self.line_to(curve.from);
        if self.current.distance_to(&curve.to) < self.min_distance {
            return;
        }
        self.commands.push(PathCommand::QuadTo {
            ctrl: curve.ctrl,
            to: curve.to,
        });
        self.current = curve.to;
    }

    pub fn close(mut self) -> Outline {
        // The closing line is implied by Close.
        match self.commands.last_mut() {
            Some(PathCommand::LineTo(p)) if p.distance_to(&self.start) < self.min_distance => {
                self.commands.pop();
            }
            Some(PathCommand::QuadTo { to, .. }) if to.distance_to(&self.start) < self.min_distance => {
                *to = self.start;
            }
            _ => {}
        }
        self.commands.push(PathCommand::Close);
        Outline {
            commands: self.commands,
        }
    }
}

impl Outline {
    /// Straight closed outline through `points`.
    pub fn from_polygon(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let mut commands = Vec::with_capacity(points.len() + 1);
        commands.push(PathCommand::MoveTo(*first));
        commands.extend(points[1..].iter().map(|p| PathCommand::LineTo(*p)));
        commands.push(PathCommand::Close);
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves commands into segments, including the implicit closing line.
    pub fn segments(&self) -> Vec<DrawnSegment> {
        let mut out = Vec::new();
        let mut start = Point::default();
        let mut current = Point::default();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    start = p;
                    current = p;
                }
                PathCommand::LineTo(p) => {
                    out.push(DrawnSegment::Line(current, p));
                    current = p;
                }
                PathCommand::QuadTo { ctrl, to } => {
                    out.push(DrawnSegment::Quad(QuadBezier::new(current, ctrl, to)));
                    current = to;
                }
                PathCommand::Close => {
                    if current != start {
                        out.push(DrawnSegment::Line(current, start));
                    }
                    current = start;
                }
            }
        }
        out
    }

    /// End points of every command in drawing order. Curves contribute only
    /// their end point.
    pub fn points(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|cmd| match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
                PathCommand::QuadTo { to, .. } => Some(to),
                PathCommand::Close => None,
            })
            .collect()
    }

    /// Polygon approximation with `samples` chords per curve.
    pub fn flatten(&self, samples: usize) -> Vec<Point> {
        let mut out: Vec<Point> = Vec::new();
        for segment in self.segments() {
            if out.is_empty() {
                out.push(segment.start());
            }
            match segment {
                DrawnSegment::Line(_, b) => out.push(b),
                DrawnSegment::Quad(q) => out.extend(q.flatten(samples).into_iter().skip(1)),
            }
        }
        // Drop the closing repeat of the first point
        if out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }

    pub fn contains(&self, p: Point, samples: usize) -> bool {
        point_in_polygon(p, &self.flatten(samples))
    }

    /// Minimum distance from `p` to the drawn outline.
    pub fn distance_to(&self, p: Point, samples: usize) -> f64 {
        self.segments()
            .iter()
            .map(|s| s.distance_to(p, samples))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder();
        let mut open = false;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(point(p.x as f32, p.y as f32));
                    open = true;
                }
                PathCommand::LineTo(p) => {
                    builder.line_to(point(p.x as f32, p.y as f32));
                }
                PathCommand::QuadTo { ctrl, to } => {
                    builder.quadratic_bezier_to(
                        point(ctrl.x as f32, ctrl.y as f32),
                        point(to.x as f32, to.y as f32),
                    );
                }
                PathCommand::Close => {
                    if open {
                        builder.close();
                        open = false;
                    }
                }
            }
        }
        if open {
            builder.end(false);
        }
        builder.build()
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg_path(&self) -> String {
        let path = self.to_lyon_path();
        let mut svg = String::new();
        for event in path.iter() {
            match event {
                lyon::path::Event::Begin { at } => svg.push_str(&format!("M {} {} ", at.x, at.y)),
                lyon::path::Event::Line { to, .. } => {
                    svg.push_str(&format!("L {} {} ", to.x, to.y))
                }
                lyon::path::Event::Quadratic { ctrl, to, .. } => {
                    svg.push_str(&format!("Q {} {} {} {} ", ctrl.x, ctrl.y, to.x, to.y))
                }
                lyon::path::Event::Cubic {
                    ctrl1, ctrl2, to, ..
                } => svg.push_str(&format!(
                    "C {} {} {} {} {} {} ",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                )),
                lyon::path::Event::End { close, .. } => {
                    if close {
                        svg.push_str("Z ");
                    }
                }
            }
        }
        svg.trim_end().to_string()
    }

    /// Tight axis aligned bounds of the drawn outline.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.commands.is_empty() {
            return None;
        }
        let bb = lyon::algorithms::aabb::bounding_box(self.to_lyon_path().iter());
        Some(Bounds::new(
            bb.min.x as f64,
            bb.min.y as f64,
            bb.max.x as f64,
            bb.max.y as f64,
        ))
    }
}
