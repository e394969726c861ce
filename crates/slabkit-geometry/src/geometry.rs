//! Geometry primitives shared by every pipeline stage.
//!
//! Coordinates are screen-like: `+x` right, `+y` down. In this frame a
//! visually clockwise polygon has a positive shoelace sum, which is what
//! [`signed_area`] returns.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Represents a 2D point (or vector) with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, `None` for a zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len < 1e-12 || !len.is_finite() {
            None
        } else {
            Some(Point::new(self.x / len, self.y / len))
        }
    }

    /// Vector rotated a quarter turn so that, for an edge of a clockwise
    /// (screen) polygon, the result points out of the polygon.
    pub fn outward_perp(&self) -> Point {
        Point::new(self.y, -self.x)
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

/// Unit vector pointing from `from` to `to`.
pub fn unit_vector(from: Point, to: Point) -> Option<Point> {
    (to - from).normalized()
}

/// Rotates `p` around `center` by `angle` radians.
pub fn rotate_point(p: Point, center: Point, angle: f64) -> Point {
    if angle.abs() < 1e-12 {
        return p;
    }
    let (sin_a, cos_a) = angle.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * cos_a - dy * sin_a,
        y: center.y + dx * sin_a + dy * cos_a,
    }
}

/// Linear interpolation, `t = 0` gives `a`.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Ray casting point-in-polygon test. Points exactly on the boundary may
/// land on either side.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Parameter of the projection of `p` onto the line `a -> b`
/// (`0` at `a`, `1` at `b`, unclamped).
pub fn segment_parameter(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < 1e-24 {
        return 0.0;
    }
    (p - a).dot(ab) / len_sq
}

/// Distance from `p` to the closed segment `a..b`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let t = segment_parameter(p, a, b).clamp(0.0, 1.0);
    p.distance_to(&lerp(a, b, t))
}

/// Distance from `p` to the infinite line through `a` and `b`.
pub fn point_line_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len = ab.length();
    if len < 1e-12 {
        return p.distance_to(&a);
    }
    (ab.cross(p - a)).abs() / len
}

/// Half the shoelace sum. Positive means clockwise on screen (y down).
pub fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

pub fn is_clockwise(polygon: &[Point]) -> bool {
    signed_area(polygon) > 0.0
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }

    /// Corners in clockwise screen order starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Bounds of a point set, `None` when empty.
pub fn bounds(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut b = Bounds::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        b.min_x = b.min_x.min(p.x);
        b.min_y = b.min_y.min(p.y);
        b.max_x = b.max_x.max(p.x);
        b.max_y = b.max_y.max(p.y);
    }
    Some(b)
}

/// Removes consecutive points closer than `min_distance`, including a
/// closing point that repeats the first one.
pub fn dedupe_points(points: &[Point], min_distance: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        match out.last() {
            Some(last) if last.distance_to(p) < min_distance => {}
            _ => out.push(*p),
        }
    }
    while out.len() > 1 {
        let first = out[0];
        match out.last() {
            Some(last) if last.distance_to(&first) < min_distance => {
                out.pop();
            }
            _ => break,
        }
    }
    out
}

/// Index of the point nearest to `target`; the first one wins ties.
pub fn nearest_point_index(points: &[Point], target: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = p.distance_to(&target);
        match best {
            Some((_, best_d)) if d >= best_d - 1e-12 => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the start vertex: top-most, left-most on ties.
pub fn start_vertex_index(points: &[Point]) -> Option<usize> {
    const TIE: f64 = 1e-9;
    let mut best: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        best = match best {
            None => Some(i),
            Some(b) => {
                let q = points[b];
                if p.y < q.y - TIE || ((p.y - q.y).abs() <= TIE && p.x < q.x - TIE) {
                    Some(i)
                } else {
                    Some(b)
                }
            }
        };
    }
    best
}

/// Dedupes, forces clockwise winding and rotates the list so it starts at
/// the top-most/left-most vertex. Idempotent.
pub fn normalize_outline(points: &[Point], min_distance: f64) -> Vec<Point> {
    let mut out = dedupe_points(points, min_distance);
    if out.len() >= 3 && signed_area(&out) < 0.0 {
        out.reverse();
    }
    if let Some(start) = start_vertex_index(&out) {
        out.rotate_left(start);
    }
    out
}
