//! Quadratic bezier evaluation, subdivision and arc approximation.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::geometry::{lerp, point_segment_distance, Point};

/// A quadratic bezier curve with one control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadBezier {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadBezier {
    pub fn new(from: Point, ctrl: Point, to: Point) -> Self {
        Self { from, ctrl, to }
    }

    /// Evaluates the curve at `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        Point::new(
            mt * mt * self.from.x + 2.0 * mt * t * self.ctrl.x + t * t * self.to.x,
            mt * mt * self.from.y + 2.0 * mt * t * self.ctrl.y + t * t * self.to.y,
        )
    }

    /// De Casteljau subdivision at `t`.
    pub fn split(&self, t: f64) -> (QuadBezier, QuadBezier) {
        let a = lerp(self.from, self.ctrl, t);
        let b = lerp(self.ctrl, self.to, t);
        let mid = lerp(a, b, t);
        (
            QuadBezier::new(self.from, a, mid),
            QuadBezier::new(mid, b, self.to),
        )
    }

    /// The part of the curve between `t0` and `t1`. Reversed when `t0 > t1`.
    pub fn subsegment(&self, t0: f64, t1: f64) -> QuadBezier {
        if t0 > t1 {
            return self.subsegment(t1, t0).reversed();
        }
        let t0 = t0.clamp(0.0, 1.0);
        let t1 = t1.clamp(0.0, 1.0);
        let tail = if t0 <= 0.0 { *self } else { self.split(t0).1 };
        if t1 >= 1.0 {
            return tail;
        }
        let span = 1.0 - t0;
        if span <= 1e-12 {
            let p = self.sample(t0);
            return QuadBezier::new(p, p, p);
        }
        tail.split((t1 - t0) / span).0
    }

    pub fn reversed(&self) -> QuadBezier {
        QuadBezier::new(self.to, self.ctrl, self.from)
    }

    /// Points at `samples + 1` evenly spaced parameters, both ends included.
    pub fn flatten(&self, samples: usize) -> Vec<Point> {
        let n = samples.max(1);
        (0..=n).map(|i| self.sample(i as f64 / n as f64)).collect()
    }

    /// Approximate distance from `p` to the curve using a fixed number of
    /// chords.
    pub fn distance_to_point(&self, p: Point, samples: usize) -> f64 {
        let pts = self.flatten(samples);
        pts.windows(2)
            .map(|w| point_segment_distance(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Approximates an elliptical arc with quadratic beziers, one per quarter
/// turn or less.
///
/// Angles are in radians in screen coordinates, so a positive `sweep` turns
/// visually clockwise.
pub fn arc_quads(center: Point, rx: f64, ry: f64, start_angle: f64, sweep: f64) -> Vec<QuadBezier> {
    let segments = (sweep.abs() / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
    arc_quads_n(center, rx, ry, start_angle, sweep, segments)
}

/// Same as [`arc_quads`] with an explicit segment count.
pub fn arc_quads_n(
    center: Point,
    rx: f64,
    ry: f64,
    start_angle: f64,
    sweep: f64,
    segments: usize,
) -> Vec<QuadBezier> {
    let segments = segments.max(1);
    let step = sweep / segments as f64;
    // Control point sits where the end tangents cross.
    let ctrl_scale = 1.0 / (step / 2.0).cos();
    let on_ellipse = |angle: f64, scale: f64| {
        Point::new(
            center.x + rx * scale * angle.cos(),
            center.y + ry * scale * angle.sin(),
        )
    };

    (0..segments)
        .map(|i| {
            let a0 = start_angle + step * i as f64;
            let a1 = a0 + step;
            QuadBezier::new(
                on_ellipse(a0, 1.0),
                on_ellipse(a0 + step / 2.0, ctrl_scale),
                on_ellipse(a1, 1.0),
            )
        })
        .collect()
}
