//! Circular arc fitting and sampling.
//!
//! All arcs sweep the minor angle between their end points. The side of the
//! chord the pivot lies on therefore decides the turn direction; a pivot on
//! the chord midpoint (a half circle) sweeps clockwise.

use std::f64::consts::PI;

use super::{distance, normalize_angle, Point};

/// Arc fitted between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFit {
    pub start: Point,
    pub end: Point,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    /// Signed sweep in radians, negative when clockwise.
    pub sweep: f64,
}

impl ArcFit {
    /// Length of the arc.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// Samples `samples` points from start to end.
    pub fn points(&self, samples: usize) -> Vec<Point> {
        sample_sweep(self.start, self.end, self.center, self.radius, self.start_angle, self.sweep, samples)
    }
}

/// Signed minor sweep from `start_angle` to `end_angle`.
fn minor_sweep(start_angle: f64, end_angle: f64) -> f64 {
    let sweep = normalize_angle(end_angle - start_angle);
    if sweep >= PI - 1e-12 {
        -PI
    } else {
        sweep
    }
}

/// Fits an arc from `p1` to `p2` whose center is offset from the chord
/// midpoint by `|p1 p2| * curvature` along the chord normal.
///
/// Positive curvature places the center right of the chord (a clockwise
/// turn), negative curvature places it on the left. Returns `None` for a
/// zero-length chord or a non-finite curvature.
pub fn arc_through(p1: Point, p2: Point, curvature: f64) -> Option<ArcFit> {
    let chord = distance(p1, p2);
    if chord <= f64::EPSILON || !curvature.is_finite() {
        return None;
    }
    let mid = Point::new(0.5 * (p1.x + p2.x), 0.5 * (p1.y + p2.y));
    let normal = Point::new((p2.y - p1.y) / chord, -(p2.x - p1.x) / chord);
    let center = Point::new(
        mid.x + normal.x * chord * curvature,
        mid.y + normal.y * chord * curvature,
    );
    let radius = distance(p1, center);
    let start_angle = (p1.y - center.y).atan2(p1.x - center.x);
    let end_angle = (p2.y - center.y).atan2(p2.x - center.x);
    Some(ArcFit {
        start: p1,
        end: p2,
        center,
        radius,
        start_angle,
        sweep: minor_sweep(start_angle, end_angle),
    })
}

/// Samples an arc given by its end points, pivot and radius.
///
/// The first and last samples are exactly `start` and `end`. Returns an
/// empty list when the radius is not positive.
pub fn sample_arc(start: Point, end: Point, center: Point, radius: f64, samples: usize) -> Vec<Point> {
    if radius <= f64::EPSILON || !radius.is_finite() {
        return Vec::new();
    }
    let start_angle = (start.y - center.y).atan2(start.x - center.x);
    let end_angle = (end.y - center.y).atan2(end.x - center.x);
    let sweep = minor_sweep(start_angle, end_angle);
    sample_sweep(start, end, center, radius, start_angle, sweep, samples)
}

fn sample_sweep(
    start: Point,
    end: Point,
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    samples: usize,
) -> Vec<Point> {
    let n = samples.max(2);
    let mut pts = Vec::with_capacity(n);
    pts.push(start);
    for i in 1..n - 1 {
        let theta = start_angle + sweep * i as f64 / (n - 1) as f64;
        pts.push(Point::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        ));
    }
    pts.push(end);
    pts
}
