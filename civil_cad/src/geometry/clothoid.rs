//! Euler spiral (clothoid) transitions evaluated through Fresnel integrals.

use std::f64::consts::PI;

use super::Point;

/// Side a spiral bends towards while travelling from its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Turn {
    #[default]
    Left,
    Right,
}

impl Turn {
    fn sign(self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
        }
    }
}

/// Clothoid described by start point, initial heading, length and scale `A`.
///
/// The local curve is `X = A√π·C(t)`, `Y = A√π·S(t)` for `t` in
/// `[0, length / A]`, with `S` and `C` the normalised Fresnel integrals.
/// A `reversed` spiral is laid out from `start` but traversed from its far
/// end back to `start`, which is how exit transitions are stored.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClothoidSpiral {
    pub start: Point,
    pub heading: f64,
    pub length: f64,
    pub scale: f64,
    #[serde(default)]
    pub turn: Turn,
    #[serde(default)]
    pub reversed: bool,
}

impl ClothoidSpiral {
    pub fn new(start: Point, heading: f64, length: f64, scale: f64) -> Self {
        Self {
            start,
            heading,
            length,
            scale,
            turn: Turn::Left,
            reversed: false,
        }
    }

    pub fn turning(mut self, turn: Turn) -> Self {
        self.turn = turn;
        self
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    fn is_valid(&self) -> bool {
        self.length.is_finite()
            && self.scale.is_finite()
            && self.length > 0.0
            && self.scale > 0.0
            && self.heading.is_finite()
    }

    /// Upper bound of the Fresnel parameter.
    pub fn param_end(&self) -> f64 {
        self.length / self.scale
    }

    /// Local-frame coordinate at parameter `t`.
    pub fn local_at(&self, t: f64) -> Point {
        let a = self.scale * PI.sqrt();
        let (s, c) = fresnel::fresnl(t);
        Point::new(a * c, self.turn.sign() * a * s)
    }

    /// World coordinate at parameter `t`.
    pub fn point_at(&self, t: f64) -> Point {
        let local = self.local_at(t);
        let (sin_h, cos_h) = self.heading.sin_cos();
        Point::new(
            self.start.x + cos_h * local.x - sin_h * local.y,
            self.start.y + sin_h * local.x + cos_h * local.y,
        )
    }

    /// Tangent heading at parameter `t`.
    pub fn heading_at(&self, t: f64) -> f64 {
        self.heading + self.turn.sign() * 0.5 * PI * t * t
    }

    /// Far end of the spiral (`t = length / A`).
    pub fn end_point(&self) -> Point {
        self.point_at(self.param_end())
    }

    /// Arc length of the evaluated curve.
    pub fn arc_length(&self) -> f64 {
        self.scale * PI.sqrt() * self.param_end()
    }

    /// Samples the spiral in traversal order. Invalid spirals yield no points.
    pub fn points(&self, samples: usize) -> Vec<Point> {
        if !self.is_valid() {
            return Vec::new();
        }
        let n = samples.max(2);
        let t_end = self.param_end();
        let mut pts: Vec<Point> = (0..n)
            .map(|i| self.point_at(t_end * i as f64 / (n - 1) as f64))
            .collect();
        if self.reversed {
            pts.reverse();
        }
        pts
    }
}

/// Samples a left-turning spiral from `start` with the given heading,
/// length and scale.
pub fn clothoid_points(start: Point, heading: f64, length: f64, scale: f64, samples: usize) -> Vec<Point> {
    ClothoidSpiral::new(start, heading, length, scale).points(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{distance, Polyline};

    #[test]
    fn starts_at_origin_with_input_heading() {
        let spiral = ClothoidSpiral::new(Point::new(10.0, 20.0), 0.7, 50.0, 30.0);
        assert_eq!(spiral.local_at(0.0), Point::new(0.0, 0.0));
        let pts = spiral.points(1000);
        assert!(distance(pts[0], Point::new(10.0, 20.0)) < 1e-12);
        let h = pts[0].heading_to(pts[1]);
        assert!((h - 0.7).abs() < 1e-3);
        assert!((spiral.heading_at(0.0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn unit_spiral_matches_fresnel_tables() {
        // C(1) = 0.7798934, S(1) = 0.4382591
        let end = ClothoidSpiral::new(Point::new(0.0, 0.0), 0.0, 1.0, 1.0).end_point();
        assert!((end.x - 1.3823).abs() < 1e-3);
        assert!((end.y - 0.7768).abs() < 1e-3);
    }

    #[test]
    fn longer_spirals_are_longer() {
        let mut last = 0.0;
        for len in [5.0, 10.0, 20.0, 40.0, 80.0] {
            let pts = clothoid_points(Point::new(0.0, 0.0), 0.0, len, 40.0, 100);
            let l = Polyline::new(pts).length();
            assert!(l > last);
            last = l;
        }
    }

    #[test]
    fn right_turn_mirrors_left() {
        let left = ClothoidSpiral::new(Point::new(0.0, 0.0), 0.0, 30.0, 25.0);
        let right = left.turning(Turn::Right);
        let (l, r) = (left.end_point(), right.end_point());
        assert!((l.x - r.x).abs() < 1e-12);
        assert!((l.y + r.y).abs() < 1e-12);
        assert!(l.y > 0.0);
    }

    #[test]
    fn reversed_spiral_ends_at_start() {
        let s = ClothoidSpiral::new(Point::new(1.0, 1.0), 1.0, 20.0, 15.0).reversed(true);
        let pts = s.points(50);
        assert_eq!(*pts.last().unwrap(), Point::new(1.0, 1.0));
        assert!(distance(pts[0], s.end_point()) < 1e-12);
    }

    #[test]
    fn invalid_parameters_yield_nothing() {
        assert!(clothoid_points(Point::new(0.0, 0.0), 0.0, 0.0, 10.0, 10).is_empty());
        assert!(clothoid_points(Point::new(0.0, 0.0), 0.0, 10.0, -1.0, 10).is_empty());
    }
}
