//! Basic geometry primitives and the pure geometric kernel.

pub mod arc;
pub mod clothoid;
pub mod triangulation;

pub use arc::{arc_through, sample_arc, ArcFit};
pub use clothoid::{clothoid_points, ClothoidSpiral, Turn};
pub use triangulation::{convex_hull_edges, triangulate, Triangulation};

/// Representation of a 2D point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Heading from `self` towards `other` in radians.
    pub fn heading_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point reached by travelling `dist` along `heading`.
    pub fn offset(&self, heading: f64, dist: f64) -> Point {
        Point::new(self.x + dist * heading.cos(), self.y + dist * heading.sin())
    }
}

/// Representation of a 3D point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the XY plane.
    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Calculates the Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Calculates the Euclidean distance between two 3D points.
pub fn distance3(a: Point3, b: Point3) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt()
}

/// Wraps an angle in radians into `(-PI, PI]`.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Representation of a series of connected line segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub vertices: Vec<Point>,
}

impl Polyline {
    /// Creates a new polyline from a list of vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Returns the total length of all segments in the polyline.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| distance(pair[0], pair[1]))
            .sum()
    }

    /// Cumulative distance along the polyline at every vertex.
    pub fn stations(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.vertices.len());
        let mut acc = 0.0;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                acc += distance(self.vertices[i - 1], *v);
            }
            out.push(acc);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Axis aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds3 {
    /// Bounding box of `points`, or `None` when the slice is empty.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let first = *points.first()?;
        let mut b = Bounds3 {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.min.z = b.min.z.min(p.z);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
            b.max.z = b.max.z.max(p.z);
        }
        Some(b)
    }

    pub fn center(&self) -> Point3 {
        Point3::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
            0.5 * (self.min.z + self.max.z),
        )
    }

    /// Distance from the center to a corner.
    pub fn radius(&self) -> f64 {
        distance3(self.center(), self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_length() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 8.0),
        ];
        let pl = Polyline::new(pts);
        assert!((pl.length() - 10.0).abs() < 1e-6);
        assert_eq!(pl.stations(), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn heading_and_offset() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);
        let h = a.heading_to(b);
        assert!((h - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        let p = a.offset(h, 2f64.sqrt());
        assert!(distance(p, b) < 1e-12);
    }

    #[test]
    fn bounds_of_points() {
        let b = Bounds3::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, -2.0, 4.0),
        ])
        .unwrap();
        assert_eq!(b.min, Point3::new(0.0, -2.0, 0.0));
        assert_eq!(b.center(), Point3::new(5.0, -1.0, 2.0));
        assert!(Bounds3::from_points(&[]).is_none());
    }

    #[test]
    fn wraps_angles() {
        let a = normalize_angle(3.0 * std::f64::consts::PI / 2.0);
        assert!((a + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
