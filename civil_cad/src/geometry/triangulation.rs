//! Delaunay triangulation of survey points with barycentric elevation queries.

use crate::error::TerrainError;

use super::{Point, Point3};

/// Barycentric weights of `p` in the XY projection of triangle `abc`.
/// Returns `None` for zero-area triangles. The area test is relative to the
/// longest edge so small triangles in sub-unit coordinates still count.
fn barycentric(p: Point, a: Point3, b: Point3, c: Point3) -> Option<(f64, f64, f64)> {
    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    let edge_sq = |p: Point3, q: Point3| (p.x - q.x).powi(2) + (p.y - q.y).powi(2);
    let scale = edge_sq(a, b).max(edge_sq(b, c)).max(edge_sq(c, a));
    if !det.is_finite() || det.abs() <= f64::EPSILON * scale {
        return None;
    }
    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
    let w = 1.0 - u - v;
    Some((u, v, w))
}

const INSIDE_TOL: f64 = 1e-9;

fn check_points(points: &[Point3]) -> Result<(), TerrainError> {
    if points.len() < 3 {
        return Err(TerrainError::InsufficientPoints {
            found: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
    {
        return Err(TerrainError::InvalidPoint { index });
    }
    Ok(())
}

fn delaunay(points: &[Point3]) -> delaunator::Triangulation {
    let coords: Vec<delaunator::Point> = points
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    delaunator::triangulate(&coords)
}

/// Triangulates the XY projection of `points`. Triangle indices refer to
/// `points`.
pub fn triangulate(points: &[Point3]) -> Result<Vec<[usize; 3]>, TerrainError> {
    check_points(points)?;
    let triangulation = delaunay(points);
    let triangles: Vec<[usize; 3]> = triangulation
        .triangles
        .chunks(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    if triangles.is_empty() {
        return Err(TerrainError::Degenerate);
    }
    Ok(triangles)
}

/// Edges of the convex hull of the XY projection, for wireframe outlines.
/// Fewer than three points, or collinear input, produce no outline.
pub fn convex_hull_edges(points: &[Point3]) -> Vec<(usize, usize)> {
    if check_points(points).is_err() {
        return Vec::new();
    }
    let triangulation = delaunay(points);
    if triangulation.triangles.is_empty() {
        return Vec::new();
    }
    hull_to_edges(&triangulation.hull)
}

fn hull_to_edges(hull: &[usize]) -> Vec<(usize, usize)> {
    (0..hull.len())
        .map(|i| (hull[i], hull[(i + 1) % hull.len()]))
        .collect()
}

/// Uniform grid over triangle bounding boxes used for point location.
#[derive(Debug, Clone)]
struct GridIndex {
    origin: Point,
    cell: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl GridIndex {
    fn build(vertices: &[Point3], triangles: &[[usize; 3]]) -> Self {
        let min_x = vertices.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = vertices.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let side = (triangles.len() as f64).sqrt().ceil().max(1.0);
        let extent = (max_x - min_x).max(max_y - min_y).max(f64::EPSILON);
        let cell = extent / side;
        let cols = ((max_x - min_x) / cell).floor() as usize + 1;
        let rows = ((max_y - min_y) / cell).floor() as usize + 1;
        let mut index = GridIndex {
            origin: Point::new(min_x, min_y),
            cell,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        };
        for (i, tri) in triangles.iter().enumerate() {
            let (a, b, c) = (vertices[tri[0]], vertices[tri[1]], vertices[tri[2]]);
            let c0 = index.col(a.x.min(b.x).min(c.x));
            let c1 = index.col(a.x.max(b.x).max(c.x));
            let r0 = index.row(a.y.min(b.y).min(c.y));
            let r1 = index.row(a.y.max(b.y).max(c.y));
            for r in r0..=r1 {
                for col in c0..=c1 {
                    index.cells[r * cols + col].push(i);
                }
            }
        }
        index
    }

    fn col(&self, x: f64) -> usize {
        (((x - self.origin.x) / self.cell).floor().max(0.0) as usize).min(self.cols - 1)
    }

    fn row(&self, y: f64) -> usize {
        (((y - self.origin.y) / self.cell).floor().max(0.0) as usize).min(self.rows - 1)
    }

    fn candidates(&self, p: Point) -> &[usize] {
        let fx = (p.x - self.origin.x) / self.cell;
        let fy = (p.y - self.origin.y) / self.cell;
        let slack = INSIDE_TOL / self.cell;
        if !fx.is_finite()
            || !fy.is_finite()
            || fx < -slack
            || fy < -slack
            || fx >= self.cols as f64 + slack
            || fy >= self.rows as f64 + slack
        {
            return &[];
        }
        &self.cells[self.row(p.y) * self.cols + self.col(p.x)]
    }
}

/// Cached triangulation of a point set together with its location index.
#[derive(Debug, Clone)]
pub struct Triangulation {
    vertices: Vec<Point3>,
    triangles: Vec<[usize; 3]>,
    hull: Vec<usize>,
    index: GridIndex,
}

impl Triangulation {
    /// Builds a Delaunay triangulation over the XY projection of `points`.
    pub fn new(points: Vec<Point3>) -> Result<Self, TerrainError> {
        check_points(&points)?;
        let triangulation = delaunay(&points);
        let triangles: Vec<[usize; 3]> = triangulation
            .triangles
            .chunks(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        if triangles.is_empty() {
            return Err(TerrainError::Degenerate);
        }
        let index = GridIndex::build(&points, &triangles);
        log::debug!(
            "triangulated {} points into {} triangles",
            points.len(),
            triangles.len()
        );
        Ok(Self {
            vertices: points,
            triangles,
            hull: triangulation.hull,
            index,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Convex hull edges as index pairs into [`Self::vertices`].
    pub fn hull_edges(&self) -> Vec<(usize, usize)> {
        hull_to_edges(&self.hull)
    }

    /// Index of the triangle containing `(x, y)`, if any.
    pub fn locate(&self, x: f64, y: f64) -> Option<usize> {
        let p = Point::new(x, y);
        self.index.candidates(p).iter().copied().find(|&i| {
            let t = self.triangles[i];
            matches!(
                barycentric(p, self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]),
                Some((u, v, w)) if u >= -INSIDE_TOL && v >= -INSIDE_TOL && w >= -INSIDE_TOL
            )
        })
    }

    /// Interpolated elevation at `(x, y)`. `None` outside the hull or on a
    /// zero-area triangle.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        let tri = self.triangles[self.locate(x, y)?];
        let (a, b, c) = (
            self.vertices[tri[0]],
            self.vertices[tri[1]],
            self.vertices[tri[2]],
        );
        let (u, v, w) = barycentric(Point::new(x, y), a, b, c)?;
        let z = u * a.z + v * b.z + w * c.z;
        z.is_finite().then_some(z)
    }

    /// Triangle soup with three vertices per triangle, ready for rendering.
    pub fn vertex_buffer(&self) -> Vec<Point3> {
        self.triangles
            .iter()
            .flat_map(|t| t.iter().map(|&i| self.vertices[i]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points() -> Vec<Point3> {
        let mut pts = Vec::new();
        for i in 0..5 {
            for j in 0..4 {
                let x = i as f64 * 10.0 + (j as f64) * 0.37;
                let y = j as f64 * 12.0 + (i as f64) * 0.21;
                pts.push(Point3::new(x, y, 0.5 * x - 0.25 * y + 100.0));
            }
        }
        pts
    }

    #[test]
    fn too_few_points_is_an_error() {
        let pts = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 10.0)];
        assert_eq!(
            triangulate(&pts).unwrap_err(),
            TerrainError::InsufficientPoints { found: 2 }
        );
        assert!(Triangulation::new(pts.clone()).is_err());
        assert!(convex_hull_edges(&pts).is_empty());
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        ];
        assert_eq!(triangulate(&pts).unwrap_err(), TerrainError::Degenerate);
        assert!(convex_hull_edges(&pts).is_empty());
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, f64::NAN, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(
            triangulate(&pts).unwrap_err(),
            TerrainError::InvalidPoint { index: 1 }
        );
    }

    #[test]
    fn planar_surface_is_reproduced() {
        let tri = Triangulation::new(grid_points()).unwrap();
        let z = tri.elevation_at(17.0, 20.0).unwrap();
        assert!((z - (0.5 * 17.0 - 0.25 * 20.0 + 100.0)).abs() < 1e-9);
    }

    #[test]
    fn every_input_point_has_its_elevation() {
        let pts = grid_points();
        let tri = Triangulation::new(pts.clone()).unwrap();
        for p in &pts {
            let z = tri.elevation_at(p.x, p.y).unwrap();
            assert!((z - p.z).abs() < 1e-6);
        }
    }

    #[test]
    fn tiny_triangles_keep_their_elevation() {
        let a = Point3::new(0.0, 0.0, 1.0);
        let b = Point3::new(1e-8, 0.0, 2.0);
        let c = Point3::new(0.0, 1e-8, 3.0);
        assert!(barycentric(Point::new(2e-9, 2e-9), a, b, c).is_some());

        let tri = Triangulation::new(vec![a, b, c]).unwrap();
        let z = tri.elevation_at(2.5e-9, 5e-9).unwrap();
        assert!((z - 2.25).abs() < 1e-6);
    }

    #[test]
    fn sliver_has_no_weights() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 1e-20, 0.0);
        assert!(barycentric(Point::new(0.5, 0.0), a, b, c).is_none());
    }

    #[test]
    fn outside_hull_has_no_elevation() {
        let tri = Triangulation::new(grid_points()).unwrap();
        assert!(tri.elevation_at(-5.0, -5.0).is_none());
        assert!(tri.elevation_at(1000.0, 10.0).is_none());
        assert!(tri.elevation_at(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn triangle_soup_has_three_vertices_per_triangle() {
        let tri = Triangulation::new(grid_points()).unwrap();
        assert_eq!(tri.vertex_buffer().len(), tri.triangles().len() * 3);
    }

    #[test]
    fn square_hull_has_four_edges() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(5.0, 5.0, 3.0),
        ];
        let edges = convex_hull_edges(&pts);
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|&(a, b)| a != 4 && b != 4));
    }
}
