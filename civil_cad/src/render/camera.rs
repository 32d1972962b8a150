use crate::geometry::{Bounds3, Point3};

const MIN_ZOOM: f64 = 0.1;
const PAN_SPEED: f64 = 0.002;
const WHEEL_SPEED: f64 = 0.001;

/// Orthographic camera looking straight down the z axis.
///
/// The view shows `zoom * scale` world units either side of `center`
/// vertically, widened horizontally by the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Point3,
    pub scale: f64,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Point3::new(0.0, 0.0, 0.0),
            scale: 1.0,
            zoom: 1.0,
            width: 2,
            height: 2,
        }
    }
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self::default();
        camera.resize(width, height);
        camera
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(2);
        self.height = height.max(2);
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// Frames the bounding box of `points`. With nothing to frame the box
    /// (0,0,0)-(100,100,100) is used.
    pub fn frame(&mut self, points: &[Point3]) {
        let bounds = Bounds3::from_points(points).unwrap_or(Bounds3 {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(100.0, 100.0, 100.0),
        });
        self.center = bounds.center();
        let radius = bounds.radius();
        self.scale = if radius > f64::EPSILON { radius } else { 1.0 };
        self.zoom = 1.0;
    }

    /// Moves the view by a mouse drag of `(dx, dy)` pixels, y pointing down.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let step = self.zoom * self.scale * PAN_SPEED;
        self.center.x -= dx * step;
        self.center.y += dy * step;
    }

    /// Applies a wheel delta; positive deltas zoom in.
    pub fn zoom(&mut self, wheel_delta: f64) {
        self.zoom = (self.zoom - wheel_delta * WHEEL_SPEED).max(MIN_ZOOM);
    }

    /// World units per pixel.
    pub fn units_per_pixel(&self) -> f64 {
        2.0 * self.zoom * self.scale / self.height as f64
    }

    /// Framebuffer position of `p` with the origin at the bottom-left
    /// corner. The third component is the depth, larger being nearer.
    pub fn project(&self, p: Point3) -> (f64, f64, f64) {
        let upp = self.units_per_pixel();
        let x = (p.x - self.center.x) / upp + 0.5 * self.width as f64;
        let y = (p.y - self.center.y) / upp + 0.5 * self.height as f64;
        (x, y, p.z)
    }

    /// World XY under framebuffer pixel `(x, y)` (bottom-left origin).
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let upp = self.units_per_pixel();
        (
            (x - 0.5 * self.width as f64) * upp + self.center.x,
            (y - 0.5 * self.height as f64) * upp + self.center.y,
        )
    }
}
