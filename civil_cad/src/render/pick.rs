//! Offscreen id buffer used to find the item under a pixel.
//!
//! Items are rasterised in a flat color that packs their id. Pixels keep the
//! id of the nearest fragment, so reading one pixel back names the topmost
//! item there.

use super::{Camera, DrawMode, RenderContext};
use crate::color::Rgba;
use crate::geometry::Point3;

type Fragment = (f64, f64, f64);

#[derive(Debug, Clone)]
pub struct PickBuffer {
    camera: Camera,
    ids: Vec<u32>,
    depth: Vec<f64>,
    line_width: f32,
}

impl PickBuffer {
    pub fn new(camera: Camera) -> Self {
        let len = camera.width as usize * camera.height as usize;
        Self {
            camera,
            ids: vec![0; len],
            depth: vec![f64::NEG_INFINITY; len],
            line_width: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.camera.width
    }

    pub fn height(&self) -> u32 {
        self.camera.height
    }

    /// Adopts the camera, reallocating when the viewport size changed, and
    /// clears every pixel to id 0.
    pub fn begin(&mut self, camera: &Camera) {
        if camera.width != self.camera.width || camera.height != self.camera.height {
            let len = camera.width as usize * camera.height as usize;
            self.ids = vec![0; len];
            self.depth = vec![f64::NEG_INFINITY; len];
        }
        self.camera = *camera;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.ids.fill(0);
        self.depth.fill(f64::NEG_INFINITY);
    }

    /// Color stored at pixel `(x, y)`, bottom-left origin.
    pub fn read_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.camera.width || y >= self.camera.height {
            return None;
        }
        Some(Rgba::from_id(self.ids[(y * self.camera.width + x) as usize]))
    }

    /// Id stored at pixel `(x, y)`; 0 when empty or out of bounds.
    pub fn id_at(&self, x: u32, y: u32) -> u32 {
        self.read_pixel(x, y).map(Rgba::to_id).unwrap_or(0)
    }

    fn plot(&mut self, x: i64, y: i64, z: f64, id: u32) {
        if x < 0 || y < 0 || x >= self.camera.width as i64 || y >= self.camera.height as i64 {
            return;
        }
        let i = y as usize * self.camera.width as usize + x as usize;
        if z >= self.depth[i] {
            self.depth[i] = z;
            self.ids[i] = id;
        }
    }

    fn plot_wide(&mut self, x: f64, y: f64, z: f64, id: u32) {
        let half = (f64::from(self.line_width).max(1.0) - 1.0) / 2.0;
        let (x0, x1) = ((x - half).round() as i64, (x + half).round() as i64);
        let (y0, y1) = ((y - half).round() as i64, (y + half).round() as i64);
        for py in y0..=y1 {
            for px in x0..=x1 {
                self.plot(px, py, z, id);
            }
        }
    }

    fn segment(&mut self, a: Fragment, b: Fragment, id: u32) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil();
        if !steps.is_finite() {
            return;
        }
        let n = (steps as i64).max(1);
        for i in 0..=n {
            let t = i as f64 / n as f64;
            self.plot_wide(
                a.0 + (b.0 - a.0) * t,
                a.1 + (b.1 - a.1) * t,
                a.2 + (b.2 - a.2) * t,
                id,
            );
        }
    }

    fn triangle(&mut self, a: Fragment, b: Fragment, c: Fragment, id: u32) {
        let area = (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1);
        if area.abs() < f64::EPSILON || !area.is_finite() {
            // edge-on triangles still cover their outline
            self.segment(a, b, id);
            self.segment(b, c, id);
            return;
        }
        let w = self.camera.width as f64;
        let h = self.camera.height as f64;
        let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as i64;
        let max_x = a.0.max(b.0).max(c.0).ceil().min(w - 1.0) as i64;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as i64;
        let max_y = a.1.max(b.1).max(c.1).ceil().min(h - 1.0) as i64;
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let (sx, sy) = (px as f64 + 0.5, py as f64 + 0.5);
                let w0 = ((b.0 - sx) * (c.1 - sy) - (c.0 - sx) * (b.1 - sy)) / area;
                let w1 = ((c.0 - sx) * (a.1 - sy) - (a.0 - sx) * (c.1 - sy)) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.plot(px, py, w0 * a.2 + w1 * b.2 + w2 * c.2, id);
                }
            }
        }
    }
}

impl RenderContext for PickBuffer {
    fn draw(&mut self, mode: DrawMode, vertices: &[Point3], color: Rgba) {
        let id = color.to_id();
        let frags: Vec<Fragment> = vertices.iter().map(|p| self.camera.project(*p)).collect();
        match mode {
            DrawMode::Lines => {
                for pair in frags.chunks_exact(2) {
                    self.segment(pair[0], pair[1], id);
                }
            }
            DrawMode::LineStrip | DrawMode::LineLoop => {
                for pair in frags.windows(2) {
                    self.segment(pair[0], pair[1], id);
                }
                if mode == DrawMode::LineLoop && frags.len() > 2 {
                    self.segment(frags[frags.len() - 1], frags[0], id);
                }
                if frags.len() == 1 {
                    self.segment(frags[0], frags[0], id);
                }
            }
            DrawMode::Triangles => {
                for tri in frags.chunks_exact(3) {
                    self.triangle(tri[0], tri[1], tri[2], id);
                }
            }
        }
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }
}
