//! Draw-call contract between scene items and the host renderer.

pub mod camera;
pub mod pick;

pub use camera::Camera;
pub use pick::PickBuffer;

use crate::color::Rgba;
use crate::geometry::Point3;

/// Primitive assembly of a vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Independent segments from vertex pairs.
    Lines,
    LineStrip,
    /// Closed strip.
    LineLoop,
    Triangles,
}

/// Target for item rendering. Vertices are in world coordinates.
pub trait RenderContext {
    fn draw(&mut self, mode: DrawMode, vertices: &[Point3], color: Rgba);

    fn set_line_width(&mut self, width: f32);

    fn line_width(&self) -> f32;

    /// Text anchored at `position`. Targets without text support ignore it.
    fn draw_text(&mut self, _position: Point3, _text: &str, _color: Rgba) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub mode: DrawMode,
    pub vertices: Vec<Point3>,
    pub color: Rgba,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCall {
    pub position: Point3,
    pub text: String,
    pub color: Rgba,
}

/// Records draw calls for a host renderer to replay.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub background: Rgba,
    pub calls: Vec<DrawCall>,
    pub texts: Vec<TextCall>,
    line_width: f32,
}

impl DrawList {
    pub fn new(background: Rgba, line_width: f32) -> Self {
        Self {
            background,
            calls: Vec::new(),
            texts: Vec::new(),
            line_width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.texts.is_empty()
    }

    /// Calls drawn in `color`.
    pub fn calls_with_color(&self, color: Rgba) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| c.color == color)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(Rgba::BLACK, 1.0)
    }
}

impl RenderContext for DrawList {
    fn draw(&mut self, mode: DrawMode, vertices: &[Point3], color: Rgba) {
        if vertices.is_empty() {
            return;
        }
        self.calls.push(DrawCall {
            mode,
            vertices: vertices.to_vec(),
            color,
            line_width: self.line_width,
        });
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn draw_text(&mut self, position: Point3, text: &str, color: Rgba) {
        self.texts.push(TextCall {
            position,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_with_line_width() {
        let mut list = DrawList::default();
        list.set_line_width(3.0);
        list.draw(
            DrawMode::Lines,
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            Rgba::rgb(255, 0, 0),
        );
        list.draw(DrawMode::Lines, &[], Rgba::rgb(0, 255, 0));
        assert_eq!(list.calls.len(), 1);
        assert_eq!(list.calls[0].line_width, 3.0);
        assert_eq!(list.calls_with_color(Rgba::rgb(255, 0, 0)).count(), 1);
    }
}
