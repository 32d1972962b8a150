use super::{ItemId, ItemState, SceneItem};
use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::geometry::Point3;
use crate::render::{DrawMode, RenderContext};

/// Half size of the crosshair drawn for a point.
const MARKER: f64 = 1.0;

/// Editable attributes of a survey point.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointAttributes {
    pub number: String,
    pub description: String,
    pub position: Point3,
}

/// Survey point drawn as a crosshair with a text label.
#[derive(Debug, Clone)]
pub struct PointItem {
    state: ItemState,
    attributes: PointAttributes,
    buffer: Vec<Point3>,
    dirty: bool,
}

impl PointItem {
    pub(crate) fn new(id: ItemId, number: &str, description: &str, position: Point3, color: Rgba) -> Self {
        Self {
            state: ItemState::new(id, number, color),
            attributes: PointAttributes {
                number: number.to_string(),
                description: description.to_string(),
                position,
            },
            buffer: Vec::new(),
            dirty: true,
        }
    }

    pub fn number(&self) -> &str {
        &self.attributes.number
    }

    pub fn description(&self) -> &str {
        &self.attributes.description
    }

    pub fn position(&self) -> Point3 {
        self.attributes.position
    }

    pub fn attributes(&self) -> &PointAttributes {
        &self.attributes
    }

    /// Replaces number, description and position. The label follows the
    /// point number.
    pub fn set_attributes(&mut self, attributes: PointAttributes) {
        self.state.name = attributes.number.clone();
        self.attributes = attributes;
        self.dirty = true;
    }

    /// Text shown next to the crosshair.
    pub fn label(&self) -> String {
        let p = self.attributes.position;
        format!("{}\nX: {}\nY: {}", self.state.name, p.x, p.y)
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.buffer
    }
}

impl SceneItem for PointItem {
    fn state(&self) -> &ItemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    fn update(&mut self) {
        let p = self.attributes.position;
        self.buffer = vec![
            Point3::new(p.x - MARKER, p.y, p.z),
            Point3::new(p.x + MARKER, p.y, p.z),
            Point3::new(p.x, p.y - MARKER, p.z),
            Point3::new(p.x, p.y + MARKER, p.z),
        ];
        self.dirty = false;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn render(&mut self, ctx: &mut dyn RenderContext, config: &SceneConfig, override_color: Option<Rgba>) {
        if !self.state.visible {
            return;
        }
        if self.dirty {
            self.update();
        }
        let color = self.state.display_color(config, override_color);
        ctx.draw(DrawMode::Lines, &self.buffer, color);
        if !self.state.name.is_empty() {
            let label_color = match override_color {
                Some(c) => c,
                None if self.state.selected || self.state.hovered => color,
                None => config.colors.label,
            };
            let p = self.attributes.position;
            ctx.draw_text(Point3::new(p.x + 0.5, p.y - 2.0, p.z), &self.label(), label_color);
        }
    }

    fn pos(&self) -> Point3 {
        self.attributes.position
    }

    fn mesh_points(&self) -> Vec<Point3> {
        vec![self.attributes.position]
    }
}
