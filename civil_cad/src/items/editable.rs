use std::fmt;

use super::{ItemId, ItemState, SceneItem};
use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::geometry::Point3;
use crate::render::{DrawMode, RenderContext};

/// Approximate glyph size in world units, used for the pick frame.
const CHAR_WIDTH: f64 = 0.8;
const CHAR_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InputType {
    Int,
    Float,
    Text,
}

impl InputType {
    pub fn name(self) -> &'static str {
        match self {
            InputType::Int => "integer",
            InputType::Float => "float",
            InputType::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EditableValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl EditableValue {
    pub fn input_type(&self) -> InputType {
        match self {
            EditableValue::Int(_) => InputType::Int,
            EditableValue::Float(_) => InputType::Float,
            EditableValue::Text(_) => InputType::Text,
        }
    }

    /// Parses user input as a value of `input_type`.
    pub fn parse(input_type: InputType, text: &str) -> Option<Self> {
        let text = text.trim();
        match input_type {
            InputType::Int => text.parse().ok().map(EditableValue::Int),
            InputType::Float => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(EditableValue::Float),
            InputType::Text => Some(EditableValue::Text(text.to_string())),
        }
    }
}

impl fmt::Display for EditableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditableValue::Int(v) => write!(f, "{v}"),
            EditableValue::Float(v) => write!(f, "{v}"),
            EditableValue::Text(v) => f.write_str(v),
        }
    }
}

/// Value label placed in the drawing that can be edited in place.
#[derive(Debug, Clone)]
pub struct EditableItem {
    state: ItemState,
    value: EditableValue,
    position: Point3,
    frame: Vec<Point3>,
    dirty: bool,
}

impl EditableItem {
    pub(crate) fn new(id: ItemId, name: &str, color: Rgba, value: EditableValue, position: Point3) -> Self {
        Self {
            state: ItemState::new(id, name, color),
            value,
            position,
            frame: Vec::new(),
            dirty: true,
        }
    }

    pub fn value(&self) -> &EditableValue {
        &self.value
    }

    pub fn input_type(&self) -> InputType {
        self.value.input_type()
    }

    pub fn set_value(&mut self, value: EditableValue) {
        self.value = value;
        self.dirty = true;
    }
}

impl SceneItem for EditableItem {
    fn state(&self) -> &ItemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    fn update(&mut self) {
        let p = self.position;
        let w = CHAR_WIDTH * self.value.to_string().chars().count().max(1) as f64;
        self.frame = vec![
            p,
            Point3::new(p.x + w, p.y, p.z),
            Point3::new(p.x + w, p.y + CHAR_HEIGHT, p.z),
            Point3::new(p.x, p.y + CHAR_HEIGHT, p.z),
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
        ctx.draw(DrawMode::LineLoop, &self.frame, color);
        ctx.draw_text(self.position, &self.value.to_string(), color);
    }

    fn pos(&self) -> Point3 {
        self.position
    }

    fn mesh_points(&self) -> Vec<Point3> {
        Vec::new()
    }
}
