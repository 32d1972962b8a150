use super::{ItemId, ItemState, SceneItem};
use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::geometry::Point3;
use crate::render::{DrawMode, RenderContext};

const FORWARD: f64 = 10_000.0;
const BACKWARD: f64 = -10.0;

/// World axes. Not selectable and ignored when framing the camera.
#[derive(Debug, Clone)]
pub struct AxisItem {
    state: ItemState,
    lines: [[Point3; 2]; 3],
}

impl AxisItem {
    pub(crate) fn new(id: ItemId) -> Self {
        let mut state = ItemState::new(id, "Axis", Rgba::BLACK);
        state.selectable = false;
        let mut item = Self {
            state,
            lines: [[Point3::new(0.0, 0.0, 0.0); 2]; 3],
        };
        item.update();
        item
    }
}

impl SceneItem for AxisItem {
    fn state(&self) -> &ItemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    fn update(&mut self) {
        self.lines = [
            [Point3::new(FORWARD, 0.0, 0.0), Point3::new(BACKWARD, 0.0, 0.0)],
            [Point3::new(0.0, FORWARD, 0.0), Point3::new(0.0, BACKWARD, 0.0)],
            [Point3::new(0.0, 0.0, FORWARD), Point3::new(0.0, 0.0, BACKWARD)],
        ];
    }

    fn is_dirty(&self) -> bool {
        false
    }

    fn render(&mut self, ctx: &mut dyn RenderContext, config: &SceneConfig, override_color: Option<Rgba>) {
        if !self.state.visible {
            return;
        }
        let previous = ctx.line_width();
        ctx.set_line_width(1.0);
        let colors = [config.colors.axis_x, config.colors.axis_y, config.colors.axis_z];
        for (line, color) in self.lines.iter().zip(colors) {
            ctx.draw(DrawMode::Lines, line, override_color.unwrap_or(color));
        }
        ctx.set_line_width(previous);
    }

    fn pos(&self) -> Point3 {
        Point3::new(0.0, 0.0, 0.0)
    }

    fn mesh_points(&self) -> Vec<Point3> {
        Vec::new()
    }

    fn set_selected(&mut self, _selected: bool) {}

    fn set_hovered(&mut self, _hovered: bool) {}
}
