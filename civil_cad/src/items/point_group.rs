use super::{ItemId, ItemState, PointItem, SceneItem};
use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::geometry::Point3;
use crate::render::RenderContext;

/// Named collection of points sharing one color.
///
/// Selection, hover and color changes apply to every member, so selecting
/// the group is the same as selecting each of its points.
#[derive(Debug, Clone)]
pub struct PointGroupItem {
    state: ItemState,
    points: Vec<PointItem>,
}

impl PointGroupItem {
    pub(crate) fn new(id: ItemId, name: &str, color: Rgba, mut points: Vec<PointItem>) -> Self {
        for p in &mut points {
            p.set_color(color);
        }
        Self {
            state: ItemState::new(id, name, color),
            points,
        }
    }

    pub fn points(&self) -> &[PointItem] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&PointItem> {
        self.points.get(index)
    }

    pub fn point_mut(&mut self, index: usize) -> Option<&mut PointItem> {
        self.points.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn positions(&self) -> Vec<Point3> {
        self.points.iter().map(|p| p.position()).collect()
    }

    /// Takes ownership of `points`, giving them the group's color and
    /// highlight state.
    pub fn set_points(&mut self, mut points: Vec<PointItem>) {
        for p in &mut points {
            p.set_color(self.state.color);
            p.set_selected(self.state.selected);
            p.set_hovered(self.state.hovered);
        }
        self.points = points;
    }
}

impl SceneItem for PointGroupItem {
    fn state(&self) -> &ItemState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    fn update(&mut self) {
        for p in &mut self.points {
            p.update();
        }
    }

    fn is_dirty(&self) -> bool {
        self.points.iter().any(|p| p.is_dirty())
    }

    fn render(&mut self, ctx: &mut dyn RenderContext, config: &SceneConfig, override_color: Option<Rgba>) {
        if !self.state.visible {
            return;
        }
        for p in &mut self.points {
            p.render(ctx, config, override_color);
        }
    }

    /// Centroid of the members.
    fn pos(&self) -> Point3 {
        if self.points.is_empty() {
            return Point3::new(0.0, 0.0, 0.0);
        }
        let n = self.points.len() as f64;
        let (x, y, z) = self.points.iter().fold((0.0, 0.0, 0.0), |acc, p| {
            let q = p.position();
            (acc.0 + q.x, acc.1 + q.y, acc.2 + q.z)
        });
        Point3::new(x / n, y / n, z / n)
    }

    fn mesh_points(&self) -> Vec<Point3> {
        self.positions()
    }

    fn set_color(&mut self, color: Rgba) {
        self.state.color = color;
        for p in &mut self.points {
            p.set_color(color);
        }
    }

    fn set_selected(&mut self, selected: bool) {
        self.state.selected = selected;
        for p in &mut self.points {
            p.set_selected(selected);
        }
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.state.hovered = hovered;
        for p in &mut self.points {
            p.set_hovered(hovered);
        }
    }
}
