//! Scene graph: item registry, command history, camera and picking.

pub mod commands;
mod managers;
pub mod registry;
mod selection;
pub mod undo;

pub use commands::{AlignmentGeometry, Command, PointRef};
pub use registry::Registry;
pub use undo::{CommandStack, DEFAULT_UNDO_LIMIT};

use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::Point3;
use crate::items::{AxisItem, Item, ItemId, SceneItem};
use crate::render::{Camera, DrawList, PickBuffer, RenderContext};

/// Counters behind the default item names.
#[derive(Debug, Clone, Copy, Default)]
struct NameCounters {
    groups: usize,
    terrains: usize,
    alignments: usize,
}

pub struct Scene {
    config: SceneConfig,
    registry: Registry,
    undo_stack: CommandStack,
    camera: Camera,
    pick: PickBuffer,
    next_id: u64,
    names: NameCounters,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default(), 800, 600)
    }
}

impl Scene {
    /// Creates a scene with a `width` x `height` viewport holding only the
    /// world axes.
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let camera = Camera::new(width, height);
        let mut scene = Self {
            undo_stack: CommandStack::new(config.undo_limit),
            config,
            registry: Registry::default(),
            camera,
            pick: PickBuffer::new(camera),
            next_id: 1,
            names: NameCounters::default(),
        };
        let axis = AxisItem::new(scene.allocate_id());
        scene.registry.add(Item::Axis(axis));
        scene.reset_camera();
        scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Returns a fresh item id. Ids are never handed out twice.
    pub(crate) fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn items(&self) -> &[Item] {
        self.registry.items()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.registry.get(id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.registry.index_of(id)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.registry.items().iter().filter(|i| i.is_visible())
    }

    /// Selected items among the visible ones.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.visible_items().filter(|i| i.is_selected()).collect()
    }

    /// The selected item when exactly one is selected.
    pub fn active_selection(&self) -> Option<&Item> {
        match self.selected_items().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Applies `command` and records it on the undo stack.
    pub fn add_undo_command(&mut self, command: Command) -> Result<(), SceneError> {
        self.undo_stack.push(command, &mut self.registry)
    }

    /// Reverts the last command. Returns `false` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> Result<bool, SceneError> {
        self.undo_stack.undo(&mut self.registry)
    }

    pub fn redo(&mut self) -> Result<bool, SceneError> {
        self.undo_stack.redo(&mut self.registry)
    }

    pub fn undo_stack(&self) -> &CommandStack {
        &self.undo_stack
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        self.config.undo_limit = limit;
        self.undo_stack.set_limit(limit);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Resizes the viewport and the pick buffer with it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.pick.begin(&self.camera);
        log::debug!("viewport resized to {}x{}", self.camera.width, self.camera.height);
    }

    /// Frames every visible item that takes part in framing.
    pub fn reset_camera(&mut self) {
        let points = self.item_mesh_points();
        self.camera.frame(&points);
    }

    /// Positions and vertices of visible items used for camera framing.
    /// Axes and editable values do not contribute.
    pub fn item_mesh_points(&self) -> Vec<Point3> {
        self.visible_items().flat_map(|i| i.mesh_points()).collect()
    }

    /// Zooms by a wheel delta and drops any hover highlight.
    pub fn wheel(&mut self, delta: f64) {
        self.camera.zoom(delta);
        self.clear_hover();
    }

    pub fn is_wireframe(&self) -> bool {
        self.config.wireframe
    }

    pub fn set_wireframe(&mut self, enabled: bool) {
        self.config.wireframe = enabled;
    }

    pub fn background(&self) -> Rgba {
        self.config.background
    }

    pub fn set_background(&mut self, color: Rgba) {
        self.config.background = color;
    }

    /// Draws every visible item into `ctx`.
    pub fn render(&mut self, ctx: &mut dyn RenderContext) {
        ctx.set_line_width(self.config.line_width);
        let config = &self.config;
        for item in self.registry.items_mut() {
            if item.is_visible() {
                item.render(ctx, config, None);
            }
        }
    }

    /// Renders the scene into a fresh draw list.
    pub fn draw_list(&mut self) -> DrawList {
        let mut list = DrawList::new(self.config.background, self.config.line_width);
        self.render(&mut list);
        list
    }

    /// Item under viewport pixel `(x, y)`, with y measured from the top.
    pub fn item_at(&mut self, x: u32, y: u32) -> Option<ItemId> {
        if x >= self.camera.width || y >= self.camera.height {
            return None;
        }
        let y = self.camera.height - y - 1;
        self.render_for_selection();
        let id = self.pick.id_at(x, y) as usize;
        if id == 0 {
            return None;
        }
        self.registry.items().get(id - 1).map(|i| i.id())
    }

    /// Draws every visible, selectable item into the pick buffer in a flat
    /// color holding its 1-based list index.
    fn render_for_selection(&mut self) {
        self.pick.begin(&self.camera);
        self.pick.set_line_width(self.config.line_width);
        let config = &self.config;
        for (i, item) in self.registry.items_mut().iter_mut().enumerate() {
            if item.is_visible() && item.is_selectable() {
                item.render(&mut self.pick, config, Some(Rgba::from_id(i as u32 + 1)));
            }
        }
    }

    fn next_group_name(&mut self) -> String {
        self.names.groups += 1;
        format!("Point Group #{}", self.names.groups)
    }

    fn next_terrain_name(&mut self) -> String {
        self.names.terrains += 1;
        format!("Terrain Item #{}", self.names.terrains)
    }

    fn next_alignment_name(&mut self) -> String {
        self.names.alignments += 1;
        format!("Alignment #{}", self.names.alignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_holds_axes() {
        let scene = Scene::default();
        assert_eq!(scene.items().len(), 1);
        assert!(matches!(scene.items()[0], Item::Axis(_)));
        assert!(scene.item_mesh_points().is_empty());
        assert_eq!(scene.camera().center, Point3::new(50.0, 50.0, 50.0));
    }

    #[test]
    fn ids_are_unique() {
        let mut scene = Scene::default();
        let a = scene.allocate_id();
        let b = scene.allocate_id();
        assert_ne!(a, b);
        assert!(scene.item(a).is_none());
    }

    #[test]
    fn draw_list_uses_background() {
        let mut scene = Scene::default();
        scene.set_background(Rgba::rgb(1, 2, 3));
        let list = scene.draw_list();
        assert_eq!(list.background, Rgba::rgb(1, 2, 3));
        assert_eq!(list.calls.len(), 3);
    }
}
