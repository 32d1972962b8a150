//! Renderable scene items.

pub mod alignment;
pub mod axis;
pub mod editable;
pub mod point;
pub mod point_group;
pub mod terrain;

pub use alignment::AlignmentItem;
pub use axis::AxisItem;
pub use editable::{EditableItem, EditableValue, InputType};
pub use point::PointItem;
pub use point_group::PointGroupItem;
pub use terrain::TerrainItem;

use std::fmt;

use crate::color::Rgba;
use crate::config::SceneConfig;
use crate::geometry::Point3;
use crate::render::RenderContext;

/// Identity of a scene item. Only a [`Scene`](crate::scene::Scene) hands out
/// ids and it never reuses one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ItemId(pub(crate) u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display and interaction flags shared by every item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemState {
    pub id: ItemId,
    pub name: String,
    pub color: Rgba,
    pub visible: bool,
    pub selectable: bool,
    pub selected: bool,
    pub hovered: bool,
}

impl ItemState {
    pub(crate) fn new(id: ItemId, name: &str, color: Rgba) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            visible: true,
            selectable: true,
            selected: false,
            hovered: false,
        }
    }

    /// Color to draw with: the override when given, then selection and
    /// hover highlights, then the item color.
    pub fn display_color(&self, config: &SceneConfig, override_color: Option<Rgba>) -> Rgba {
        match override_color {
            Some(c) => c,
            None if self.selected => config.selected_color,
            None if self.hovered => config.hovered_color,
            None => self.color,
        }
    }
}

pub trait SceneItem {
    fn state(&self) -> &ItemState;

    fn state_mut(&mut self) -> &mut ItemState;

    /// Rebuilds the vertex buffer from the current item data.
    fn update(&mut self);

    fn is_dirty(&self) -> bool;

    /// Draws the item, rebuilding stale buffers first. Hidden items draw
    /// nothing.
    fn render(&mut self, ctx: &mut dyn RenderContext, config: &SceneConfig, override_color: Option<Rgba>);

    /// Anchor position of the item.
    fn pos(&self) -> Point3;

    /// Points contributing to camera framing.
    fn mesh_points(&self) -> Vec<Point3>;

    fn id(&self) -> ItemId {
        self.state().id
    }

    fn name(&self) -> &str {
        &self.state().name
    }

    fn set_name(&mut self, name: &str) {
        self.state_mut().name = name.to_string();
    }

    fn color(&self) -> Rgba {
        self.state().color
    }

    fn set_color(&mut self, color: Rgba) {
        self.state_mut().color = color;
    }

    fn is_visible(&self) -> bool {
        self.state().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.state_mut().visible = visible;
    }

    fn is_selectable(&self) -> bool {
        self.state().selectable
    }

    fn is_selected(&self) -> bool {
        self.state().selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.state_mut().selected = selected;
    }

    fn is_hovered(&self) -> bool {
        self.state().hovered
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.state_mut().hovered = hovered;
    }
}

/// Every kind of item a scene can hold.
#[derive(Debug, Clone)]
pub enum Item {
    Point(PointItem),
    PointGroup(PointGroupItem),
    Terrain(TerrainItem),
    Alignment(AlignmentItem),
    Axis(AxisItem),
    Editable(EditableItem),
}

macro_rules! dispatch {
    ($self:expr, $item:ident => $body:expr) => {
        match $self {
            Item::Point($item) => $body,
            Item::PointGroup($item) => $body,
            Item::Terrain($item) => $body,
            Item::Alignment($item) => $body,
            Item::Axis($item) => $body,
            Item::Editable($item) => $body,
        }
    };
}

impl SceneItem for Item {
    fn state(&self) -> &ItemState {
        dispatch!(self, i => i.state())
    }

    fn state_mut(&mut self) -> &mut ItemState {
        dispatch!(self, i => i.state_mut())
    }

    fn update(&mut self) {
        dispatch!(self, i => i.update())
    }

    fn is_dirty(&self) -> bool {
        dispatch!(self, i => i.is_dirty())
    }

    fn render(&mut self, ctx: &mut dyn RenderContext, config: &SceneConfig, override_color: Option<Rgba>) {
        dispatch!(self, i => i.render(ctx, config, override_color))
    }

    fn pos(&self) -> Point3 {
        dispatch!(self, i => i.pos())
    }

    fn mesh_points(&self) -> Vec<Point3> {
        dispatch!(self, i => i.mesh_points())
    }

    fn set_color(&mut self, color: Rgba) {
        dispatch!(self, i => i.set_color(color))
    }

    fn set_visible(&mut self, visible: bool) {
        dispatch!(self, i => i.set_visible(visible))
    }

    fn set_selected(&mut self, selected: bool) {
        dispatch!(self, i => i.set_selected(selected))
    }

    fn set_hovered(&mut self, hovered: bool) {
        dispatch!(self, i => i.set_hovered(hovered))
    }
}

impl Item {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Item::Point(_) => "point",
            Item::PointGroup(_) => "point group",
            Item::Terrain(_) => "terrain",
            Item::Alignment(_) => "alignment",
            Item::Axis(_) => "axis",
            Item::Editable(_) => "editable value",
        }
    }

    pub fn as_point_group(&self) -> Option<&PointGroupItem> {
        match self {
            Item::PointGroup(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_terrain(&self) -> Option<&TerrainItem> {
        match self {
            Item::Terrain(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_alignment(&self) -> Option<&AlignmentItem> {
        match self {
            Item::Alignment(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_editable(&self) -> Option<&EditableItem> {
        match self {
            Item::Editable(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_precedence() {
        let cfg = SceneConfig::default();
        let mut state = ItemState::new(ItemId(1), "a", Rgba::rgb(1, 2, 3));
        assert_eq!(state.display_color(&cfg, None), Rgba::rgb(1, 2, 3));
        state.hovered = true;
        assert_eq!(state.display_color(&cfg, None), cfg.hovered_color);
        state.selected = true;
        assert_eq!(state.display_color(&cfg, None), cfg.selected_color);
        assert_eq!(state.display_color(&cfg, Some(Rgba::from_id(4))), Rgba::from_id(4));
    }
}
