//! Undoable scene mutations.
//!
//! A command owns whatever it takes out of the scene, so undoing a removal
//! puts back the very same item (same id, same list position). Edit
//! commands hold a single value and swap it with the item's live state on
//! every redo and undo, so they always carry what the next step writes back.

use std::collections::HashSet;

use super::registry::Registry;
use crate::alignment::{AlignmentPath, VerticalAlignment};
use crate::error::SceneError;
use crate::items::point::PointAttributes;
use crate::items::{EditableValue, Item, ItemId, SceneItem};

/// Address of a point: a standalone point item, or member `member` of a
/// point group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PointRef {
    pub item: ItemId,
    pub member: Option<usize>,
}

impl PointRef {
    pub fn standalone(item: ItemId) -> Self {
        Self { item, member: None }
    }

    pub fn member(item: ItemId, member: usize) -> Self {
        Self {
            item,
            member: Some(member),
        }
    }
}

/// Horizontal path together with its profile.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentGeometry {
    pub path: AlignmentPath,
    pub vertical: Option<VerticalAlignment>,
}

#[derive(Debug, Clone)]
pub struct AddItem {
    id: ItemId,
    slot: Option<Item>,
}

#[derive(Debug, Clone)]
pub struct RemoveItem {
    id: ItemId,
    index: usize,
    slot: Option<Item>,
}

/// Swaps one registered item for a stored one at the same list position.
/// Applying it twice puts both items back where they started.
#[derive(Debug, Clone)]
pub struct Replace {
    current: ItemId,
    slot: Option<Item>,
}

#[derive(Debug, Clone)]
pub struct EditPointAttributes {
    target: PointRef,
    attributes: PointAttributes,
}

#[derive(Debug, Clone)]
pub struct EditAlignmentPath {
    id: ItemId,
    geometry: AlignmentGeometry,
}

#[derive(Debug, Clone)]
pub struct VisibilityChanged {
    items: Vec<(ItemId, bool)>,
}

#[derive(Debug, Clone)]
pub struct EditValue {
    id: ItemId,
    value: EditableValue,
}

#[derive(Debug, Clone)]
pub enum Command {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    /// Point group replaced by the surface built from it.
    PointsToSurface(Replace),
    /// Surface replaced by a point group of its vertices.
    SurfaceToPoints(Replace),
    EditPointAttributes(EditPointAttributes),
    EditAlignmentPath(EditAlignmentPath),
    VisibilityChanged(VisibilityChanged),
    EditValue(EditValue),
}

impl Command {
    pub(crate) fn add_item(item: Item) -> Self {
        Command::AddItem(AddItem {
            id: item.id(),
            slot: Some(item),
        })
    }

    pub fn remove_item(id: ItemId) -> Self {
        Command::RemoveItem(RemoveItem {
            id,
            index: 0,
            slot: None,
        })
    }

    /// Replaces point group `group` with `surface`.
    pub(crate) fn points_to_surface(group: ItemId, surface: Item) -> Self {
        Command::PointsToSurface(Replace {
            current: group,
            slot: Some(surface),
        })
    }

    /// Replaces surface `surface` with `group`.
    pub(crate) fn surface_to_points(surface: ItemId, group: Item) -> Self {
        Command::SurfaceToPoints(Replace {
            current: surface,
            slot: Some(group),
        })
    }

    /// Sets the attributes of the point at `target`.
    pub fn edit_point(target: PointRef, attributes: PointAttributes) -> Self {
        Command::EditPointAttributes(EditPointAttributes { target, attributes })
    }

    pub fn edit_alignment(id: ItemId, geometry: AlignmentGeometry) -> Self {
        Command::EditAlignmentPath(EditAlignmentPath { id, geometry })
    }

    /// Sets the visibility of each listed item. Only the first entry for an
    /// id is kept.
    pub fn visibility_changed(mut items: Vec<(ItemId, bool)>) -> Self {
        let mut seen = HashSet::new();
        items.retain(|(id, _)| seen.insert(*id));
        Command::VisibilityChanged(VisibilityChanged { items })
    }

    /// Stores `value` in an editable item of the same input type.
    pub fn edit_value(id: ItemId, value: EditableValue) -> Self {
        Command::EditValue(EditValue { id, value })
    }

    /// Short description for logs and history lists.
    pub fn text(&self) -> String {
        match self {
            Command::AddItem(c) => format!("Add item {}", c.id),
            Command::RemoveItem(c) => format!("Remove item {}", c.id),
            Command::PointsToSurface(c) => format!("Convert points {} to surface", c.current),
            Command::SurfaceToPoints(c) => format!("Convert surface {} to points", c.current),
            Command::EditPointAttributes(c) => format!("Edit point {}", c.target.item),
            Command::EditAlignmentPath(c) => format!("Edit alignment {}", c.id),
            Command::VisibilityChanged(c) => format!("Change visibility of {} items", c.items.len()),
            Command::EditValue(c) => format!("Edit value {}", c.id),
        }
    }

    pub(crate) fn redo(&mut self, registry: &mut Registry) -> Result<(), SceneError> {
        match self {
            Command::AddItem(c) => {
                if registry.contains(c.id) {
                    return Err(SceneError::DuplicateItem(c.id));
                }
                let item = c.slot.take().ok_or(SceneError::UnknownItem(c.id))?;
                registry.add(item);
                Ok(())
            }
            Command::RemoveItem(c) => {
                let (index, item) = registry.remove(c.id).ok_or(SceneError::UnknownItem(c.id))?;
                c.index = index;
                c.slot = Some(item);
                Ok(())
            }
            Command::PointsToSurface(c) | Command::SurfaceToPoints(c) => c.swap(registry),
            Command::EditPointAttributes(c) => swap_point(registry, c.target, &mut c.attributes),
            Command::EditAlignmentPath(c) => swap_alignment(registry, c.id, &mut c.geometry),
            Command::VisibilityChanged(c) => swap_visibility(registry, &mut c.items),
            Command::EditValue(c) => swap_value(registry, c.id, &mut c.value),
        }
    }

    pub(crate) fn undo(&mut self, registry: &mut Registry) -> Result<(), SceneError> {
        match self {
            Command::AddItem(c) => {
                let (_, item) = registry.remove(c.id).ok_or(SceneError::UnknownItem(c.id))?;
                c.slot = Some(item);
                Ok(())
            }
            Command::RemoveItem(c) => {
                let item = c.slot.take().ok_or(SceneError::UnknownItem(c.id))?;
                registry.insert(c.index, item);
                Ok(())
            }
            Command::PointsToSurface(c) | Command::SurfaceToPoints(c) => c.swap(registry),
            Command::EditPointAttributes(c) => swap_point(registry, c.target, &mut c.attributes),
            Command::EditAlignmentPath(c) => swap_alignment(registry, c.id, &mut c.geometry),
            Command::VisibilityChanged(c) => swap_visibility(registry, &mut c.items),
            Command::EditValue(c) => swap_value(registry, c.id, &mut c.value),
        }
    }
}

impl Replace {
    fn swap(&mut self, registry: &mut Registry) -> Result<(), SceneError> {
        if !registry.contains(self.current) {
            return Err(SceneError::UnknownItem(self.current));
        }
        let incoming = self.slot.take().ok_or(SceneError::UnknownItem(self.current))?;
        let incoming_id = incoming.id();
        match registry.replace(self.current, incoming) {
            Some(outgoing) => {
                self.current = incoming_id;
                self.slot = Some(outgoing);
                Ok(())
            }
            None => Err(SceneError::UnknownItem(self.current)),
        }
    }
}

fn swap_point(registry: &mut Registry, target: PointRef, attributes: &mut PointAttributes) -> Result<(), SceneError> {
    let item = registry
        .get_mut(target.item)
        .ok_or(SceneError::UnknownItem(target.item))?;
    let point = match (item, target.member) {
        (Item::Point(p), None) => p,
        (Item::PointGroup(g), Some(member)) => g.point_mut(member).ok_or(SceneError::UnknownMember {
            id: target.item,
            member,
        })?,
        _ => {
            return Err(SceneError::WrongKind {
                id: target.item,
                expected: if target.member.is_some() { "point group" } else { "point" },
            })
        }
    };
    let live = point.attributes().clone();
    point.set_attributes(std::mem::replace(attributes, live));
    Ok(())
}

fn swap_alignment(registry: &mut Registry, id: ItemId, geometry: &mut AlignmentGeometry) -> Result<(), SceneError> {
    match registry.get_mut(id) {
        Some(Item::Alignment(a)) => {
            let live = AlignmentGeometry {
                path: a.path().clone(),
                vertical: a.vertical().cloned(),
            };
            let AlignmentGeometry { path, vertical } = std::mem::replace(geometry, live);
            a.set_path(path);
            a.set_vertical(vertical);
            Ok(())
        }
        Some(_) => Err(SceneError::WrongKind {
            id,
            expected: "alignment",
        }),
        None => Err(SceneError::UnknownItem(id)),
    }
}

fn swap_visibility(registry: &mut Registry, items: &mut [(ItemId, bool)]) -> Result<(), SceneError> {
    if let Some((missing, _)) = items.iter().find(|(id, _)| !registry.contains(*id)) {
        return Err(SceneError::UnknownItem(*missing));
    }
    for (id, visible) in items.iter_mut() {
        if let Some(item) = registry.get_mut(*id) {
            let live = item.is_visible();
            item.set_visible(*visible);
            *visible = live;
        }
    }
    Ok(())
}

fn swap_value(registry: &mut Registry, id: ItemId, value: &mut EditableValue) -> Result<(), SceneError> {
    match registry.get_mut(id) {
        Some(Item::Editable(e)) => {
            if e.input_type() != value.input_type() {
                return Err(SceneError::ValueType {
                    id,
                    expected: e.input_type().name(),
                });
            }
            let live = e.value().clone();
            e.set_value(std::mem::replace(value, live));
            Ok(())
        }
        Some(_) => Err(SceneError::WrongKind {
            id,
            expected: "editable value",
        }),
        None => Err(SceneError::UnknownItem(id)),
    }
}
