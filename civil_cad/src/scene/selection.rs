//! Mouse selection, hover and visibility.

use super::commands::Command;
use super::Scene;
use crate::error::SceneError;
use crate::items::{ItemId, SceneItem};

impl Scene {
    /// Handles a click at viewport pixel `(x, y)`. Without `extend` the
    /// previous selection is dropped first; clicking empty space clears it.
    pub fn click(&mut self, x: u32, y: u32, extend: bool) -> Option<ItemId> {
        let hit = self.item_at(x, y);
        if !extend || hit.is_none() {
            self.clear_selection();
        }
        if let Some(id) = hit {
            if let Some(item) = self.registry.get_mut(id) {
                item.set_selected(true);
                log::debug!("selected '{}' ({id})", item.name());
            }
        }
        hit
    }

    /// Highlights the item under `(x, y)`, clearing any other hover.
    pub fn hover(&mut self, x: u32, y: u32) -> Option<ItemId> {
        let hit = self.item_at(x, y);
        for item in self.registry.items_mut() {
            let hovered = Some(item.id()) == hit;
            if item.is_hovered() != hovered {
                item.set_hovered(hovered);
            }
        }
        hit
    }

    /// Selects every visible item.
    pub fn select_all(&mut self) {
        for item in self.registry.items_mut() {
            if item.is_visible() {
                item.set_selected(true);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        for item in self.registry.items_mut() {
            if item.is_selected() {
                item.set_selected(false);
            }
        }
    }

    pub fn clear_hover(&mut self) {
        for item in self.registry.items_mut() {
            if item.is_hovered() {
                item.set_hovered(false);
            }
        }
    }

    /// Hides the selected items as one undoable step. Does nothing when
    /// nothing is selected.
    pub fn hide_selection(&mut self) -> Result<(), SceneError> {
        let ids: Vec<ItemId> = self.selected_items().iter().map(|i| i.id()).collect();
        if ids.is_empty() {
            return Ok(());
        }
        let items = ids.into_iter().map(|id| (id, false)).collect();
        self.add_undo_command(Command::visibility_changed(items))
    }

    /// Shows every hidden item as one undoable step.
    pub fn unhide_all(&mut self) -> Result<(), SceneError> {
        let items: Vec<(ItemId, bool)> = self
            .items()
            .iter()
            .filter(|i| !i.is_visible())
            .map(|i| (i.id(), true))
            .collect();
        if items.is_empty() {
            return Ok(());
        }
        self.add_undo_command(Command::visibility_changed(items))
    }
}
