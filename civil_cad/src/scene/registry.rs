use crate::items::{Item, ItemId, SceneItem};

/// Insertion-ordered item list. Pick ids and draw order follow this order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    items: Vec<Item>,
}

impl Registry {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Appends `item`. Returns `false` if an item with the same id is
    /// already registered.
    pub(crate) fn add(&mut self, item: Item) -> bool {
        let end = self.items.len();
        self.insert(end, item)
    }

    /// Inserts `item` at `index` (clamped to the list). Duplicates are
    /// ignored.
    pub(crate) fn insert(&mut self, index: usize, item: Item) -> bool {
        if self.contains(item.id()) {
            log::warn!("item {} is already in the scene", item.id());
            return false;
        }
        log::debug!("added {} '{}' ({})", item.kind_name(), item.name(), item.id());
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        true
    }

    /// Removes the item, returning it with the position it held.
    pub(crate) fn remove(&mut self, id: ItemId) -> Option<(usize, Item)> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        log::debug!("removed {} '{}' ({})", item.kind_name(), item.name(), id);
        Some((index, item))
    }

    /// Puts `item` in the place of `id`, returning the displaced item.
    pub(crate) fn replace(&mut self, id: ItemId, item: Item) -> Option<Item> {
        let index = self.index_of(id)?;
        Some(std::mem::replace(&mut self.items[index], item))
    }
}
