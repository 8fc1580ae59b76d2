//! The home list.

use crate::item::{Item, ItemId};

/// Items currently at home, kept sorted by original rank.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a store from items given in home order.
    ///
    /// The items are sorted by original rank, so callers may pass them in
    /// any order.
    #[must_use]
    pub fn from_items(mut items: Vec<Item>) -> Self {
        items.sort_by_key(|item| item.original_rank);
        Self { items }
    }

    /// Removes and returns the item at `index`.
    ///
    /// Returns `None` if the index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Inserts an item at the position its original rank dictates.
    ///
    /// Returns false (and leaves the store untouched) if an item with the
    /// same id is already present.
    pub fn insert_preserving_order(&mut self, item: Item) -> bool {
        if self.contains(item.id) {
            return false;
        }
        let position = self
            .items
            .partition_point(|existing| existing.original_rank <= item.original_rank);
        self.items.insert(position, item);
        true
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Returns the current index of an item.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Returns true if the item is at home.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Items in home order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items at home.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if every item is away.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
