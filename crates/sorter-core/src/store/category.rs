//! Category buckets.

use serde::Serialize;
use tracing::warn;

use crate::item::{CategoryId, Item, ItemId};

/// Items held in one category, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// Category this bucket belongs to.
    pub category: CategoryId,
    /// Held items, oldest arrival first.
    pub items: Vec<Item>,
}

impl Bucket {
    fn new(category: CategoryId) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }
}

/// Per-category buckets of items that are away from home.
///
/// Buckets keep the order in which their categories were declared.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    buckets: Vec<Bucket>,
}

impl CategoryStore {
    /// Creates a store with one empty bucket per category.
    ///
    /// Duplicate categories are collapsed into one bucket.
    #[must_use]
    pub fn new(categories: impl IntoIterator<Item = CategoryId>) -> Self {
        let mut store = Self::default();
        for category in categories {
            store.ensure(category);
        }
        store
    }

    /// Appends an item to the end of a category's bucket.
    ///
    /// An unknown category gets a new, empty bucket first.
    pub fn append(&mut self, category: &CategoryId, item: Item) {
        let index = match self.index_of(category) {
            Some(index) => index,
            None => {
                warn!("Unknown category {category}, creating a bucket for it");
                self.ensure(category.clone())
            }
        };
        if let Some(bucket) = self.buckets.get_mut(index) {
            bucket.items.push(item);
        }
    }

    /// Removes an item from a category's bucket.
    ///
    /// Returns the removed item, or `None` if it was not there.
    pub fn remove(&mut self, category: &CategoryId, id: ItemId) -> Option<Item> {
        let bucket = self.bucket_mut(category)?;
        let position = bucket.items.iter().position(|item| item.id == id)?;
        Some(bucket.items.remove(position))
    }

    /// Number of items held in a category. Unknown categories hold none.
    #[must_use]
    pub fn size_of(&self, category: &CategoryId) -> usize {
        self.bucket(category).map_or(0, |bucket| bucket.items.len())
    }

    /// Returns the bucket for a category.
    #[must_use]
    pub fn bucket(&self, category: &CategoryId) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| &bucket.category == category)
    }

    /// All buckets, in category order.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Category ids, in order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryId> {
        self.buckets.iter().map(|bucket| &bucket.category)
    }

    /// Total number of items away from home.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.items.len()).sum()
    }

    /// Empties every bucket, keeping the categories.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.items.clear();
        }
    }

    /// Replaces the category set with empty buckets.
    pub fn reset_categories(&mut self, categories: impl IntoIterator<Item = CategoryId>) {
        self.buckets.clear();
        for category in categories {
            self.ensure(category);
        }
    }

    fn index_of(&self, category: &CategoryId) -> Option<usize> {
        self.buckets
            .iter()
            .position(|bucket| &bucket.category == category)
    }

    fn bucket_mut(&mut self, category: &CategoryId) -> Option<&mut Bucket> {
        self.buckets
            .iter_mut()
            .find(|bucket| &bucket.category == category)
    }

    /// Returns the index of the category's bucket, adding one if missing.
    fn ensure(&mut self, category: CategoryId) -> usize {
        if let Some(index) = self.index_of(&category) {
            return index;
        }
        self.buckets.push(Bucket::new(category));
        self.buckets.len() - 1
    }
}
