//! Read-only projections handed to the presentation layer.

use serde::Serialize;

use crate::item::{CategoryId, Item};
use crate::store::Bucket;

/// An owned copy of a sorter's state at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SorterSnapshot {
    /// Items at home, in original order.
    pub home: Vec<Item>,
    /// Category buckets, in category order.
    pub buckets: Vec<Bucket>,
    /// Number of scheduled returns outstanding.
    pub pending_returns: usize,
}

impl SorterSnapshot {
    /// Number of items at home.
    #[must_use]
    pub fn home_len(&self) -> usize {
        self.home.len()
    }

    /// Number of items held in a category.
    #[must_use]
    pub fn bucket_len(&self, category: &CategoryId) -> usize {
        self.buckets
            .iter()
            .find(|bucket| &bucket.category == category)
            .map_or(0, |bucket| bucket.items.len())
    }

    /// Category headers with their counts, e.g. `("Fruit", 2)`.
    #[must_use]
    pub fn counts(&self) -> Vec<(CategoryId, usize)> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.category.clone(), bucket.items.len()))
            .collect()
    }
}
