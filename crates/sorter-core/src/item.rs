//! Item model types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an item.
///
/// Allocated by the owning [`Sorter`](crate::Sorter) and never reused, not
/// even across a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Name of a holding category (e.g. "Fruit" or "Engineering").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a new category ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the category name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CategoryId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A sortable item.
///
/// Every field is fixed at creation. Where the item currently lives is not
/// stored here; it follows from which store holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier assigned by the sorter.
    pub id: ItemId,
    /// Key supplied by the record source.
    pub key: String,
    /// The one category this item can be moved to.
    pub category: CategoryId,
    /// Name for display.
    pub display_name: String,
    /// Secondary label for display (type, department, ...).
    pub detail: Option<String>,
    /// Position in the initial home ordering.
    pub original_rank: usize,
}

/// A raw record after it has been mapped to its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Key supplied by the record source.
    pub key: String,
    /// Category the record belongs to.
    pub category: CategoryId,
    /// Name for display.
    pub display_name: String,
    /// Secondary label for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Record {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        category: impl Into<CategoryId>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            category: category.into(),
            display_name: display_name.into(),
            detail: None,
        }
    }

    /// Sets the secondary label.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Everything a record source hands to a sorter: the declared categories
/// and the records in their home order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Declared categories, in display order.
    pub categories: Vec<CategoryId>,
    /// Records, in their original home order.
    pub records: Vec<Record>,
}

impl Roster {
    /// Creates a new roster.
    #[must_use]
    pub const fn new(categories: Vec<CategoryId>, records: Vec<Record>) -> Self {
        Self {
            categories,
            records,
        }
    }

    /// Returns true if the category is declared.
    #[must_use]
    pub fn declares(&self, category: &CategoryId) -> bool {
        self.categories.contains(category)
    }
}

/// Where an item currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// In the home list.
    Home,
    /// Held in a category bucket.
    Away(CategoryId),
}
