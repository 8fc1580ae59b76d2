//! Error types for the core library.

use thiserror::Error;

use crate::item::ItemId;

/// Errors that can occur in core operations.
///
/// Steady-state transitions never fail: stale indices and repeated returns
/// degrade to no-ops. Only construction and registry misuse surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The roster declared no categories.
    #[error("At least one category is required")]
    NoCategories,

    /// A timer was armed for an item that already has one outstanding.
    #[error("Timer already armed for item {0}")]
    AlreadyArmed(ItemId),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
