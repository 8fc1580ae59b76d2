//! Sorter configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::CategoryId;

/// Default delay before an away item returns home.
pub const DEFAULT_RETURN_DELAY: Duration = Duration::from_millis(5000);

/// Default category for records whose category was not declared.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Unknown";

/// Tunables for a [`Sorter`](crate::Sorter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    /// How long an item stays away before it returns on its own.
    #[serde(rename = "return_delay_ms", with = "duration_ms")]
    pub return_delay: Duration,
    /// Category that receives records with an undeclared category.
    pub fallback_category: CategoryId,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            return_delay: DEFAULT_RETURN_DELAY,
            fallback_category: CategoryId::new(DEFAULT_FALLBACK_CATEGORY),
        }
    }
}

impl SorterConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the return delay.
    #[must_use]
    pub const fn with_return_delay(mut self, delay: Duration) -> Self {
        self.return_delay = delay;
        self
    }

    /// Sets the fallback category.
    #[must_use]
    pub fn with_fallback_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.fallback_category = category.into();
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback category name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.fallback_category.as_str().trim().is_empty() {
            return Err(Error::Config(
                "fallback category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Serde helpers for storing a `Duration` as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde with= signature
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
