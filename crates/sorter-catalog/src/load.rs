//! Initialization state of a sorter seeded from a record source.

use sorter_core::{Roster, Sorter, SorterConfig};
use tracing::{info, warn};

use crate::error::Result;
use crate::produce;
use crate::users::UsersClient;

/// Where loading stands.
///
/// A failed load never yields a partly filled sorter: `Failed` carries the
/// message and nothing else.
#[derive(Debug, Default)]
pub enum LoadState {
    /// Records are still being fetched.
    #[default]
    Loading,
    /// The sorter is ready.
    Ready(Sorter),
    /// Loading failed.
    Failed {
        /// Human-readable reason.
        message: String,
    },
}

impl LoadState {
    /// Builds the final state from a fetched roster.
    #[must_use]
    pub fn from_result(result: Result<Roster>, config: SorterConfig) -> Self {
        match result.and_then(|roster| Ok(Sorter::new(roster, config)?)) {
            Ok(sorter) => Self::Ready(sorter),
            Err(err) => {
                warn!("Failed to load records: {err}");
                Self::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Returns true while loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The sorter, once ready.
    #[must_use]
    pub const fn sorter(&self) -> Option<&Sorter> {
        match self {
            Self::Ready(sorter) => Some(sorter),
            _ => None,
        }
    }

    /// Mutable access to the sorter, once ready.
    pub const fn sorter_mut(&mut self) -> Option<&mut Sorter> {
        match self {
            Self::Ready(sorter) => Some(sorter),
            _ => None,
        }
    }

    /// Consumes the state, returning the sorter if ready.
    #[must_use]
    pub fn into_sorter(self) -> Option<Sorter> {
        match self {
            Self::Ready(sorter) => Some(sorter),
            _ => None,
        }
    }

    /// The failure message, if loading failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Number of items at home; zero unless ready.
    #[must_use]
    pub fn home_len(&self) -> usize {
        self.sorter().map_or(0, |sorter| sorter.home().len())
    }

    /// Number of categories; zero unless ready.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.sorter().map_or(0, |sorter| sorter.categories().len())
    }
}

/// Seeds a sorter from the bundled produce catalog.
#[must_use]
pub fn load_produce(config: SorterConfig) -> LoadState {
    let state = LoadState::from_result(produce::roster(), config);
    if let LoadState::Ready(sorter) = &state {
        info!("Loaded {} produce items", sorter.home().len());
    }
    state
}

/// Seeds a sorter from the remote user directory.
pub async fn load_users(client: &UsersClient, config: SorterConfig) -> LoadState {
    let state = LoadState::from_result(client.fetch_roster().await, config);
    if let LoadState::Ready(sorter) = &state {
        info!(
            "Loaded {} users across {} departments",
            sorter.home().len(),
            sorter.categories().len()
        );
    }
    state
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sorter_core::Record;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_failed_state_exposes_nothing() {
        let state = LoadState::from_result(Err(Error::Status(503)), SorterConfig::default());
        assert_eq!(state.error(), Some("HTTP 503"));
        assert_eq!(state.home_len(), 0);
        assert_eq!(state.category_count(), 0);
        assert!(state.sorter().is_none());
    }

    #[test]
    fn test_empty_directory_is_ready() {
        let state = LoadState::from_result(Ok(Roster::default()), SorterConfig::default());
        assert!(state.error().is_none());
        assert!(state.sorter().is_some());
        assert_eq!(state.home_len(), 0);
        assert_eq!(state.category_count(), 0);
    }

    #[test]
    fn test_records_without_categories_fail() {
        let roster = Roster::new(Vec::new(), vec![Record::new("1", "Sales", "Ann Lee")]);
        let state = LoadState::from_result(Ok(roster), SorterConfig::default());
        assert_eq!(
            state.error(),
            Some("Sorter error: At least one category is required")
        );
    }

    #[test]
    fn test_default_is_loading() {
        let state = LoadState::default();
        assert!(state.is_loading());
        assert_eq!(state.home_len(), 0);
    }

    #[test]
    fn test_load_produce() {
        let state = load_produce(SorterConfig::default());
        let sorter = state.sorter().unwrap();
        assert_eq!(sorter.home().len(), 11);
        assert_eq!(state.category_count(), 2);
    }
}
