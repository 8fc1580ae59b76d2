//! The sorter: moves items between home and their category buckets.
//!
//! ## State Transitions
//!
//! ```text
//! Home --move_to_category--> Away(category) --(timer | return_now)--> Home
//! ```
//!
//! Every item starts at home and cycles between the two states for the
//! life of the sorter. A move arms one return timer; every path back home
//! disarms it first, so an item has a timer exactly while it is away.
//!
//! All operations run to completion without yielding. Callers pass
//! indices and ids captured earlier, so a stale reference is expected and
//! turns the operation into a no-op rather than an error.

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::SorterConfig;
use crate::error::{Error, Result};
use crate::item::{CategoryId, Item, ItemId, Location, Roster};
use crate::snapshot::SorterSnapshot;
use crate::store::{CategoryStore, ItemStore};
use crate::timer::TimerRegistry;

/// What triggered a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOrigin {
    /// The item's timer fired.
    Auto,
    /// The caller asked for it.
    Manual,
}

/// Result of [`Sorter::move_to_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item moved and will return at `returns_at`.
    Moved {
        /// Category the item now sits in.
        category: CategoryId,
        /// When the item comes back on its own.
        returns_at: Instant,
    },
    /// The index no longer pointed at the item. Nothing changed.
    Stale,
}

/// Result of [`Sorter::return_now`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// The item came back from `category`.
    Returned {
        /// Category the item left.
        category: CategoryId,
    },
    /// The item was already home (or unknown). Nothing changed.
    AlreadyHome,
}

/// Orchestrates the home list, the category buckets and the return timers.
#[derive(Debug)]
pub struct Sorter {
    config: SorterConfig,
    roster: Roster,
    home: ItemStore,
    categories: CategoryStore,
    timers: TimerRegistry,
    next_id: u64,
    snapshots: watch::Sender<SorterSnapshot>,
}

impl Sorter {
    /// Creates a sorter with every record at home.
    ///
    /// Records whose category is not declared by the roster are routed to
    /// the configured fallback category. An empty roster gives an empty
    /// sorter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCategories`] if the roster has records but declares
    /// no category, or [`Error::Config`] if the configuration is invalid.
    pub fn new(roster: Roster, config: SorterConfig) -> Result<Self> {
        config.validate()?;
        if roster.categories.is_empty() && !roster.records.is_empty() {
            return Err(Error::NoCategories);
        }

        let (snapshots, _) = watch::channel(SorterSnapshot::default());
        let mut sorter = Self {
            config,
            roster,
            home: ItemStore::new(),
            categories: CategoryStore::default(),
            timers: TimerRegistry::new(),
            next_id: 0,
            snapshots,
        };
        sorter.populate();
        sorter.publish();

        info!(
            "Sorter ready: {} items across {} categories",
            sorter.home.len(),
            sorter.categories.buckets().len()
        );
        Ok(sorter)
    }

    /// Moves the item at `home_index` into its category and schedules its
    /// return.
    ///
    /// `id` is the item the caller saw at that index. If the home list has
    /// changed since and the index now holds something else (or nothing),
    /// the call does nothing and returns [`MoveOutcome::Stale`].
    pub fn move_to_category(&mut self, id: ItemId, home_index: usize) -> MoveOutcome {
        if self.home.get(home_index).map(|item| item.id) != Some(id) {
            debug!("Stale move for item {id} at index {home_index}");
            return MoveOutcome::Stale;
        }
        let Some(item) = self.home.remove_at(home_index) else {
            return MoveOutcome::Stale;
        };

        let category = item.category.clone();
        self.categories.append(&category, item);

        let now = Instant::now();
        let returns_at = self
            .timers
            .arm(id, self.config.return_delay, now)
            .unwrap_or_else(|err| {
                // Home items never hold a timer; keep the one that is there.
                warn!("{err}");
                self.timers.deadline_of(id).unwrap_or(now)
            });

        debug!("Moved item {id} to {category}");
        self.publish();
        MoveOutcome::Moved {
            category,
            returns_at,
        }
    }

    /// Brings an item home right away and cancels its timer.
    ///
    /// Safe to call for an item that is already home.
    pub fn return_now(&mut self, id: ItemId) -> ReturnOutcome {
        self.return_item(id, ReturnOrigin::Manual)
    }

    /// Fires every timer whose deadline has passed, earliest first.
    ///
    /// Returns the items that came home.
    pub fn apply_due_returns(&mut self) -> Vec<ItemId> {
        let mut returned = Vec::new();
        for id in self.timers.due(Instant::now()) {
            if let ReturnOutcome::Returned { .. } = self.return_item(id, ReturnOrigin::Auto) {
                returned.push(id);
            }
        }
        returned
    }

    /// Waits for the next timer and fires whatever is due by then.
    ///
    /// Returns immediately with an empty list if no timer is armed.
    /// Cancel-safe: nothing changes until the wait completes, so the future
    /// can be dropped in a `select!`.
    pub async fn next_auto_returns(&mut self) -> Vec<ItemId> {
        while let Some(deadline) = self.timers.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            let returned = self.apply_due_returns();
            if !returned.is_empty() {
                return returned;
            }
        }
        Vec::new()
    }

    /// Cancels every timer and rebuilds the sorter from its roster.
    ///
    /// Every item gets a fresh id; ids handed out before the reset no
    /// longer match anything.
    pub fn reset(&mut self) {
        let canceled = self.timers.disarm_all();
        self.categories.clear();
        self.populate();
        self.publish();
        info!("Sorter reset, {canceled} pending returns canceled");
    }

    /// Cancels every outstanding timer. Called on drop as well.
    pub fn shutdown(&mut self) -> usize {
        let canceled = self.timers.disarm_all();
        if canceled > 0 {
            debug!("Sorter shut down, {canceled} pending returns canceled");
            self.publish();
        }
        canceled
    }

    /// Items at home, in original order.
    #[must_use]
    pub fn home(&self) -> &[Item] {
        self.home.items()
    }

    /// Items held in a category, in arrival order.
    #[must_use]
    pub fn bucket(&self, category: &CategoryId) -> &[Item] {
        self.categories
            .bucket(category)
            .map(|bucket| bucket.items.as_slice())
            .unwrap_or_default()
    }

    /// Number of items held in a category.
    #[must_use]
    pub fn bucket_len(&self, category: &CategoryId) -> usize {
        self.categories.size_of(category)
    }

    /// Categories, in display order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryId> {
        self.categories.categories().cloned().collect()
    }

    /// Where an item is, or `None` for an unknown id.
    #[must_use]
    pub fn location_of(&self, id: ItemId) -> Option<Location> {
        if self.home.contains(id) {
            return Some(Location::Home);
        }
        self.away_category(id).map(Location::Away)
    }

    /// Returns true if the item has a scheduled return.
    #[must_use]
    pub fn is_armed(&self, id: ItemId) -> bool {
        self.timers.is_armed(id)
    }

    /// Earliest scheduled return.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Number of scheduled returns.
    #[must_use]
    pub fn pending_returns(&self) -> usize {
        self.timers.len()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SorterConfig {
        &self.config
    }

    /// An owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SorterSnapshot {
        SorterSnapshot {
            home: self.home.items().to_vec(),
            buckets: self.categories.buckets().to_vec(),
            pending_returns: self.timers.len(),
        }
    }

    /// Subscribes to state changes.
    ///
    /// The receiver starts with the current snapshot and sees a new one
    /// after every operation that changed something.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SorterSnapshot> {
        self.snapshots.subscribe()
    }

    fn return_item(&mut self, id: ItemId, origin: ReturnOrigin) -> ReturnOutcome {
        self.timers.disarm(id);

        let Some(category) = self.away_category(id) else {
            return ReturnOutcome::AlreadyHome;
        };
        let Some(item) = self.categories.remove(&category, id) else {
            return ReturnOutcome::AlreadyHome;
        };
        self.home.insert_preserving_order(item);

        debug!("Returned item {id} from {category} ({origin:?})");
        self.publish();
        ReturnOutcome::Returned { category }
    }

    fn away_category(&self, id: ItemId) -> Option<CategoryId> {
        self.categories
            .buckets()
            .iter()
            .find(|bucket| bucket.items.iter().any(|item| item.id == id))
            .map(|bucket| bucket.category.clone())
    }

    /// Builds fresh items from the roster and puts them all at home.
    fn populate(&mut self) {
        let mut categories = self.roster.categories.clone();
        let fallback = &self.config.fallback_category;
        let mut items = Vec::with_capacity(self.roster.records.len());

        for (rank, record) in self.roster.records.iter().enumerate() {
            let category = if self.roster.declares(&record.category) {
                record.category.clone()
            } else {
                warn!(
                    "Record {} has undeclared category {}, using {fallback}",
                    record.key, record.category
                );
                if !categories.contains(fallback) {
                    categories.push(fallback.clone());
                }
                fallback.clone()
            };

            items.push(Item {
                id: ItemId(self.next_id),
                key: record.key.clone(),
                category,
                display_name: record.display_name.clone(),
                detail: record.detail.clone(),
                original_rank: rank,
            });
            self.next_id = self.next_id.wrapping_add(1);
        }

        self.home = ItemStore::from_items(items);
        self.categories.reset_categories(categories);
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

impl Drop for Sorter {
    fn drop(&mut self) {
        self.timers.disarm_all();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::item::Record;

    fn roster() -> Roster {
        Roster::new(
            vec!["Fruit".into(), "Vegetable".into()],
            vec![
                Record::new("Apple-0", "Fruit", "Apple"),
                Record::new("Broccoli-1", "Vegetable", "Broccoli"),
                Record::new("Mango-2", "Fruit", "Mango"),
                Record::new("Carrot-3", "Vegetable", "Carrot"),
            ],
        )
    }

    fn sorter() -> Sorter {
        Sorter::new(roster(), SorterConfig::default()).unwrap()
    }

    fn home_keys(sorter: &Sorter) -> Vec<&str> {
        sorter.home().iter().map(|item| item.key.as_str()).collect()
    }

    #[test]
    fn test_new_requires_a_category() {
        let roster = Roster::new(Vec::new(), vec![Record::new("a", "Fruit", "A")]);
        assert_eq!(
            Sorter::new(roster, SorterConfig::default()).unwrap_err(),
            Error::NoCategories
        );
    }

    #[test]
    fn test_empty_roster_is_empty_sorter() {
        let sorter = Sorter::new(Roster::default(), SorterConfig::default()).unwrap();
        assert!(sorter.home().is_empty());
        assert!(sorter.categories().is_empty());
        assert_eq!(sorter.snapshot().counts(), Vec::new());
    }

    #[test]
    fn test_new_puts_everything_home() {
        let sorter = sorter();
        assert_eq!(home_keys(&sorter), vec!["Apple-0", "Broccoli-1", "Mango-2", "Carrot-3"]);
        assert_eq!(sorter.bucket_len(&"Fruit".into()), 0);
        assert_eq!(sorter.pending_returns(), 0);
    }

    #[test]
    fn test_undeclared_category_goes_to_fallback() {
        let mut roster = roster();
        roster.records.push(Record::new("Almond-4", "Nut", "Almond"));
        let mut sorter = Sorter::new(roster, SorterConfig::default()).unwrap();

        assert_eq!(
            sorter.categories(),
            vec![CategoryId::new("Fruit"), "Vegetable".into(), "Unknown".into()]
        );
        let almond = sorter.home()[4].id;
        assert!(matches!(
            sorter.move_to_category(almond, 4),
            MoveOutcome::Moved { category, .. } if category.as_str() == "Unknown"
        ));
    }

    #[tokio::test]
    async fn test_stale_index_is_noop() {
        let mut sorter = sorter();
        let apple = sorter.home()[0].id;

        assert_eq!(sorter.move_to_category(apple, 1), MoveOutcome::Stale);
        assert_eq!(sorter.move_to_category(apple, 99), MoveOutcome::Stale);
        assert_eq!(sorter.home().len(), 4);
        assert!(!sorter.is_armed(apple));
    }

    #[tokio::test]
    async fn test_move_and_return_now() {
        let mut sorter = sorter();
        let mango = sorter.home()[2].id;

        assert!(matches!(
            sorter.move_to_category(mango, 2),
            MoveOutcome::Moved { .. }
        ));
        assert_eq!(sorter.location_of(mango), Some(Location::Away("Fruit".into())));
        assert!(sorter.is_armed(mango));

        assert_eq!(
            sorter.return_now(mango),
            ReturnOutcome::Returned {
                category: "Fruit".into()
            }
        );
        assert_eq!(sorter.return_now(mango), ReturnOutcome::AlreadyHome);
        assert_eq!(home_keys(&sorter), vec!["Apple-0", "Broccoli-1", "Mango-2", "Carrot-3"]);
        assert!(!sorter.is_armed(mango));
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_return_after_delay() {
        let mut sorter = sorter();
        let apple = sorter.home()[0].id;
        sorter.move_to_category(apple, 0);

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert!(sorter.apply_due_returns().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(sorter.apply_due_returns(), vec![apple]);
        assert_eq!(sorter.location_of(apple), Some(Location::Home));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_auto_returns_waits_for_deadline() {
        let mut sorter = sorter();
        let start = Instant::now();
        let broccoli = sorter.home()[1].id;
        sorter.move_to_category(broccoli, 1);

        assert_eq!(sorter.next_auto_returns().await, vec![broccoli]);
        assert_eq!(Instant::now() - start, Duration::from_millis(5000));
        assert!(sorter.next_auto_returns().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_assigns_fresh_ids() {
        let mut sorter = sorter();
        let apple = sorter.home()[0].id;
        sorter.move_to_category(apple, 0);

        sorter.reset();

        assert_eq!(sorter.pending_returns(), 0);
        assert_eq!(sorter.home().len(), 4);
        assert_eq!(sorter.location_of(apple), None);
        assert_eq!(sorter.return_now(apple), ReturnOutcome::AlreadyHome);
    }

    #[tokio::test]
    async fn test_subscribers_see_moves() {
        let mut sorter = sorter();
        let mut updates = sorter.subscribe();
        assert_eq!(updates.borrow_and_update().home_len(), 4);

        let apple = sorter.home()[0].id;
        sorter.move_to_category(apple, 0);

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.home_len(), 3);
        assert_eq!(snapshot.bucket_len(&"Fruit".into()), 1);
        assert_eq!(snapshot.pending_returns, 1);
    }

    #[tokio::test]
    async fn test_subscribers_skip_noops() {
        let mut sorter = sorter();
        let mut updates = sorter.subscribe();
        updates.borrow_and_update();

        let apple = sorter.home()[0].id;
        assert_eq!(sorter.move_to_category(apple, 1), MoveOutcome::Stale);
        assert_eq!(sorter.return_now(apple), ReturnOutcome::AlreadyHome);
        assert!(sorter.apply_due_returns().is_empty());
        assert_eq!(sorter.shutdown(), 0);

        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_subscribers_see_manual_return() {
        let mut sorter = sorter();
        let mut updates = sorter.subscribe();
        let apple = sorter.home()[0].id;
        sorter.move_to_category(apple, 0);
        updates.borrow_and_update();

        sorter.return_now(apple);

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.home_len(), 4);
        assert_eq!(snapshot.bucket_len(&"Fruit".into()), 0);
        assert_eq!(snapshot.pending_returns, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_auto_return() {
        let mut sorter = sorter();
        let mut updates = sorter.subscribe();
        let carrot = sorter.home()[3].id;
        sorter.move_to_category(carrot, 3);
        updates.borrow_and_update();

        tokio::time::advance(Duration::from_millis(5000)).await;
        assert_eq!(sorter.apply_due_returns(), vec![carrot]);

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.home_len(), 4);
        assert_eq!(snapshot.bucket_len(&"Vegetable".into()), 0);
        assert_eq!(snapshot.pending_returns, 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_reset() {
        let mut sorter = sorter();
        let mut updates = sorter.subscribe();
        let apple = sorter.home()[0].id;
        sorter.move_to_category(apple, 0);
        updates.borrow_and_update();

        sorter.reset();

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.home_len(), 4);
        assert_eq!(snapshot.pending_returns, 0);
        assert!(snapshot.home.iter().all(|item| item.id != apple));
    }

    #[tokio::test]
    async fn test_subscribers_see_shutdown() {
        let mut sorter = sorter();
        let mut updates = sorter.subscribe();
        let mango = sorter.home()[2].id;
        sorter.move_to_category(mango, 2);
        updates.borrow_and_update();

        assert_eq!(sorter.shutdown(), 1);

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert_eq!(snapshot.pending_returns, 0);
        assert_eq!(snapshot.bucket_len(&"Fruit".into()), 1);
    }
}
