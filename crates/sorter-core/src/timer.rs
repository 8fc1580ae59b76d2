//! Scheduled returns.
//!
//! Each away item has at most one armed timer. A timer is a deadline on the
//! Tokio clock rather than a spawned task, so disarming it is a plain map
//! removal and there is never a detached callback left to race against.
//! Under a paused test runtime the deadlines follow virtual time.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::item::ItemId;

/// An armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    /// When the timer fires.
    pub deadline: Instant,
    /// Arming sequence number, used to break deadline ties.
    seq: u64,
}

/// One outstanding return timer per item.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: HashMap<ItemId, ArmedTimer>,
    next_seq: u64,
}

impl TimerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer for `id` that fires `delay` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyArmed`] if the item already has a timer. The
    /// existing timer is left as it was.
    pub fn arm(&mut self, id: ItemId, delay: Duration, now: Instant) -> Result<Instant> {
        if self.timers.contains_key(&id) {
            return Err(Error::AlreadyArmed(id));
        }
        let deadline = now + delay;
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.timers.insert(id, ArmedTimer { deadline, seq });
        Ok(deadline)
    }

    /// Cancels the item's timer. Returns the timer if one was armed.
    pub fn disarm(&mut self, id: ItemId) -> Option<ArmedTimer> {
        self.timers.remove(&id)
    }

    /// Cancels every timer and returns how many were armed.
    pub fn disarm_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Returns the ids whose deadline is at or before `now`, earliest
    /// first. The timers stay armed; firing them is the caller's job.
    #[must_use]
    pub fn due(&self, now: Instant) -> Vec<ItemId> {
        let mut due: Vec<_> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (timer.deadline, timer.seq, *id))
            .collect();
        due.sort_unstable();
        due.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Earliest armed deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Deadline of the item's timer, if armed.
    #[must_use]
    pub fn deadline_of(&self, id: ItemId) -> Option<Instant> {
        self.timers.get(&id).map(|timer| timer.deadline)
    }

    /// Returns true if the item has a timer.
    #[must_use]
    pub fn is_armed(&self, id: ItemId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if no timer is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
