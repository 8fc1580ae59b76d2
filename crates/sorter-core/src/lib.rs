//! # sorter-core
//!
//! Core state machine for sorting items into timed holding categories.
//!
//! Items start in a home list. Moving one sends it to its category bucket
//! and schedules its return; it comes back on its own after a fixed delay,
//! or earlier when asked. Returned items slot back into their original
//! position in the home list.
//!
//! This crate provides:
//! - **Item model** - ids, categories, records and rosters
//! - **Stores** - the ordered home list and the per-category buckets
//! - **Timer registry** - at most one cancelable scheduled return per item
//! - **Sorter** - the orchestrator that keeps all three consistent
//! - **Snapshots** - owned projections and a change subscription

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod item;
mod snapshot;
mod sorter;
pub mod store;
pub mod timer;

pub use config::{DEFAULT_FALLBACK_CATEGORY, DEFAULT_RETURN_DELAY, SorterConfig};
pub use error::{Error, Result};
pub use item::{CategoryId, Item, ItemId, Location, Record, Roster};
pub use snapshot::SorterSnapshot;
pub use sorter::{MoveOutcome, ReturnOrigin, ReturnOutcome, Sorter};
pub use store::{Bucket, CategoryStore, ItemStore};
pub use timer::{ArmedTimer, TimerRegistry};
