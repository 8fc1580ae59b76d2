//! Containers that hold items at home and away.
//!
//! Membership in these stores is the only record of an item's location:
//! an item sits in the [`ItemStore`] or in its category's bucket of the
//! [`CategoryStore`], never both.

mod category;
mod home;

pub use category::{Bucket, CategoryStore};
pub use home::ItemStore;
