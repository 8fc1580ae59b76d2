//! # sorter-catalog
//!
//! Record sources that seed a [`sorter_core::Sorter`].
//!
//! This crate provides:
//! - **Produce catalog** - a bundled static list with fixed categories
//! - **User directory** - an HTTP client whose departments become categories
//! - **Load state** - loading, ready or failed, never partially loaded

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod load;
pub mod produce;
pub mod users;

pub use error::{Error, Result};
pub use load::{LoadState, load_produce, load_users};
pub use users::{ApiUser, Company, UsersClient};
