//! SQLite backend for the food donation dashboard.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use encode::TIMESTAMP_FORMAT;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
