//! SQLite backend for the Casefile record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Value domains, foreign keys, cascades
//! and `updated_at` maintenance live in the schema; the access policy is
//! checked inside the same transaction as the statement it guards.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
