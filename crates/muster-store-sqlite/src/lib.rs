//! SQLite backend for the Muster cache.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. The store holds one snapshot
//! slot, the auth flag, and a bounded action log — nothing else.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{ActionEntry, ActionKind, CacheStore};

#[cfg(test)]
mod tests;
