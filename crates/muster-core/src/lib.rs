//! Core types and pure transforms for the Muster team directory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod category;
pub mod contact;
pub mod error;
pub mod extract;
pub mod links;
pub mod normalize;
pub mod process;
pub mod query;
pub mod snapshot;

pub use contact::Contact;
pub use error::{Error, Result};
pub use snapshot::SyncSnapshot;
