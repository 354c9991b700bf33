//! Remote fetch, tabular decoding, and the sync state machine.
//!
//! The pipeline is fetch → decode → extract → cache write-through, driven
//! by [`Syncer`]. Network access sits behind the [`FetchSource`] seam so
//! the state machine is testable without a server.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod decode;
pub mod error;
pub mod fetch;
pub mod orchestrator;

pub use error::{DecodeError, FetchError, SyncError};
pub use fetch::{FetchSource, HttpFetcher};
pub use orchestrator::{Outcome, SyncConfig, Syncer};
