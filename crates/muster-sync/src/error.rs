//! Error types for `muster-sync`.

use thiserror::Error;

/// Failure to retrieve the raw tabular payload.
#[derive(Debug, Error)]
pub enum FetchError {
  /// Transport-level failure, including the 15 s request timeout.
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("unexpected HTTP status: {0}")]
  Status(u16),
}

/// Failure to decode the payload into sheet rows.
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),
}

/// A sync run that did not complete. The previously held contact set is
/// preserved on every variant.
#[derive(Debug, Error)]
pub enum SyncError {
  /// Rejected before any network attempt.
  #[error("offline; sync not attempted")]
  Offline,

  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error(transparent)]
  Decode(#[from] DecodeError),
}
