//! The synced contact set plus its sync timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contact::Contact;

/// The full contact set as produced by one sync run.
///
/// Snapshots are whole-replaced, never merged: a successful sync swaps the
/// entire set. At rest a snapshot is owned by the cache store; in memory,
/// by the sync orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSnapshot {
  pub contacts:  Vec<Contact>,
  pub last_sync: Option<DateTime<Utc>>,
}

impl SyncSnapshot {
  pub fn new(contacts: Vec<Contact>, last_sync: DateTime<Utc>) -> Self {
    Self {
      contacts,
      last_sync: Some(last_sync),
    }
  }

  /// Cap the snapshot at `max` contacts. Excess rows are dropped from the
  /// tail, not rejected.
  pub fn truncate(&mut self, max: usize) {
    self.contacts.truncate(max);
  }

  /// Whether the snapshot is due for a re-sync: never synced, or `last_sync`
  /// older than `interval`. Distinct from cache-duration expiry, which is
  /// keyed on the cache *write* time and decided by the store.
  pub fn is_stale(&self, interval: chrono::Duration, now: DateTime<Utc>) -> bool {
    match self.last_sync {
      Some(last) => now - last > interval,
      None => true,
    }
  }

  pub fn len(&self) -> usize {
    self.contacts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.contacts.is_empty()
  }
}
