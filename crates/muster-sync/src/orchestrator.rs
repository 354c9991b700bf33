//! [`Syncer`] — the sync state machine.
//!
//! One logical thread of control: the state mutex is held only for flag and
//! set updates, never across network or storage awaits. Concurrent sync
//! attempts are serialised by a boolean latch — a second request while one
//! is in flight is dropped, not queued.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use muster_core::{Contact, SyncSnapshot, process::process_rows};
use muster_store_sqlite::CacheStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
  decode::decode_rows,
  error::SyncError,
  fetch::FetchSource,
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Sync tunables. Note that `sync_interval` (staleness / periodic re-sync)
/// and `cache_duration` (cache-slot expiry) are independent thresholds.
#[derive(Debug, Clone)]
pub struct SyncConfig {
  /// Periodic re-sync cadence and the staleness threshold.
  pub sync_interval:  Duration,
  /// Age past which a cached snapshot is not loaded at startup.
  pub cache_duration: Duration,
  /// Capacity bound on the contact set; excess rows are truncated.
  pub max_contacts:   usize,
  /// Pause between coming online and the follow-up sync.
  pub settle_delay:   Duration,
}

impl Default for SyncConfig {
  fn default() -> Self {
    Self {
      sync_interval:  Duration::from_secs(300),
      cache_duration: Duration::from_secs(3600),
      max_contacts:   1000,
      settle_delay:   Duration::from_secs(2),
    }
  }
}

fn chrono_dur(d: Duration) -> chrono::Duration {
  chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// How a sync (or bootstrap) request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// The contact set was replaced with this many contacts.
  Synced(usize),
  /// The source decoded to zero contacts; the previous set is untouched.
  NoNewData,
  /// Another sync was already in flight; this request was dropped.
  InFlight,
  /// Bootstrap adopted a fresh cached snapshot without touching the network.
  FromCache(usize),
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct SyncState {
  contacts:  Vec<Contact>,
  last_sync: Option<DateTime<Utc>>,
  /// The at-most-one-sync latch.
  syncing:   bool,
  online:    bool,
}

impl Default for SyncState {
  fn default() -> Self {
    Self {
      contacts:  Vec::new(),
      last_sync: None,
      syncing:   false,
      online:    true,
    }
  }
}

// ─── Syncer ──────────────────────────────────────────────────────────────────

/// Coordinates fetch → decode → extract → cache write-through, owning the
/// in-memory contact set.
///
/// Cheap to clone; clones share the same state and latch.
#[derive(Clone)]
pub struct Syncer<F> {
  fetcher: F,
  store:   CacheStore,
  config:  SyncConfig,
  state:   Arc<Mutex<SyncState>>,
}

impl<F: FetchSource> Syncer<F> {
  pub fn new(fetcher: F, store: CacheStore, config: SyncConfig) -> Self {
    Self {
      fetcher,
      store,
      config,
      state: Arc::new(Mutex::new(SyncState::default())),
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  /// The currently resident contact set.
  pub async fn contacts(&self) -> Vec<Contact> {
    self.state.lock().await.contacts.clone()
  }

  pub async fn last_sync(&self) -> Option<DateTime<Utc>> {
    self.state.lock().await.last_sync
  }

  pub async fn is_online(&self) -> bool {
    self.state.lock().await.online
  }

  // ── Startup ───────────────────────────────────────────────────────────

  /// Adopt the cached snapshot if one is fresh; sync immediately when the
  /// cache is absent or stale.
  pub async fn bootstrap(&self) -> Result<Outcome, SyncError> {
    if let Some(snapshot) = self.store.load(chrono_dur(self.config.cache_duration)).await {
      let stale =
        snapshot.is_stale(chrono_dur(self.config.sync_interval), Utc::now());
      let count = snapshot.len();

      {
        let mut state = self.state.lock().await;
        state.contacts = snapshot.contacts;
        state.last_sync = snapshot.last_sync;
      }
      info!(count, stale, "adopted cached snapshot");

      if !stale {
        return Ok(Outcome::FromCache(count));
      }
    }

    self.sync(false).await
  }

  // ── Sync ──────────────────────────────────────────────────────────────

  /// Run one sync cycle.
  ///
  /// Dropped with [`Outcome::InFlight`] when a sync is already running and
  /// `force` is false; rejected with [`SyncError::Offline`] before any
  /// network attempt when offline. On any failure the previously held
  /// contact set is preserved unchanged.
  pub async fn sync(&self, force: bool) -> Result<Outcome, SyncError> {
    {
      let mut state = self.state.lock().await;
      if state.syncing && !force {
        debug!("sync already in flight; dropping request");
        return Ok(Outcome::InFlight);
      }
      if !state.online {
        return Err(SyncError::Offline);
      }
      state.syncing = true;
    }

    let result = self.fetch_and_extract().await;

    // Clear the latch on every path before interpreting the result.
    let mut state = self.state.lock().await;
    state.syncing = false;

    let contacts = match result {
      Ok(contacts) => contacts,
      Err(e) => {
        warn!(error = %e, "sync failed; keeping previous contact set");
        return Err(e);
      }
    };

    if contacts.is_empty() {
      info!("source yielded no contacts; keeping previous set");
      return Ok(Outcome::NoNewData);
    }

    let mut snapshot = SyncSnapshot::new(contacts, Utc::now());
    snapshot.truncate(self.config.max_contacts);
    let count = snapshot.len();

    state.contacts = snapshot.contacts.clone();
    state.last_sync = snapshot.last_sync;
    drop(state);

    // Write-through is best effort; a full cache or bad disk must not fail
    // the sync that already replaced the in-memory set.
    if let Err(e) = self.store.save(&snapshot).await {
      warn!(error = %e, "cache write failed");
    }

    info!(count, "sync complete");
    Ok(Outcome::Synced(count))
  }

  async fn fetch_and_extract(&self) -> Result<Vec<Contact>, SyncError> {
    let payload = self.fetcher.fetch().await?;
    let rows = decode_rows(&payload)?;
    debug!(rows = rows.len(), "payload decoded");
    Ok(process_rows(&rows))
  }

  // ── Connectivity ──────────────────────────────────────────────────────

  /// Mark the session online and, after a settle delay, re-sync.
  pub async fn notify_online(&self) {
    self.state.lock().await.online = true;
    tokio::time::sleep(self.config.settle_delay).await;
    if let Err(e) = self.sync(false).await {
      warn!(error = %e, "post-reconnect sync failed");
    }
  }

  /// Mark the session offline. Sync requests are rejected until
  /// [`Self::notify_online`].
  pub async fn notify_offline(&self) {
    self.state.lock().await.online = false;
  }

  // ── Periodic re-sync ──────────────────────────────────────────────────

  /// Re-sync on the configured interval for the lifetime of the session.
  ///
  /// A transport-level failure flips the session offline; while offline,
  /// each tick probes by going through [`Self::notify_online`] (settle
  /// delay, then sync) instead of the plain sync path. Ticks that land
  /// while a sync is in flight are skipped.
  pub async fn run(&self) {
    let mut ticker = tokio::time::interval(self.config.sync_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick of a tokio interval fires immediately; bootstrap has
    // already decided whether an immediate sync is needed.
    ticker.tick().await;

    loop {
      ticker.tick().await;

      let (online, syncing) = {
        let state = self.state.lock().await;
        (state.online, state.syncing)
      };
      if syncing {
        continue;
      }
      if !online {
        info!("probing connectivity");
        self.notify_online().await;
        continue;
      }

      match self.sync(false).await {
        Ok(outcome) => debug!(?outcome, "periodic sync"),
        Err(SyncError::Fetch(crate::error::FetchError::Transport(e))) => {
          warn!(error = %e, "transport failure; treating session as offline");
          self.notify_offline().await;
        }
        Err(e) => warn!(error = %e, "periodic sync failed"),
      }
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
