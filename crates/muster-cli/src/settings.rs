//! Runtime configuration, deserialised from `muster.toml` and `MUSTER_*`
//! environment overrides.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// HTTP(S) endpoint publishing the team sheet.
  pub data_source: String,

  /// The shared team password for the auth gate.
  pub password: String,

  /// Path of the SQLite cache file.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  #[serde(default = "default_team_name")]
  pub team_name: String,

  /// Periodic re-sync cadence and staleness threshold, seconds.
  #[serde(default = "default_sync_interval_secs")]
  pub sync_interval_secs: u64,

  /// Cached-snapshot expiry, seconds. Independent of the sync interval.
  #[serde(default = "default_cache_duration_secs")]
  pub cache_duration_secs: u64,

  #[serde(default = "default_max_contacts")]
  pub max_contacts: usize,

  /// Auth gate lifetime, hours; re-entry is forced afterwards.
  #[serde(default = "default_auth_ttl_hours")]
  pub auth_ttl_hours: i64,

  /// Pause between coming online and the follow-up sync, seconds.
  #[serde(default = "default_settle_delay_secs")]
  pub settle_delay_secs: u64,
}

fn default_store_path() -> PathBuf {
  PathBuf::from("muster.db")
}
fn default_team_name() -> String {
  "Muster team".to_string()
}
fn default_sync_interval_secs() -> u64 {
  300
}
fn default_cache_duration_secs() -> u64 {
  3600
}
fn default_max_contacts() -> usize {
  1000
}
fn default_auth_ttl_hours() -> i64 {
  24
}
fn default_settle_delay_secs() -> u64 {
  2
}

impl Settings {
  /// Load from the given TOML file (optional) with `MUSTER_*` env
  /// overrides, e.g. `MUSTER_DATA_SOURCE`.
  pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("MUSTER"))
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn sync_config(&self) -> muster_sync::SyncConfig {
    muster_sync::SyncConfig {
      sync_interval:  Duration::from_secs(self.sync_interval_secs),
      cache_duration: Duration::from_secs(self.cache_duration_secs),
      max_contacts:   self.max_contacts,
      settle_delay:   Duration::from_secs(self.settle_delay_secs),
    }
  }

  pub fn auth_ttl(&self) -> chrono::Duration {
    chrono::Duration::hours(self.auth_ttl_hours)
  }
}
