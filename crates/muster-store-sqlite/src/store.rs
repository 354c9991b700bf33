//! [`CacheStore`] — the single-slot snapshot cache plus auth flag and
//! action log.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use muster_core::SyncSnapshot;
use rusqlite::OptionalExtension as _;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  schema::{KEY_AUTH, KEY_SNAPSHOT, SCHEMA},
};

/// Action-log retention: only the newest entries are kept.
const MAX_ACTIONS: usize = 50;

// ─── Action log types ────────────────────────────────────────────────────────

/// Which quick action was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
  Call,
  Whatsapp,
  Telegram,
}

impl ActionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Call => "call",
      Self::Whatsapp => "whatsapp",
      Self::Telegram => "telegram",
    }
  }

  fn decode(s: &str) -> Result<Self> {
    match s {
      "call" => Ok(Self::Call),
      "whatsapp" => Ok(Self::Whatsapp),
      "telegram" => Ok(Self::Telegram),
      other => Err(Error::UnknownActionKind(other.to_string())),
    }
  }
}

/// One logged quick action (a placed call, an opened chat).
#[derive(Debug, Clone)]
pub struct ActionEntry {
  pub kind:      ActionKind,
  /// The dialled number or messaged handle.
  pub target:    String,
  /// The contact's display name at the time of the action.
  pub name:      String,
  pub logged_at: DateTime<Utc>,
}

// ─── Encoding helpers ────────────────────────────────────────────────────────

fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The Muster local cache, backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct CacheStore {
  conn: tokio_rusqlite::Connection,
}

impl CacheStore {
  /// Open (or create) a cache at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory cache — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Raw connection handle, exposed so tests can sabotage stored state.
  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection {
    &self.conn
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── kv slot primitives ────────────────────────────────────────────────

  async fn put_kv(&self, key: &'static str, value: String) -> Result<()> {
    let written_at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO kv (key, value, written_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![key, value, written_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Returns `(value, written_at)` for `key`, or `None` if the slot was
  /// never written.
  async fn get_kv(
    &self,
    key: &'static str,
  ) -> Result<Option<(String, DateTime<Utc>)>> {
    let row: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        let row = conn
          .query_row(
            "SELECT value, written_at FROM kv WHERE key = ?1",
            rusqlite::params![key],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        Ok(row)
      })
      .await?;

    match row {
      Some((value, written_at)) => Ok(Some((value, decode_dt(&written_at)?))),
      None => Ok(None),
    }
  }

  async fn delete_kv(&self, key: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Snapshot slot ─────────────────────────────────────────────────────

  /// Overwrite the snapshot slot and stamp the write time.
  pub async fn save(&self, snapshot: &SyncSnapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    self.put_kv(KEY_SNAPSHOT, json).await
  }

  /// Load the cached snapshot, honouring the cache-duration expiry.
  ///
  /// Returns `None` when the slot was never written, when its write
  /// timestamp has aged past `cache_duration`, or on any read/parse
  /// failure. Storage trouble is a cache miss, never an error.
  pub async fn load(&self, cache_duration: Duration) -> Option<SyncSnapshot> {
    match self.try_load(cache_duration).await {
      Ok(snapshot) => snapshot,
      Err(e) => {
        warn!(error = %e, "cache read failed; treating as miss");
        None
      }
    }
  }

  async fn try_load(&self, cache_duration: Duration) -> Result<Option<SyncSnapshot>> {
    let Some((json, written_at)) = self.get_kv(KEY_SNAPSHOT).await? else {
      return Ok(None);
    };

    if Utc::now() - written_at > cache_duration {
      debug!(%written_at, "cached snapshot expired");
      return Ok(None);
    }

    Ok(Some(serde_json::from_str(&json)?))
  }

  // ── Auth flag ─────────────────────────────────────────────────────────

  /// Record a successful password entry; the gate opens from now.
  pub async fn set_authenticated(&self) -> Result<()> {
    self.put_kv(KEY_AUTH, "true".to_string()).await
  }

  /// Whether a recorded authentication is still within `ttl`.
  /// Storage trouble reads as "not authenticated".
  pub async fn is_authenticated(&self, ttl: Duration) -> bool {
    match self.get_kv(KEY_AUTH).await {
      Ok(Some((_, authenticated_at))) => Utc::now() - authenticated_at <= ttl,
      Ok(None) => false,
      Err(e) => {
        warn!(error = %e, "auth flag read failed");
        false
      }
    }
  }

  pub async fn clear_auth(&self) -> Result<()> {
    self.delete_kv(KEY_AUTH).await
  }

  // ── Action log ────────────────────────────────────────────────────────

  /// Append a quick-action entry, trimming the log to the newest
  /// [`MAX_ACTIONS`].
  pub async fn log_action(&self, entry: &ActionEntry) -> Result<()> {
    let action_id = Uuid::new_v4().hyphenated().to_string();
    let kind = entry.kind.as_str();
    let target = entry.target.clone();
    let name = entry.name.clone();
    let logged_at = encode_dt(entry.logged_at);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO action_log (action_id, kind, target, name, logged_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![action_id, kind, target, name, logged_at],
        )?;
        tx.execute(
          "DELETE FROM action_log WHERE action_id NOT IN (
             SELECT action_id FROM action_log
             ORDER BY logged_at DESC, action_id LIMIT ?1
           )",
          rusqlite::params![MAX_ACTIONS as i64],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The newest `limit` actions, newest first.
  pub async fn recent_actions(&self, limit: usize) -> Result<Vec<ActionEntry>> {
    let limit = limit as i64;
    let rows: Vec<(String, String, String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT kind, target, name, logged_at FROM action_log
           ORDER BY logged_at DESC, action_id LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
          })?
          .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(kind, target, name, logged_at)| {
        Ok(ActionEntry {
          kind: ActionKind::decode(&kind)?,
          target,
          name,
          logged_at: decode_dt(&logged_at)?,
        })
      })
      .collect()
  }
}
