//! Integration tests for `CacheStore` against an in-memory database.

use chrono::{Duration, Utc};
use muster_core::{SyncSnapshot, extract::Row, process::process_rows};

use crate::{ActionEntry, ActionKind, CacheStore};

async fn store() -> CacheStore {
  CacheStore::open_in_memory().await.expect("in-memory store")
}

fn snapshot(names: &[&str]) -> SyncSnapshot {
  let rows: Vec<Row> = names
    .iter()
    .map(|n| [("Name".to_string(), n.to_string())].into_iter().collect())
    .collect();
  SyncSnapshot::new(process_rows(&rows), Utc::now())
}

// ─── Snapshot slot ───────────────────────────────────────────────────────────

#[tokio::test]
async fn load_before_any_save_is_none() {
  let s = store().await;
  assert!(s.load(Duration::hours(1)).await.is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
  let s = store().await;
  s.save(&snapshot(&["Alice", "Bob"])).await.unwrap();

  let loaded = s.load(Duration::hours(1)).await.expect("fresh snapshot");
  assert_eq!(loaded.len(), 2);
  assert_eq!(loaded.contacts[0].name, "Alice");
  assert!(loaded.last_sync.is_some());
}

#[tokio::test]
async fn save_overwrites_prior_snapshot() {
  let s = store().await;
  s.save(&snapshot(&["Alice", "Bob"])).await.unwrap();
  s.save(&snapshot(&["Carol"])).await.unwrap();

  let loaded = s.load(Duration::hours(1)).await.unwrap();
  assert_eq!(loaded.len(), 1);
  assert_eq!(loaded.contacts[0].name, "Carol");
}

#[tokio::test]
async fn expired_snapshot_loads_as_none() {
  let s = store().await;
  s.save(&snapshot(&["Alice"])).await.unwrap();

  // A zero cache duration makes the just-written slot already expired.
  assert!(s.load(Duration::zero()).await.is_none());
}

#[tokio::test]
async fn corrupt_payload_loads_as_none() {
  let s = store().await;
  s.save(&snapshot(&["Alice"])).await.unwrap();

  // Sabotage the stored JSON directly.
  s.conn_for_tests()
    .call(|conn| {
      conn.execute(
        "UPDATE kv SET value = '{not json' WHERE key = 'snapshot'",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  assert!(s.load(Duration::hours(1)).await.is_none());
}

// ─── Auth flag ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn auth_flag_defaults_to_false() {
  let s = store().await;
  assert!(!s.is_authenticated(Duration::hours(24)).await);
}

#[tokio::test]
async fn auth_flag_set_and_cleared() {
  let s = store().await;
  s.set_authenticated().await.unwrap();
  assert!(s.is_authenticated(Duration::hours(24)).await);

  s.clear_auth().await.unwrap();
  assert!(!s.is_authenticated(Duration::hours(24)).await);
}

#[tokio::test]
async fn auth_flag_expires_past_ttl() {
  let s = store().await;
  s.set_authenticated().await.unwrap();
  assert!(!s.is_authenticated(Duration::zero()).await);
}

// ─── Action log ──────────────────────────────────────────────────────────────

fn action(kind: ActionKind, target: &str, at_offset_secs: i64) -> ActionEntry {
  ActionEntry {
    kind,
    target: target.to_string(),
    name: "Alice".to_string(),
    logged_at: Utc::now() + Duration::seconds(at_offset_secs),
  }
}

#[tokio::test]
async fn actions_come_back_newest_first() {
  let s = store().await;
  s.log_action(&action(ActionKind::Call, "+963991234567", 0))
    .await
    .unwrap();
  s.log_action(&action(ActionKind::Telegram, "alice_w", 1))
    .await
    .unwrap();

  let recent = s.recent_actions(10).await.unwrap();
  assert_eq!(recent.len(), 2);
  assert_eq!(recent[0].kind, ActionKind::Telegram);
  assert_eq!(recent[1].kind, ActionKind::Call);
}

#[tokio::test]
async fn action_log_caps_at_fifty_newest() {
  let s = store().await;
  for i in 0..60 {
    s.log_action(&action(ActionKind::Whatsapp, &format!("target{i}"), i))
      .await
      .unwrap();
  }

  let recent = s.recent_actions(100).await.unwrap();
  assert_eq!(recent.len(), 50);
  assert_eq!(recent[0].target, "target59");
  assert_eq!(recent[49].target, "target10");
}
