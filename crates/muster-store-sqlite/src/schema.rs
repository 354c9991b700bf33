//! SQL schema for the Muster SQLite cache.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Single-slot key/value state: the serialised snapshot under 'snapshot',
-- the auth flag under 'auth'. written_at is the slot's write timestamp,
-- which for the snapshot slot drives cache-duration expiry.
CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    written_at TEXT NOT NULL    -- ISO 8601 UTC
);

-- Quick-action history, capped at the newest entries on every insert.
CREATE TABLE IF NOT EXISTS action_log (
    action_id TEXT PRIMARY KEY,
    kind      TEXT NOT NULL,    -- 'call' | 'whatsapp' | 'telegram'
    target    TEXT NOT NULL,
    name      TEXT NOT NULL,
    logged_at TEXT NOT NULL     -- ISO 8601 UTC
);

CREATE INDEX IF NOT EXISTS action_log_time_idx ON action_log(logged_at);

PRAGMA user_version = 1;
";

/// kv key for the serialised [`muster_core::SyncSnapshot`].
pub const KEY_SNAPSHOT: &str = "snapshot";

/// kv key for the auth flag; `written_at` is the authentication time.
pub const KEY_AUTH: &str = "auth";
