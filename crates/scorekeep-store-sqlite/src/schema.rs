//! SQL schema for the scorekeep SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per wallet. Rows are created by the first upsert and only ever
-- updated afterwards; nothing deletes from this table.
CREATE TABLE IF NOT EXISTS users (
    wallet_address TEXT PRIMARY KEY,
    score          REAL NOT NULL CHECK (score >= 0),
    updated_at     TEXT NOT NULL   -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";
