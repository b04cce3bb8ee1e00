//! SQL schema for the texume SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS profiles (
    profile_id  TEXT PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL          -- RFC 3339 UTC
);

-- Content is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- `seq` orders saves that share a `created` date.
CREATE TABLE IF NOT EXISTS contents (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    content_id  TEXT NOT NULL UNIQUE,
    profile_id  TEXT NOT NULL REFERENCES profiles(profile_id),
    section     TEXT NOT NULL,         -- section label, e.g. 'Project Work'
    formatting  TEXT NOT NULL,         -- 'text' | 'date-points' | 'org-loc-title-date-points'
    body        TEXT NOT NULL,
    created     TEXT NOT NULL          -- YYYY-MM-DD
);

CREATE INDEX IF NOT EXISTS contents_latest_idx
    ON contents(profile_id, section, created);

PRAGMA user_version = 1;
";
