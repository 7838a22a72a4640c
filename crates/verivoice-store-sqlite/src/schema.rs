//! SQL schema for the VeriVoice SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS petitions (
    id           TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    description  TEXT NOT NULL,
    nationality  TEXT NOT NULL,
    creator_name TEXT NOT NULL,
    created_at   TEXT NOT NULL,   -- RFC 3339 UTC, microsecond precision
    signatures   INTEGER NOT NULL DEFAULT 0,
    status       TEXT NOT NULL DEFAULT 'active'
                 CHECK (status IN ('active', 'under_review', 'closed'))
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
-- (petition_id, name) is deliberately not unique.
CREATE TABLE IF NOT EXISTS signers (
    id          TEXT PRIMARY KEY,
    petition_id TEXT NOT NULL REFERENCES petitions(id),
    name        TEXT NOT NULL,
    nationality TEXT NOT NULL,
    signed_at   TEXT NOT NULL,
    verified    INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS petitions_created_idx ON petitions(created_at);
CREATE INDEX IF NOT EXISTS signers_petition_idx  ON signers(petition_id, signed_at);

PRAGMA user_version = 1;
";
