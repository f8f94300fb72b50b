//! SQL schema for the bufete SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. Writes replace `body` whole.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    doc_id      TEXT NOT NULL,
    body        TEXT NOT NULL,   -- JSON object
    written_at  TEXT NOT NULL,   -- ISO 8601 UTC; set on every write
    PRIMARY KEY (collection, doc_id)
);

PRAGMA user_version = 1;
";
