//! `SQLite` schema definitions for the standup store.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the entries table.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS entries (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    date TEXT NOT NULL,
    yesterday TEXT NOT NULL,
    today TEXT NOT NULL,
    blockers TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `created_at` for list ordering.
pub const CREATE_CREATED_AT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_entries_created_at ON entries(created_at DESC)
";

/// SQL statement to create an index on `date` for day grouping queries.
pub const CREATE_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_ENTRIES_TABLE,
    CREATE_CREATED_AT_INDEX,
    CREATE_DATE_INDEX,
    CREATE_METADATA_TABLE,
];
