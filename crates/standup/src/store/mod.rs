//! Storage layer for standup.
//!
//! This module provides `SQLite`-based persistent storage for standup
//! entries with create/read/update/delete/list/clear operations.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entry::{EntryPayload, StandupEntry};
use crate::error::{Error, Result};

/// Storage engine for standup entries.
///
/// Provides persistent storage using `SQLite`. The store performs no
/// validation of entry fields; that is the API layer's job. Every
/// operation is atomic per record and there are no cross-record
/// invariants, so no transactions are needed.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all entries, most recently created first.
    ///
    /// Ties on `created_at` are broken by insertion order (newest first)
    /// so the ordering is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<StandupEntry>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, date, yesterday, today, blockers, created_at, updated_at
            FROM entries ORDER BY created_at DESC, rowid DESC
            ",
        )?;

        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Create a new entry from the given payload.
    ///
    /// Assigns a fresh id and creation/update timestamps, persists the
    /// record, and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn create(&self, payload: &EntryPayload) -> Result<StandupEntry> {
        let now = Utc::now();
        let entry = StandupEntry {
            id: Uuid::new_v4().to_string(),
            name: payload.name.clone(),
            date: payload.date.clone(),
            yesterday: payload.yesterday.clone(),
            today: payload.today.clone(),
            blockers: payload.blockers.clone(),
            created_at: now,
            updated_at: now,
        };

        self.conn.execute(
            r"
            INSERT INTO entries (id, name, date, yesterday, today, blockers, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                entry.id,
                entry.name,
                entry.date,
                entry.yesterday,
                entry.today,
                entry.blockers,
                entry.created_at.to_rfc3339(),
                entry.updated_at.to_rfc3339(),
            ],
        )?;

        debug!("Inserted entry {}", entry.id);
        Ok(entry)
    }

    /// Get an entry by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given id, or
    /// another error if the database operation fails.
    pub fn get(&self, id: &str) -> Result<StandupEntry> {
        self.conn
            .query_row(
                r"
                SELECT id, name, date, yesterday, today, blockers, created_at, updated_at
                FROM entries WHERE id = ?1
                ",
                [id],
                Self::row_to_entry,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(id))
    }

    /// Replace the user fields of an existing entry.
    ///
    /// `id` and `created_at` are preserved; `updated_at` is refreshed.
    /// Partial updates are not supported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given id, or
    /// another error if the database operation fails.
    pub fn update(&self, id: &str, payload: &EntryPayload) -> Result<StandupEntry> {
        let updated_at = Utc::now();
        let affected = self.conn.execute(
            r"
            UPDATE entries
            SET name = ?1, date = ?2, yesterday = ?3, today = ?4, blockers = ?5, updated_at = ?6
            WHERE id = ?7
            ",
            params![
                payload.name,
                payload.date,
                payload.yesterday,
                payload.today,
                payload.blockers,
                updated_at.to_rfc3339(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::not_found(id));
        }

        debug!("Updated entry {id}");
        self.get(id)
    }

    /// Delete an entry by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if no entry has the given id, or
    /// another error if the database operation fails.
    pub fn delete(&self, id: &str) -> Result<()> {
        let affected = self.conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(Error::not_found(id));
        }
        debug!("Deleted entry {id}");
        Ok(())
    }

    /// Remove all entries unconditionally.
    ///
    /// Returns the number of entries removed. Safe to call on an empty
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<usize> {
        let affected = self.conn.execute("DELETE FROM entries", [])?;
        if affected > 0 {
            info!("Cleared {} entries", affected);
        }
        Ok(affected)
    }

    /// Count total entries in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let total_entries = self.count()?;

        let distinct_dates: i64 =
            self.conn
                .query_row("SELECT COUNT(DISTINCT date) FROM entries", [], |row| {
                    row.get(0)
                })?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            total_entries,
            distinct_dates,
            db_size_bytes,
        })
    }

    /// Convert a database row to a `StandupEntry`.
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<StandupEntry> {
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        Ok(StandupEntry {
            id: row.get(0)?,
            name: row.get(1)?,
            date: row.get(2)?,
            yesterday: row.get(3)?,
            today: row.get(4)?,
            blockers: row.get(5)?,
            created_at: parse_timestamp(&created_at_str),
            updated_at: parse_timestamp(&updated_at_str),
        })
    }
}

/// Parse a stored RFC 3339 timestamp, falling back to now on corruption.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of entries stored.
    pub total_entries: i64,
    /// Number of distinct dates with at least one entry.
    pub distinct_dates: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> Store {
        Store::open_in_memory().expect("failed to create test store")
    }

    fn payload(name: &str, date: &str) -> EntryPayload {
        EntryPayload::new(name, date, "Fixed bug", "Write tests", None)
    }

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_create_and_get() {
        let store = create_test_store();
        let created = store.create(&payload("Ann", "2024-03-01")).unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.date, "2024-03-01");
        assert!(fetched.blockers.is_none());
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let store = create_test_store();
        let a = store.create(&payload("Ann", "2024-03-01")).unwrap();
        let b = store.create(&payload("Ann", "2024-03-01")).unwrap();

        // Same person, same day is allowed; ids still differ
        assert_ne!(a.id, b.id);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_create_preserves_blockers() {
        let store = create_test_store();
        let mut p = payload("Ann", "2024-03-01");
        p.blockers = Some("waiting on review".to_string());

        let created = store.create(&p).unwrap();
        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched.blockers.as_deref(), Some("waiting on review"));
    }

    #[test]
    fn test_get_nonexistent() {
        let store = create_test_store();
        let result = store.get("no-such-id");
        assert!(result.is_err());
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_ordered_by_created_at_desc() {
        let store = create_test_store();
        let first = store.create(&payload("Ann", "2024-03-01")).unwrap();
        let second = store.create(&payload("Ben", "2024-03-01")).unwrap();
        let third = store.create(&payload("Cas", "2024-03-02")).unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, third.id);
        assert_eq!(entries[1].id, second.id);
        assert_eq!(entries[2].id, first.id);
    }

    #[test]
    fn test_list_empty() {
        let store = create_test_store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_fields() {
        let store = create_test_store();
        let created = store.create(&payload("Ann", "2024-03-01")).unwrap();

        let mut updated_payload = payload("Ann", "2024-03-02");
        updated_payload.yesterday = "Shipped release".to_string();
        updated_payload.blockers = Some("CI flaky".to_string());

        let updated = store.update(&created.id, &updated_payload).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, "2024-03-02");
        assert_eq!(updated.yesterday, "Shipped release");
        assert_eq!(updated.blockers.as_deref(), Some("CI flaky"));
    }

    #[test]
    fn test_update_refreshes_updated_at_only() {
        let store = create_test_store();
        let created = store.create(&payload("Ann", "2024-03-01")).unwrap();

        let updated = store.update(&created.id, &payload("Ann", "2024-03-01")).unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_update_nonexistent() {
        let store = create_test_store();
        let result = store.update("no-such-id", &payload("Ann", "2024-03-01"));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_can_clear_blockers() {
        let store = create_test_store();
        let mut p = payload("Ann", "2024-03-01");
        p.blockers = Some("stuck".to_string());
        let created = store.create(&p).unwrap();

        let updated = store.update(&created.id, &payload("Ann", "2024-03-01")).unwrap();
        assert!(updated.blockers.is_none());
    }

    #[test]
    fn test_delete() {
        let store = create_test_store();
        let created = store.create(&payload("Ann", "2024-03-01")).unwrap();

        store.delete(&created.id).unwrap();
        assert!(store.get(&created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_nonexistent() {
        let store = create_test_store();
        let result = store.delete("no-such-id");
        assert!(result.is_err());
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear() {
        let store = create_test_store();
        store.create(&payload("Ann", "2024-03-01")).unwrap();
        store.create(&payload("Ben", "2024-03-02")).unwrap();

        let removed = store.clear().unwrap();
        assert_eq!(removed, 2);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_clear_idempotent() {
        let store = create_test_store();
        store.create(&payload("Ann", "2024-03-01")).unwrap();

        assert_eq!(store.clear().unwrap(), 1);
        assert_eq!(store.clear().unwrap(), 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_count() {
        let store = create_test_store();
        assert_eq!(store.count().unwrap(), 0);

        store.create(&payload("Ann", "2024-03-01")).unwrap();
        store.create(&payload("Ben", "2024-03-01")).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_stats() {
        let store = create_test_store();
        store.create(&payload("Ann", "2024-03-01")).unwrap();
        store.create(&payload("Ben", "2024-03-01")).unwrap();
        store.create(&payload("Cas", "2024-03-02")).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.distinct_dates, 2);
        assert_eq!(stats.db_size_bytes, 0); // in-memory
    }

    #[test]
    fn test_stats_empty() {
        let store = create_test_store();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.distinct_dates, 0);
    }

    #[test]
    fn test_unicode_content() {
        let store = create_test_store();
        let mut p = payload("Ann", "2024-03-01");
        p.yesterday = "Fixed 世界 bug 🌍".to_string();

        let created = store.create(&p).unwrap();
        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched.yesterday, "Fixed 世界 bug 🌍");
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("standup_test_{}.db", std::process::id()));

        let store = Store::open(&db_path).unwrap();
        store.create(&payload("Ann", "2024-03-01")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.path(), db_path);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let nested_path = temp_dir.join(format!(
            "standup_test_{}/nested/db.sqlite",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let store = Store::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent.parent().unwrap());
        }
    }

    #[test]
    fn test_parse_timestamp_roundtrip() {
        let now = Utc::now();
        let parsed = parse_timestamp(&now.to_rfc3339());
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_store_stats_clone() {
        let stats = StoreStats {
            total_entries: 5,
            distinct_dates: 2,
            db_size_bytes: 512,
        };
        let cloned = stats.clone();
        assert_eq!(stats, cloned);
    }
}
