//! SQLite implementation of the VersionedStore trait.
//!
//! This is the primary storage backend for orgledger. It uses rusqlite with
//! bundled SQLite. Each put/delete runs inside one SQL transaction covering
//! both the current-state table and the revision log, so a failure leaves
//! no partial write.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use orgledger_core::TxId;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{RevisionEntry, VersionedStore};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex around the connection.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                Some(format!("mutex poisoned: {}", e)),
            ))
        })?;
        f(&conn)
    }

    /// Execute a blocking operation that needs mutable access.
    fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                Some(format!("mutex poisoned: {}", e)),
            ))
        })?;
        f(&mut conn)
    }
}

/// Compute the next per-key sequence and a monotonically clamped timestamp
/// for a new revision of `key`.
fn next_revision(conn: &Connection, key: &str) -> rusqlite::Result<(u64, i64)> {
    let (count, last_ts): (u64, Option<i64>) = conn.query_row(
        "SELECT COUNT(*), MAX(timestamp) FROM revisions WHERE key = ?1",
        params![key],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let timestamp = now_millis().max(last_ts.unwrap_or(i64::MIN));
    Ok((count + 1, timestamp))
}

#[async_trait]
impl VersionedStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let key = key.to_string();
        self.with_conn(|conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM records WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value.map(Bytes::from))
        })
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<TxId> {
        let key = key.to_string();
        let value = value.to_vec();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let (seq, timestamp) = next_revision(&tx, &key)?;
            let tx_id = TxId::derive(&key, seq, timestamp);

            tx.execute(
                "INSERT INTO records (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            tx.execute(
                "INSERT INTO revisions (key, seq, tx_id, timestamp, is_delete, value)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5)",
                params![key, seq, tx_id.as_str(), timestamp, value],
            )?;

            tx.commit()?;
            Ok(tx_id)
        })
    }

    async fn delete(&self, key: &str) -> Result<TxId> {
        let key = key.to_string();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let removed = tx.execute("DELETE FROM records WHERE key = ?1", params![key])?;
            if removed == 0 {
                // Transaction dropped without commit: log untouched.
                return Err(StoreError::NotFound(key.clone()));
            }

            let (seq, timestamp) = next_revision(&tx, &key)?;
            let tx_id = TxId::derive(&key, seq, timestamp);

            tx.execute(
                "INSERT INTO revisions (key, seq, tx_id, timestamp, is_delete, value)
                 VALUES (?1, ?2, ?3, ?4, 1, NULL)",
                params![key, seq, tx_id.as_str(), timestamp],
            )?;

            tx.commit()?;
            Ok(tx_id)
        })
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<Vec<(String, Bytes)>> {
        let start = start.to_string();
        let end = end.to_string();
        self.with_conn(|conn| {
            let mut rows = Vec::new();

            if end.is_empty() {
                let mut stmt = conn.prepare(
                    "SELECT key, value FROM records WHERE key >= ?1 ORDER BY key",
                )?;
                let mapped = stmt.query_map(params![start], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
                })?;
                for row in mapped {
                    let (key, value) = row?;
                    rows.push((key, Bytes::from(value)));
                }
            } else {
                let mut stmt = conn.prepare(
                    "SELECT key, value FROM records WHERE key >= ?1 AND key < ?2 ORDER BY key",
                )?;
                let mapped = stmt.query_map(params![start, end], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
                })?;
                for row in mapped {
                    let (key, value) = row?;
                    rows.push((key, Bytes::from(value)));
                }
            }

            Ok(rows)
        })
    }

    async fn scan_history(&self, key: &str) -> Result<Vec<RevisionEntry>> {
        let key = key.to_string();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT tx_id, timestamp, is_delete, value
                 FROM revisions WHERE key = ?1 ORDER BY rev ASC",
            )?;
            let mapped = stmt.query_map(params![key], |row| {
                let tx_id: String = row.get(0)?;
                let timestamp: i64 = row.get(1)?;
                let is_delete: bool = row.get(2)?;
                let value: Option<Vec<u8>> = row.get(3)?;
                Ok((tx_id, timestamp, is_delete, value))
            })?;

            let mut entries = Vec::new();
            for row in mapped {
                let (tx_id, timestamp, is_delete, value) = row?;
                entries.push(RevisionEntry {
                    tx_id: TxId::from(tx_id),
                    timestamp,
                    is_delete,
                    value: value.map(Bytes::from),
                });
            }
            Ok(entries)
        })
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
