// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable local store for submissions that could not reach the server.
//!
//! A single SQLite table keyed by an auto-incrementing integer. The
//! structural version lives in `PRAGMA user_version`; opening at a higher
//! version than the file carries runs the pending setup steps once, inside a
//! single transaction. Every operation runs in its own write transaction.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, TransactionBehavior};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Name of the record table.
pub const RECORD_TABLE: &str = "new_pizza";

/// Setup steps, keyed by the structural version that introduces them.
const SETUP_STEPS: &[(u32, &str)] = &[(
    1,
    r#"
CREATE TABLE IF NOT EXISTS new_pizza (
    key INTEGER PRIMARY KEY AUTOINCREMENT,
    payload TEXT NOT NULL,
    queued_at TEXT NOT NULL
);
"#,
)];

/// A buffered submission awaiting delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedRecord {
    /// Store-assigned key, monotonic in insertion order.
    pub key: i64,
    /// The exact body the caller tried to send.
    pub payload: Value,
    /// When the record was written.
    pub queued_at: DateTime<Utc>,
}

/// Handle to an opened local store.
///
/// Cloning is cheap; clones share the same connection.
#[derive(Clone)]
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
    name: String,
    version: u32,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("name", &self.name)
            .field("version", &self.version)
            .finish()
    }
}

/// Path of the database file for a store named `name` inside `dir`.
pub fn db_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.db"))
}

impl LocalStore {
    /// Open (creating if absent) the store `name` in `dir` at `version`.
    pub fn open(dir: &Path, name: &str, version: u32) -> Result<Self> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(db_path(dir, name))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        Self::from_connection(conn, name, version)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(name: &str, version: u32) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, name, version)
    }

    fn from_connection(mut conn: Connection, name: &str, version: u32) -> Result<Self> {
        upgrade(&mut conn, name, version)?;
        Ok(LocalStore {
            conn: Arc::new(Mutex::new(conn)),
            name: name.to_string(),
            version,
        })
    }

    /// Name the store was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structural version the store was opened at.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Structural version recorded in the database file.
    #[cfg(test)]
    pub(crate) fn stored_version(&self) -> Result<u32> {
        let conn = self.lock()?;
        Ok(read_user_version(&conn)?)
    }

    /// Append a record and return its store-assigned key.
    pub fn insert(&self, payload: &Value) -> Result<i64> {
        let json = serde_json::to_string(payload)?;
        let mut conn = self.lock()?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO new_pizza (payload, queued_at) VALUES (?1, ?2)",
            params![json, Utc::now().to_rfc3339()],
        )?;
        let key = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(store = %self.name, key, "queued record");
        Ok(key)
    }

    /// Read every record in insertion order.
    ///
    /// Takes the write lock like the other operations so a clear issued right
    /// after sees the same table state.
    pub fn read_all(&self) -> Result<Vec<QueuedRecord>> {
        let mut conn = self.lock()?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let rows = {
            let mut stmt = tx.prepare("SELECT key, payload, queued_at FROM new_pizza ORDER BY key")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };
        tx.commit()?;

        rows.into_iter()
            .map(|(key, payload, queued_at)| {
                Ok(QueuedRecord {
                    key,
                    payload: serde_json::from_str(&payload).map_err(|e| {
                        Error::CorruptedData(format!("record {key} has invalid payload: {e}"))
                    })?,
                    queued_at: parse_timestamp(key, &queued_at)?,
                })
            })
            .collect()
    }

    /// Remove every record. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut conn = self.lock()?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM new_pizza", [])?;
        tx.commit()?;

        tracing::debug!(store = %self.name, removed, "cleared records");
        Ok(removed)
    }

    /// Remove every record with a key up to and including `key`.
    ///
    /// Records appended after a read keep their larger keys and survive.
    pub fn clear_through(&self, key: i64) -> Result<usize> {
        let mut conn = self.lock()?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM new_pizza WHERE key <= ?1", params![key])?;
        tx.commit()?;

        tracing::debug!(store = %self.name, through = key, removed, "cleared records");
        Ok(removed)
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM new_pizza", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| Error::CorruptedData(format!("record count {count}")))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StoreUnavailable(format!("connection to '{}' is poisoned", self.name)))
    }
}

fn read_user_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Run the setup steps between the stored and requested versions.
///
/// The stored version is re-read inside the transaction so two processes
/// opening the same file cannot both run the same step.
fn upgrade(conn: &mut Connection, name: &str, requested: u32) -> Result<()> {
    if requested == 0 {
        return Err(Error::InvalidVersion(requested));
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let stored = read_user_version(&tx)?;

    if stored > requested {
        return Err(Error::VersionDowngrade {
            name: name.to_string(),
            stored,
            requested,
        });
    }
    if stored == requested {
        return Ok(());
    }

    for (step, sql) in SETUP_STEPS
        .iter()
        .filter(|(step, _)| *step > stored && *step <= requested)
    {
        tracing::debug!(store = name, step, "running store setup step");
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", requested)?;
    tx.commit()?;

    tracing::info!(store = name, from = stored, to = requested, "upgraded local store");
    Ok(())
}

fn parse_timestamp(key: i64, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::CorruptedData(format!("record {key} has invalid timestamp '{value}'")))
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
