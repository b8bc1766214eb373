use crate::errors::StorageError;
use crate::model::QueryRecord;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Append-only log of query records. Clones share one connection; writes are
/// serialized by the mutex in-process and by SQLite's file lock across
/// processes.
#[derive(Clone)]
pub struct Store {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Opens or creates the file at `path` and ensures the schema exists.
    /// Safe to call repeatedly against the same file.
    pub fn initialize(path: &Path) -> Result<Self, StorageError> {
        let store = Self::open(path)?;
        store.init_schema()?;
        Ok(store)
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    pub fn insert(&self, symptoms: &str, response_text: &str) -> Result<i64, StorageError> {
        let conn = self.lock()?;
        // stamped under the lock so timestamps follow id order
        let timestamp = now_iso8601();
        conn.execute(
            "INSERT INTO queries(timestamp, symptoms, response_text) VALUES (?1, ?2, ?3)",
            params![timestamp, symptoms, response_text],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(event = "symcheck.history.insert", id, %timestamp);
        Ok(id)
    }

    pub fn list_recent(&self, limit: u32) -> Result<Vec<QueryRecord>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, symptoms, response_text
             FROM queries
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], row_to_record)?;

        let mut records = Vec::new();
        for r in rows {
            records.push(r?);
        }
        Ok(records)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<QueryRecord>, StorageError> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT id, timestamp, symptoms, response_text FROM queries WHERE id = ?1",
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    pub fn count(&self) -> Result<u64, StorageError> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT count(*) FROM queries", [], |r| r.get(0))?;
        Ok(n as u64)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<QueryRecord> {
    Ok(QueryRecord {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        symptoms: row.get(2)?,
        response_text: row.get(3)?,
    })
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_utc_rfc3339() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn clones_share_the_same_log() {
        let a = Store::memory().unwrap();
        let b = a.clone();
        let id = a.insert("rash", "possible: eczema (low)").unwrap();
        assert_eq!(b.find_by_id(id).unwrap().unwrap().symptoms, "rash");
        assert_eq!(b.count().unwrap(), 1);
    }
}
