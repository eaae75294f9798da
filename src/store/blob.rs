use crate::error::StoreError;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A single SQLite table of whole JSON objects keyed by their `id` field.
///
/// Every call opens its own connection and drops it when done.
#[derive(Debug, Clone)]
pub struct BlobStore {
    path: PathBuf,
    table: &'static str,
}

impl BlobStore {
    /// `table` is interpolated into SQL and must be a trusted identifier.
    pub fn new(path: impl AsRef<Path>, table: &'static str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table,
        }
    }

    pub fn table(&self) -> &str {
        self.table
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, data TEXT NOT NULL)",
                self.table
            ),
            [],
        )?;
        Ok(())
    }

    /// All blobs in the order they were first stored.
    pub fn list(&self) -> Result<Vec<Value>, StoreError> {
        self.list_in(&self.open()?)
    }

    fn list_in(&self, conn: &Connection) -> Result<Vec<Value>, StoreError> {
        let mut stmt = conn.prepare(&format!("SELECT data FROM {} ORDER BY rowid", self.table))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        rows.iter()
            .map(|data| serde_json::from_str(data).map_err(StoreError::from))
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        let conn = self.open()?;
        let data: Option<String> = conn
            .query_row(
                &format!("SELECT data FROM {} WHERE id = ?1", self.table),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        data.map(|d| serde_json::from_str(&d).map_err(StoreError::from))
            .transpose()
    }

    /// Inserts or replaces the blob under its `id`. Replacing keeps the
    /// original position in `list`.
    pub fn put(&self, blob: &Value) -> Result<String, StoreError> {
        let id = blob_id(blob)?.to_string();
        self.put_in(&self.open()?, &id, blob)?;
        Ok(id)
    }

    /// Like [`BlobStore::put`], but `check` first sees every stored blob and
    /// may refuse the write. Both happen in one write transaction, so no other
    /// writer can slip in between the check and the put.
    pub fn put_checked(
        &self,
        blob: &Value,
        check: impl FnOnce(&[Value]) -> Result<(), StoreError>,
    ) -> Result<String, StoreError> {
        let id = blob_id(blob)?.to_string();
        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        check(&self.list_in(&tx)?)?;
        self.put_in(&tx, &id, blob)?;
        tx.commit()?;
        Ok(id)
    }

    fn put_in(&self, conn: &Connection, id: &str, blob: &Value) -> Result<(), StoreError> {
        conn.execute(
            &format!(
                "INSERT INTO {} (id, data) VALUES (?1, ?2) \
                 ON CONFLICT(id) DO UPDATE SET data = excluded.data",
                self.table
            ),
            params![id, serde_json::to_string(blob)?],
        )?;
        Ok(())
    }

    /// Returns whether a row was deleted.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.open()?;
        let changed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.table),
            params![id],
        )?;
        Ok(changed > 0)
    }
}

pub fn blob_id(blob: &Value) -> Result<&str, StoreError> {
    blob.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(StoreError::MissingId)
}
