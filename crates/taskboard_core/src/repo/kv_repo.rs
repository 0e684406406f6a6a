//! Key-value medium contracts and implementations.
//!
//! # Responsibility
//! - Provide the durable string-keyed medium that survives a restart.
//! - Offer an in-memory twin for previews and tests.

use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

/// String-keyed document medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&mut self, key: &str) -> RepoResult<()>;
}

/// `kv_entries`-backed medium over a migrated connection.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// Fails when the `kv_entries` table is missing, which means the
    /// connection was not migrated.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_kv_table(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local medium. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> RepoResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

fn ensure_kv_table(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::NotMigrated);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKvStore, SqliteKvStore};
    use crate::db::open_db_in_memory;
    use crate::repo::RepoError;

    #[test]
    fn memory_store_overwrites_and_removes() {
        let mut kv = MemoryKvStore::new();
        kv.set("projects", "[]").unwrap();
        kv.set("projects", "[1]").unwrap();
        assert_eq!(kv.get("projects").unwrap().as_deref(), Some("[1]"));
        assert_eq!(kv.len(), 1);

        kv.remove("projects").unwrap();
        assert!(kv.get("projects").unwrap().is_none());
        assert!(kv.is_empty());
    }

    #[test]
    fn sqlite_store_upserts_by_key() {
        let mut kv = SqliteKvStore::try_new(open_db_in_memory().unwrap()).unwrap();
        assert!(kv.get("todos").unwrap().is_none());

        kv.set("todos", "[]").unwrap();
        kv.set("todos", "[{\"id\":1}]").unwrap();
        assert_eq!(kv.get("todos").unwrap().as_deref(), Some("[{\"id\":1}]"));

        let rows: i64 = kv
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn sqlite_store_rejects_unmigrated_connection() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        assert!(matches!(
            SqliteKvStore::try_new(conn),
            Err(RepoError::NotMigrated)
        ));
    }
}
