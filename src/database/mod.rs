pub mod schema;

use crate::error::AppError;
use async_trait::async_trait;
use photo_gallery::{KeyValueStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

pub const DATABASE_FILE: &str = "gallery.db";

/// Opens (and creates if needed) the app database inside `data_dir`
pub fn init_database(data_dir: &Path) -> Result<Connection, AppError> {
    std::fs::create_dir_all(data_dir)?;

    let db_path = data_dir.join(DATABASE_FILE);
    log::debug!("Opening database at {}", db_path.display());
    let conn = Connection::open(&db_path)?;

    schema::init_schema(&conn)?;

    Ok(conn)
}

/// Key-value store on top of the `preferences` table
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Wraps a connection whose schema is already initialised
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn set_sync(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_sync(&self, key: &str) -> rusqlite::Result<Option<String>> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        conn.query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_sync(key, value)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_sync(key)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> SqliteKeyValueStore {
        let conn = Connection::open_in_memory().unwrap();
        schema::init_schema(&conn).unwrap();
        SqliteKeyValueStore::new(conn)
    }

    #[tokio::test]
    async fn test_get_unknown_key() {
        let store = memory_store();
        assert_eq!(store.get("photos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = memory_store();
        store.set("photos", "[]").await.unwrap();
        store
            .set("photos", r#"[{"filePath":"1.jpeg"}]"#)
            .await
            .unwrap();

        assert_eq!(
            store.get("photos").await.unwrap(),
            Some(r#"[{"filePath":"1.jpeg"}]"#.to_string())
        );
    }

    #[test]
    fn test_init_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        init_database(&data_dir).unwrap();
        assert!(data_dir.join(DATABASE_FILE).exists());
    }
}
