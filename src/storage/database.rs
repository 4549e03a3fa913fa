//! SQLite database handle
//!
//! Owns the single connection to the attendance database, applies schema
//! migrations on open, and hands out the connection to query closures.
//! Every `write` closure runs inside one transaction, so a read-then-insert
//! rule in the attendance service is atomic.

use crate::storage::{StorageError, StorageResult};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Schema migrations, applied in order. `PRAGMA user_version` holds the
/// number of migrations already applied.
const MIGRATIONS: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS cards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_number TEXT NOT NULL UNIQUE,
        card_name TEXT,
        user_fullname TEXT,
        user_id TEXT,
        is_present INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS punches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_id INTEGER NOT NULL REFERENCES cards(id),
        status TEXT NOT NULL,
        timestamp INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_punches_card_time ON punches(card_id, timestamp);
    CREATE INDEX IF NOT EXISTS idx_punches_time ON punches(timestamp);
    ",
];

/// Handle to the attendance database
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        tracing::info!(path = ?path, "Opened attendance database");
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(mut conn: Connection, path: Option<PathBuf>) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Location of the database file (`None` when in memory)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run read-only statements
    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> StorageResult<T>) -> StorageResult<T> {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Run statements inside a single transaction, committed when `f` succeeds
    pub fn write<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Whether the connection still answers queries
    pub fn is_healthy(&self) -> bool {
        self.read(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?))
            .is_ok()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }
}

fn migrate(conn: &mut Connection) -> StorageResult<()> {
    let applied: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    for (idx, sql) in MIGRATIONS.iter().enumerate().skip(applied.max(0) as usize) {
        let version = idx + 1;
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| StorageError::Migration(format!("version {}: {}", version, e)))?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", version))?;
        tx.commit()?;
        tracing::debug!(version, "Applied schema migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table_names(db: &Database) -> Vec<String> {
        db.read(|conn| {
            let mut stmt =
                conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names)
        })
        .unwrap()
    }

    #[test]
    fn test_in_memory_schema() {
        let db = Database::open_in_memory().unwrap();
        let names = table_names(&db);
        assert!(names.contains(&"cards".to_string()));
        assert!(names.contains(&"punches".to_string()));
        assert!(db.is_healthy());
        assert!(db.path().is_none());
    }

    #[test]
    fn test_reopen_keeps_schema_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("terminal.db");

        {
            let db = Database::open(&path).unwrap();
            assert_eq!(db.path(), Some(path.as_path()));
        }

        let db = Database::open(&path).unwrap();
        let version: i64 = db
            .read(|conn| Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(version, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let db = Database::open_in_memory().unwrap();

        let result: StorageResult<()> = db.write(|tx| {
            tx.execute(
                "INSERT INTO cards (card_number, created_at, updated_at) VALUES ('aa', 0, 0)",
                [],
            )?;
            Err(StorageError::Migration("forced".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = db
            .read(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
