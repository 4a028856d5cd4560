//! SQLite-backed note store via libsql. Implements NoteStorePort.
//!
//! Single `notes` table with an autoincrement primary key so ids are never
//! reused within an owner's live set, plus a non-unique index on owner for
//! fast per-user scans. Every mutating operation commits immediately.

use crate::domain::{DomainError, Note};
use crate::ports::NoteStorePort;
use libsql::params;
use std::path::{Path, PathBuf};
use tracing::info;

const NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner INTEGER NOT NULL,
    content TEXT NOT NULL
)"#;
const NOTES_OWNER_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes (owner ASC)";

/// SQLite note store. One database file holding every owner's notes.
pub struct SqliteNoteStore {
    conn: libsql::Connection,
    db_path: PathBuf,
}

impl SqliteNoteStore {
    /// Connect to (or create) the SQLite database and ensure the schema
    /// exists. Safe to call on every startup; a failure here is fatal and
    /// must prevent the process from serving updates.
    ///
    /// WAL mode and synchronous=NORMAL for durable commits without the cost
    /// of FULL fsync per write.
    pub async fn connect(db_path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DomainError::Store(e.to_string()))?;
            }
        }
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;

        // PRAGMA returns a row (new value); use query and consume rows
        // (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Store(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
            .is_some()
        {}
        let mut sync_rows = conn
            .query("PRAGMA synchronous=NORMAL", ())
            .await
            .map_err(|e| DomainError::Store(format!("synchronous pragma failed: {}", e)))?;
        while sync_rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
            .is_some()
        {}

        conn.execute(NOTES_TABLE, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(NOTES_OWNER_INDEX, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite note store connected");

        Ok(Self { conn, db_path })
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait::async_trait]
impl NoteStorePort for SqliteNoteStore {
    async fn add(&self, owner: i64, text: &str) -> Result<(), DomainError> {
        self.conn
            .execute(
                "INSERT INTO notes (owner, content) VALUES (?1, ?2)",
                params![owner, text],
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }

    async fn list(&self, owner: i64) -> Result<Vec<Note>, DomainError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, content FROM notes WHERE owner = ?1 ORDER BY id ASC",
                params![owner],
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut notes = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let id: i64 = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            let content: String = row.get(1).map_err(|e| DomainError::Store(e.to_string()))?;
            notes.push(Note { id, content });
        }
        Ok(notes)
    }

    async fn update(&self, owner: i64, id: i64, text: &str) -> Result<(), DomainError> {
        // Zero affected rows is a deliberate no-op, not an error.
        self.conn
            .execute(
                "UPDATE notes SET content = ?1 WHERE owner = ?2 AND id = ?3",
                params![text, owner, id],
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, owner: i64, id: i64) -> Result<(), DomainError> {
        self.conn
            .execute(
                "DELETE FROM notes WHERE owner = ?1 AND id = ?2",
                params![owner, id],
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }
}
