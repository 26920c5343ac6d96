//! SQLite-based notes storage.
//!
//! Notes are short free-text entries kept next to the timer.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{Result, StorageError, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// SQLite database for notes.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/pomocycle.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("pomocycle.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> std::result::Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS notes (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                text        TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Store a new note. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns a validation error for empty text, or a storage error if the insert fails.
    pub fn add_note(&self, text: &str) -> Result<Note> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty("note text".into()).into());
        }
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO notes (text, created_at) VALUES (?1, ?2)",
            params![text, created_at.to_rfc3339()],
        )?;
        Ok(Note {
            id: self.conn.last_insert_rowid(),
            text: text.to_string(),
            created_at,
        })
    }

    /// All notes, oldest first.
    pub fn list_notes(&self) -> std::result::Result<Vec<Note>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, created_at FROM notes ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut notes = Vec::new();
        for row in rows {
            let (id, text, created_at) = row?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StorageError::QueryFailed(format!("note {id}: {e}")))?;
            notes.push(Note {
                id,
                text,
                created_at,
            });
        }
        Ok(notes)
    }

    /// Delete one note. Returns whether it existed.
    pub fn remove_note(&self, id: i64) -> std::result::Result<bool, StorageError> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Delete every note. Returns how many were removed.
    pub fn clear_notes(&self) -> std::result::Result<usize, StorageError> {
        Ok(self.conn.execute("DELETE FROM notes", [])?)
    }
}
