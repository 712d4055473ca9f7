//! SQLite-based note storage.
//!
//! Provides persistent storage for:
//! - The journal note list (newest first)
//! - Key-value store for application state (persisted engine, pending
//!   note hand-off)
//!
//! The milestone engine never writes here directly; notes arrive through
//! the editor surface after a hand-off.

use rusqlite::{params, Connection, OptionalExtension};

use crate::note::NoteStub;

use super::data_dir;

/// SQLite database for journal notes.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/stepnote/stepnote.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("stepnote.db");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS notes (
                id        TEXT PRIMARY KEY,
                title     TEXT NOT NULL,
                content   TEXT NOT NULL DEFAULT '',
                timestamp INTEGER NOT NULL,
                color     TEXT NOT NULL,
                image_uri TEXT
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_notes_timestamp ON notes(timestamp);",
        )?;
        Ok(())
    }

    /// Append a note to the journal.
    ///
    /// # Errors
    /// Returns an error if the insert fails (e.g. duplicate id).
    pub fn insert_note(&self, note: &NoteStub) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO notes (id, title, content, timestamp, color, image_uri)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                note.id,
                note.title,
                note.content,
                note.timestamp,
                note.color,
                note.image_uri,
            ],
        )?;
        Ok(())
    }

    /// All notes, newest first.
    pub fn list_notes(&self) -> Result<Vec<NoteStub>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, timestamp, color, image_uri
             FROM notes ORDER BY timestamp DESC, id",
        )?;
        let rows = stmt.query_map([], Self::note_from_row)?;
        rows.collect()
    }

    pub fn get_note(&self, id: &str) -> Result<Option<NoteStub>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, title, content, timestamp, color, image_uri
                 FROM notes WHERE id = ?1",
                params![id],
                Self::note_from_row,
            )
            .optional()
    }

    /// Delete a note. Returns whether a row was removed.
    pub fn delete_note(&self, id: &str) -> Result<bool, rusqlite::Error> {
        let affected = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn note_from_row(row: &rusqlite::Row<'_>) -> Result<NoteStub, rusqlite::Error> {
        Ok(NoteStub {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            timestamp: row.get(3)?,
            color: row.get(4)?,
            image_uri: row.get(5)?,
        })
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read a value and delete it in the same call. One-shot parameters
    /// (the pending note hand-off) use this so a re-read sees nothing.
    pub fn kv_take(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let value = self.kv_get(key)?;
        if value.is_some() {
            self.conn
                .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        }
        Ok(value)
    }

    /// Delete a key without reading it.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{NoteStub, MILESTONE_COLOR, PALETTE};
    use chrono::Utc;

    #[test]
    fn insert_and_list_newest_first() {
        let db = Database::open_memory().unwrap();
        let mut older = NoteStub::new("Older", "", PALETTE[0]);
        older.timestamp = 1000;
        let mut newer = NoteStub::milestone(1000, Utc::now());
        newer.timestamp = 2000;

        db.insert_note(&older).unwrap();
        db.insert_note(&newer).unwrap();

        let notes = db.list_notes().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "1000 Steps Milestone");
        assert_eq!(notes[0].color, MILESTONE_COLOR);
        assert_eq!(notes[1].title, "Older");
    }

    #[test]
    fn get_and_delete() {
        let db = Database::open_memory().unwrap();
        let note = NoteStub::new("Walk", "Long walk today", PALETTE[1]);
        db.insert_note(&note).unwrap();

        let fetched = db.get_note(&note.id).unwrap().unwrap();
        assert_eq!(fetched, note);

        assert!(db.delete_note(&note.id).unwrap());
        assert!(!db.delete_note(&note.id).unwrap());
        assert!(db.get_note(&note.id).unwrap().is_none());
    }

    #[test]
    fn image_uri_round_trips() {
        let db = Database::open_memory().unwrap();
        let note = NoteStub::photo("photos/1.jpg", Utc::now());
        db.insert_note(&note).unwrap();
        let fetched = db.get_note(&note.id).unwrap().unwrap();
        assert_eq!(fetched.image_uri.as_deref(), Some("photos/1.jpg"));
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn kv_take_is_one_shot() {
        let db = Database::open_memory().unwrap();
        db.kv_set("pending_note", "{}").unwrap();
        assert_eq!(db.kv_take("pending_note").unwrap().unwrap(), "{}");
        assert!(db.kv_take("pending_note").unwrap().is_none());
        assert!(db.kv_get("pending_note").unwrap().is_none());
    }
}
