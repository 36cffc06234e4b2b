//! SQLite-backed store.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::record::{NewRecord, StoredRecord};
use crate::RecordStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    external_id TEXT NOT NULL,
    category TEXT NOT NULL,
    cipher TEXT NOT NULL,
    output TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

/// Store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("opening record store at {}", path.as_ref().display());
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn insert(&mut self, record: NewRecord) -> Result<i64> {
        record.validate()?;
        self.conn.execute(
            "INSERT INTO records (name, external_id, category, cipher, output, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.name,
                record.external_id,
                record.category,
                record.cipher,
                record.output,
                Utc::now(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_all(&self) -> Result<Vec<StoredRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, external_id, category, cipher, output, created_at
             FROM records ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let created_at: DateTime<Utc> = row.get(6)?;
            Ok(StoredRecord {
                row_id: row.get(0)?,
                created_at,
                record: NewRecord {
                    name: row.get(1)?,
                    external_id: row.get(2)?,
                    category: row.get(3)?,
                    cipher: row.get(4)?,
                    output: row.get(5)?,
                },
            })
        })?;
        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }
        Ok(records)
    }
}
