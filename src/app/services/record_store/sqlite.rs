//! SQLite-backed record store
//!
//! Every record is written with its own `INSERT`, autocommitted. A failed
//! insert leaves earlier rows in place.

use rusqlite::{Connection, params};
use std::path::Path;
use tracing::{debug, info};

use super::RecordStore;
use crate::app::models::DataRecord;
use crate::error::PersistenceError;

/// Record store writing into a single SQLite table
#[derive(Debug)]
pub struct SqliteRecordStore {
    conn: Connection,
    table: String,
    insert_sql: String,
}

impl SqliteRecordStore {
    /// Open (or create) a database file and make sure the table exists
    pub fn open(path: &Path, table: &str) -> Result<Self, PersistenceError> {
        info!("Opening record database: {}", path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                message: format!("Failed to create database directory {}", parent.display()),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            PersistenceError::database(format!("Failed to open {}", path.display()), e)
        })?;
        Self::with_connection(conn, table)
    }

    /// Open a private in-memory database
    pub fn open_in_memory(table: &str) -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PersistenceError::database("Failed to open in-memory database", e))?;
        Self::with_connection(conn, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self, PersistenceError> {
        if !is_valid_table_name(table) {
            return Err(PersistenceError::rejected(format!(
                "Invalid table name '{}': use letters, digits and underscores",
                table
            )));
        }

        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    field1 TEXT NOT NULL,
                    field2 TEXT NOT NULL
                )",
                table
            ),
            [],
        )
        .map_err(|e| PersistenceError::database(format!("Failed to create table {}", table), e))?;

        debug!("Record table '{}' ready", table);

        Ok(Self {
            conn,
            table: table.to_string(),
            insert_sql: format!("INSERT INTO {} (field1, field2) VALUES (?1, ?2)", table),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Number of rows in the table
    pub fn count(&self) -> Result<usize, PersistenceError> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(|e| PersistenceError::database(format!("Failed to count {}", self.table), e))
    }

    /// All stored records in insertion order
    pub fn records(&self) -> Result<Vec<DataRecord>, PersistenceError> {
        let query_error = |e: rusqlite::Error| {
            PersistenceError::database(format!("Failed to read {}", self.table), e)
        };

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT field1, field2 FROM {} ORDER BY id", self.table))
            .map_err(query_error)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(DataRecord::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })
            .map_err(query_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }
}

impl RecordStore for SqliteRecordStore {
    fn insert_record(&mut self, record: &DataRecord) -> Result<(), PersistenceError> {
        self.conn
            .execute(&self.insert_sql, params![record.field1(), record.field2()])
            .map_err(|e| {
                PersistenceError::database(format!("Failed to insert into {}", self.table), e)
            })?;
        Ok(())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
