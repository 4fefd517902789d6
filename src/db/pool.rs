//! SQLite connection wrapper (one owning connection per process).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Private in-memory database, gone when the pool is dropped.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

/// Resolve the on-disk path of the `main` database of a connection.
pub fn database_file(conn: &Connection) -> String {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default()
}
