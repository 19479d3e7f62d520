// src/database.rs

use log::debug;
use rusqlite::{Connection, Result};
use std::path::Path;

pub fn open(path: &Path) -> Result<Connection> {
    debug!("open: {:?}", path);
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_db(&conn)?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    debug!("init_db: Checking database schema...");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
        ",
    )?;

    let count: i64 = conn.query_row("SELECT count(*) FROM kv", [], |row| row.get(0))?;
    debug!("init_db: {} persisted entries", count);

    Ok(())
}
