// Database module

pub mod migrations;
pub mod schema;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::constants::{DB_FILENAME, VIDEOS_FOLDER};

/// Open or create a database at the given path
pub fn open_db(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database (tests, dry runs)
pub fn open_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<()> {
    // WAL lets the browser read while the admin import writes
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
    Ok(())
}

/// Get the database path for a data directory
pub fn get_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILENAME)
}

/// Get the imported videos folder for a data directory
pub fn get_videos_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(VIDEOS_FOLDER)
}

/// Initialize data folder structure
pub fn init_data_folders(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    std::fs::create_dir_all(get_videos_dir(data_dir))?;
    Ok(())
}
