// Catalog Store
// Sole owner of the videos table. One connection per store, opened lazily on first use
// and kept until close(). Every operation re-runs the (idempotent) table setup first.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use rusqlite::Connection;

use crate::db::{self, migrations};
use crate::db::schema::{self, NewVideo, VideoRecord};
use crate::error::{KidTubeError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    Memory,
}

#[derive(Debug)]
pub struct CatalogStore {
    location: Location,
    conn: Mutex<Option<Connection>>,
}

impl CatalogStore {
    /// Store backed by the database file at `db_path`. Nothing is opened until first use.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(db_path.into()),
            conn: Mutex::new(None),
        }
    }

    /// Store backed by a private in-memory database. Contents are lost on close().
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: Mutex::new(None),
        }
    }

    pub fn db_path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Ensure the connection is open and the videos table exists.
    pub fn initialize(&self) -> Result<()> {
        let mut guard = self.lock()?;
        self.ready_connection(&mut guard)?;
        Ok(())
    }

    /// Append a new record. The id is assigned by the database.
    pub fn insert(&self, video: &NewVideo) -> Result<()> {
        validate_new_video(video)?;

        let id = self.with_conn("insert", |conn| schema::insert_video(conn, video))?;
        log::info!("Video inserted: {} [{}] as #{}", video.title, video.category, id);
        Ok(())
    }

    /// Every record, in rowid order.
    pub fn fetch_all(&self) -> Result<Vec<VideoRecord>> {
        let videos = self.with_conn("fetch_all", schema::list_videos)?;
        log::debug!("Fetched {} videos", videos.len());
        Ok(videos)
    }

    pub fn fetch_by_category(&self, category: &str) -> Result<Vec<VideoRecord>> {
        require("category", category)?;

        let videos = self.with_conn("fetch_by_category", |conn| {
            schema::list_videos_by_category(conn, category)
        })?;
        log::debug!("{}: {} videos found", category, videos.len());
        Ok(videos)
    }

    pub fn get(&self, id: i64) -> Result<Option<VideoRecord>> {
        let id = validate_video_id(id)?;
        self.with_conn("get", |conn| schema::get_video(conn, id))
    }

    pub fn count(&self) -> Result<i64> {
        self.with_conn("count", schema::count_videos)
    }

    /// Returns false when no record had this id.
    pub fn delete_by_id(&self, id: i64) -> Result<bool> {
        let id = validate_video_id(id)?;

        let removed = self.with_conn("delete", |conn| schema::delete_video(conn, id))?;
        if removed == 0 {
            log::warn!("No video found with id {}", id);
            return Ok(false);
        }

        log::info!("Video #{} deleted", id);
        Ok(true)
    }

    /// Close the connection. The next operation reopens it.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.lock()?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| storage_failure("close", e))?;
            log::info!("Catalog connection closed");
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>> {
        self.conn
            .lock()
            .map_err(|_| KidTubeError::Other("catalog connection lock poisoned".to_string()))
    }

    fn open_connection(&self) -> Result<Connection> {
        let opened = match &self.location {
            Location::File(path) => db::open_db(path),
            Location::Memory => db::open_memory_db(),
        };

        opened.map_err(|e| {
            log::error!("Failed to open catalog database: {:#}", e);
            KidTubeError::from(e)
        })
    }

    fn ready_connection<'g>(&self, slot: &'g mut Option<Connection>) -> Result<&'g Connection> {
        if slot.is_none() {
            *slot = Some(self.open_connection()?);
            log::info!("Catalog database opened");
        }

        let conn = slot
            .as_ref()
            .ok_or_else(|| KidTubeError::Other("catalog connection unavailable".to_string()))?;

        migrations::run_migrations(conn).map_err(|e| {
            log::error!("Failed to prepare videos table: {:#}", e);
            KidTubeError::from(e)
        })?;

        Ok(conn)
    }

    fn with_conn<T, F>(&self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let mut guard = self.lock()?;
        let conn = self.ready_connection(&mut guard)?;
        f(conn).map_err(|e| storage_failure(op, e))
    }
}

fn storage_failure(op: &str, err: rusqlite::Error) -> KidTubeError {
    log::error!("Catalog {} failed: {}", op, err);
    KidTubeError::Storage(err)
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KidTubeError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Title, category and uri must all be present.
pub fn validate_new_video(video: &NewVideo) -> Result<()> {
    require("title", &video.title)?;
    require("category", &video.category)?;
    require("uri", &video.uri)?;
    Ok(())
}

pub fn validate_video_id(id: i64) -> Result<i64> {
    if id <= 0 {
        return Err(KidTubeError::validation(format!("invalid video id: {}", id)));
    }
    Ok(id)
}

/// Parse a user-entered id. Anything but a positive integer is a validation error.
pub fn parse_video_id(raw: &str) -> Result<i64> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| KidTubeError::validation(format!("invalid video id: {:?}", raw)))?;
    validate_video_id(id)
}

// ----- Process-wide store -----

static CATALOG: OnceLock<CatalogStore> = OnceLock::new();

/// Install the process-wide store. Repeated calls with the same path return the same store.
pub fn install_global(db_path: impl Into<PathBuf>) -> Result<&'static CatalogStore> {
    let db_path = db_path.into();
    let store = CATALOG.get_or_init(|| CatalogStore::new(db_path.clone()));

    if store.db_path() != Some(db_path.as_path()) {
        return Err(KidTubeError::Config(format!(
            "catalog already installed for {}",
            store.db_path().map(|p| p.display().to_string()).unwrap_or_default()
        )));
    }

    Ok(store)
}

pub fn global() -> Option<&'static CatalogStore> {
    CATALOG.get()
}
