// Database schema types and query helpers

use rusqlite::{Connection, params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

// ----- Video -----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub uri: String,
    pub thumbnail: Option<String>,
}

impl VideoRecord {
    /// Thumbnail locator, if one was given and is non-empty
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub title: String,
    pub category: String,
    pub uri: String,
    pub thumbnail: Option<String>,
}

impl NewVideo {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        uri: impl Into<String>,
        thumbnail: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            uri: uri.into(),
            thumbnail,
        }
    }
}

const VIDEO_COLUMNS: &str = "id, title, category, uri, thumbnail";

fn row_to_video(row: &Row) -> rusqlite::Result<VideoRecord> {
    Ok(VideoRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        uri: row.get(3)?,
        thumbnail: row.get(4)?,
    })
}

pub fn insert_video(conn: &Connection, video: &NewVideo) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO videos (title, category, uri, thumbnail) VALUES (?1, ?2, ?3, ?4)",
        params![video.title, video.category, video.uri, video.thumbnail],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_video(conn: &Connection, id: i64) -> rusqlite::Result<Option<VideoRecord>> {
    conn.query_row(
        &format!("SELECT {} FROM videos WHERE id = ?1", VIDEO_COLUMNS),
        params![id],
        row_to_video,
    ).optional()
}

pub fn list_videos(conn: &Connection) -> rusqlite::Result<Vec<VideoRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM videos", VIDEO_COLUMNS))?;
    let videos = stmt.query_map([], row_to_video)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(videos)
}

/// Exact, case-sensitive category match
pub fn list_videos_by_category(conn: &Connection, category: &str) -> rusqlite::Result<Vec<VideoRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM videos WHERE category = ?1",
        VIDEO_COLUMNS
    ))?;
    let videos = stmt.query_map(params![category], row_to_video)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(videos)
}

pub fn count_videos(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))
}

/// Returns the number of rows removed (0 or 1)
pub fn delete_video(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM videos WHERE id = ?1", params![id])
}
