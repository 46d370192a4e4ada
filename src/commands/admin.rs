// KidTube - Admin Commands
// PIN-gated import, listing and removal of videos

use std::path::PathBuf;

use regex::Regex;
use serde::Serialize;

use crate::config::AppConfig;
use crate::constants::{CATEGORIES, THUMBNAIL_SCHEME_PATTERN};
use crate::db::schema::{NewVideo, VideoRecord};
use crate::error::{KidTubeError, Result};
use crate::media::{self, FileSize};
use crate::store::{validate_video_id, CatalogStore};

/// A picked video plus the metadata typed on the import form
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub source: PathBuf,
    pub title: String,
    pub category: String,
    pub thumbnail: Option<String>,
}

impl ImportRequest {
    pub fn new(source: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            category: CATEGORIES[0].to_string(),
            thumbnail: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// Admin list row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    #[serde(flatten)]
    pub video: VideoRecord,
    pub size: String,
    #[serde(skip)]
    pub file_size: FileSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Parental lock: compare the entered PIN with the configured one.
pub fn check_pin(config: &AppConfig, entered: &str) -> Result<()> {
    if entered != config.admin_pin {
        log::warn!("Rejected admin PIN attempt");
        return Err(KidTubeError::PinRejected);
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<()> {
    if !CATEGORIES.contains(&category) {
        return Err(KidTubeError::validation(format!(
            "unknown category {:?} (expected one of: {})",
            category,
            CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

/// An empty thumbnail is allowed; anything else must be an http(s) URL.
pub fn validate_thumbnail(thumbnail: Option<&str>) -> Result<()> {
    let thumbnail = match thumbnail {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(()),
    };

    let scheme = Regex::new(&format!("(?i){}", THUMBNAIL_SCHEME_PATTERN))
        .map_err(|e| KidTubeError::Other(e.to_string()))?;
    if !scheme.is_match(thumbnail) {
        return Err(KidTubeError::validation("thumbnail must be an http(s) URL"));
    }
    Ok(())
}

pub struct AdminSession<'a> {
    store: &'a CatalogStore,
    videos_dir: PathBuf,
}

impl<'a> AdminSession<'a> {
    pub fn unlock(store: &'a CatalogStore, config: &AppConfig, entered_pin: &str) -> Result<Self> {
        check_pin(config, entered_pin)?;
        Ok(Self {
            store,
            videos_dir: config.videos_dir(),
        })
    }

    /// Copy the picked file into the videos folder, then record it.
    /// If the record cannot be written the copy is removed again.
    pub fn import_video(&self, request: &ImportRequest) -> Result<PathBuf> {
        if request.title.trim().is_empty() {
            return Err(KidTubeError::validation("select a video and enter a title"));
        }
        validate_category(&request.category)?;
        validate_thumbnail(request.thumbnail.as_deref())?;
        if !media::is_video_file(&request.source) {
            return Err(KidTubeError::validation(format!(
                "{} is not a video file",
                request.source.display()
            )));
        }
        // The uri must name the copied file exactly, or delete could not find it
        let dest_name = request.source.file_name().and_then(|n| n.to_str());
        if dest_name.is_none() || self.videos_dir.to_str().is_none() {
            return Err(KidTubeError::validation(format!(
                "{} has a name that cannot be stored",
                request.source.display()
            )));
        }

        let dest = media::import_file(&request.source, &self.videos_dir)?;
        let uri = match dest.to_str() {
            Some(uri) => uri.to_string(),
            None => {
                let _ = media::remove_file(&dest);
                return Err(KidTubeError::validation(format!(
                    "{} has a name that cannot be stored",
                    dest.display()
                )));
            }
        };

        let video = NewVideo::new(
            request.title.clone(),
            request.category.clone(),
            uri,
            request.thumbnail.clone(),
        );

        if let Err(e) = self.store.insert(&video) {
            if let Err(cleanup) = media::remove_file(&dest) {
                log::error!("Could not remove {} after failed insert: {}", dest.display(), cleanup);
            }
            return Err(e);
        }

        Ok(dest)
    }

    /// Every record with the size of its file
    pub fn list_videos(&self) -> Result<Vec<VideoEntry>> {
        let videos = self.store.fetch_all()?;

        Ok(videos
            .into_iter()
            .map(|video| {
                let file_size = media::file_size(media::locator_to_path(&video.uri));
                VideoEntry {
                    size: file_size.label(),
                    file_size,
                    video,
                }
            })
            .collect())
    }

    /// Remove the file first; the record goes only once the file is gone.
    pub fn delete_video(&self, id: i64) -> Result<DeleteOutcome> {
        let id = validate_video_id(id)?;

        let video = match self.store.get(id)? {
            Some(video) => video,
            None => return Ok(DeleteOutcome::NotFound),
        };

        let path = media::locator_to_path(&video.uri);
        if let Err(e) = media::remove_file(path) {
            log::error!("Keeping video #{}: could not remove {}: {}", id, path.display(), e);
            return Err(e);
        }

        let removed = self.store.delete_by_id(id).map_err(|e| {
            log::error!("File for video #{} removed but its record remains: {}", id, e);
            e
        })?;

        Ok(if removed { DeleteOutcome::Deleted } else { DeleteOutcome::NotFound })
    }
}
