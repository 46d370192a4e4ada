// KidTube - Player Commands
// Playback session and the related-videos panel state

use crate::constants::TABLET_MIN_WIDTH;
use crate::db::schema::VideoRecord;
use crate::error::{KidTubeError, Result};
use crate::store::{validate_video_id, CatalogStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }
}

/// Fullscreen follows orientation. Tablets open the related panel when turned sideways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub is_tablet: bool,
    pub fullscreen: bool,
    pub show_related: bool,
}

impl PlayerState {
    pub fn new(window_width: u32) -> Self {
        Self {
            is_tablet: window_width >= TABLET_MIN_WIDTH,
            fullscreen: false,
            show_related: false,
        }
    }

    pub fn on_orientation_change(&mut self, orientation: Orientation) {
        let landscape = orientation.is_landscape();
        self.fullscreen = landscape;
        self.show_related = landscape && self.is_tablet;
    }

    /// Tapping the video toggles the related panel. Returns the new visibility.
    pub fn on_tap(&mut self) -> bool {
        self.show_related = !self.show_related;
        self.show_related
    }

    /// Title overlay and back button are hidden in fullscreen
    pub fn shows_chrome(&self) -> bool {
        !self.fullscreen
    }
}

/// Every candidate except the one playing
pub fn related_videos<'a>(current: &VideoRecord, candidates: &'a [VideoRecord]) -> Vec<&'a VideoRecord> {
    candidates.iter().filter(|v| v.id != current.id).collect()
}

/// Poster image: the thumbnail when set, otherwise the video itself
pub fn poster_for(video: &VideoRecord) -> &str {
    video.thumbnail_url().unwrap_or(&video.uri)
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    current: VideoRecord,
    catalog: Vec<VideoRecord>,
}

impl PlaybackSession {
    /// Start playing `id`; the whole catalog is offered as related videos.
    pub fn open(store: &CatalogStore, id: i64) -> Result<Self> {
        let id = validate_video_id(id)?;
        let catalog = store.fetch_all()?;
        let current = catalog
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(KidTubeError::NotFound(id))?;

        Ok(Self::with_catalog(current, catalog))
    }

    fn with_catalog(current: VideoRecord, catalog: Vec<VideoRecord>) -> Self {
        Self { current, catalog }
    }

    pub fn current(&self) -> &VideoRecord {
        &self.current
    }

    pub fn related(&self) -> Vec<&VideoRecord> {
        related_videos(&self.current, &self.catalog)
    }

    pub fn poster(&self) -> &str {
        poster_for(&self.current)
    }

    /// Switch to a related video. The related list stays the same.
    pub fn play(&mut self, id: i64) -> Result<&VideoRecord> {
        let next = self
            .catalog
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(KidTubeError::NotFound(id))?;

        log::info!("Playing #{} {}", next.id, next.title);
        self.current = next;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::NewVideo;

    fn video(id: i64, thumbnail: Option<&str>) -> VideoRecord {
        VideoRecord {
            id,
            title: format!("video {}", id),
            category: "Otros".to_string(),
            uri: format!("/videos/{}.mp4", id),
            thumbnail: thumbnail.map(str::to_string),
        }
    }

    #[test]
    fn test_related_excludes_current() {
        let all = vec![video(1, None), video(2, None), video(3, None)];
        let related = related_videos(&all[1], &all);
        let ids: Vec<_> = related.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_poster_falls_back_to_uri() {
        assert_eq!(poster_for(&video(1, Some("https://img/1.jpg"))), "https://img/1.jpg");
        assert_eq!(poster_for(&video(2, Some(""))), "/videos/2.mp4");
        assert_eq!(poster_for(&video(3, None)), "/videos/3.mp4");
    }

    #[test]
    fn test_phone_orientation() {
        let mut state = PlayerState::new(390);
        assert!(!state.is_tablet);

        state.on_orientation_change(Orientation::LandscapeLeft);
        assert!(state.fullscreen);
        assert!(!state.show_related);
        assert!(!state.shows_chrome());

        state.on_orientation_change(Orientation::Portrait);
        assert!(!state.fullscreen);
        assert!(state.shows_chrome());
    }

    #[test]
    fn test_tablet_landscape_shows_related() {
        let mut state = PlayerState::new(1024);
        state.on_orientation_change(Orientation::LandscapeRight);
        assert!(state.show_related);

        state.on_orientation_change(Orientation::PortraitUpsideDown);
        assert!(!state.show_related);
        assert!(!state.fullscreen);
    }

    #[test]
    fn test_tap_toggles_related() {
        let mut state = PlayerState::new(390);
        assert!(state.on_tap());
        assert!(!state.on_tap());
    }

    #[test]
    fn test_session_play_keeps_related_list() {
        let store = CatalogStore::in_memory();
        for name in ["a", "b", "c"] {
            store.insert(&NewVideo::new(name, "Otros", format!("/{}.mp4", name), None)).unwrap();
        }

        let mut session = PlaybackSession::open(&store, 1).unwrap();
        assert_eq!(session.current().title, "a");
        assert_eq!(session.related().len(), 2);

        session.play(3).unwrap();
        assert_eq!(session.current().title, "c");
        let ids: Vec<_> = session.related().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert!(matches!(session.play(9), Err(KidTubeError::NotFound(9))));
    }

    #[test]
    fn test_session_missing_video() {
        let store = CatalogStore::in_memory();
        assert!(matches!(PlaybackSession::open(&store, 5), Err(KidTubeError::NotFound(5))));
        assert!(PlaybackSession::open(&store, 0).unwrap_err().is_validation());
    }
}
