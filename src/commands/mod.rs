// KidTube - Commands Module
// Screen-level operations organized by domain. Errors stop here and are shown to the user.

pub mod admin;
pub mod browse;
pub mod player;

pub use admin::{check_pin, AdminSession, DeleteOutcome, ImportRequest, VideoEntry};
pub use browse::{category_videos, group_by_category, shelves, CategoryShelf};
pub use player::{related_videos, Orientation, PlaybackSession, PlayerState};
