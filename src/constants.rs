// KidTube Constants
// Folder names and the table schema are shared with existing on-device data. Do not change.

// Paths
pub const APP_DATA_DIR: &str = ".kidtube";
pub const DB_FILENAME: &str = "videos.db";
pub const VIDEOS_FOLDER: &str = "videos";
pub const CONFIG_FILENAME: &str = "config.json";

// Configuration
pub const DEFAULT_ADMIN_PIN: &str = "1234";
pub const ENV_DATA_DIR: &str = "KIDTUBE_DATA_DIR";
pub const ENV_ADMIN_PIN: &str = "KIDTUBE_ADMIN_PIN";

/// Categories offered by the admin import. The store itself accepts any label.
pub const CATEGORIES: [&str; 6] = [
    "Animales",
    "Música",
    "Aprender",
    "Cuentos",
    "Diversión",
    "Otros",
];

/// Thumbnails must be remote images the player can fetch.
pub const THUMBNAIL_SCHEME_PATTERN: &str = r"^https?://";

// Player
pub const TABLET_MIN_WIDTH: u32 = 768;

// Copy verification
pub const HASH_CHUNK_SIZE: usize = 1_048_576; // 1MB

// Size reporting
pub const SIZE_NOT_FOUND_LABEL: &str = "file not found";
pub const SIZE_UNAVAILABLE_LABEL: &str = "size unavailable";

// Video extensions accepted by the import picker
pub const VIDEO_EXTENSIONS: [&str; 12] = [
    "mp4", "mov", "m4v", "avi", "mkv", "webm", "3gp", "mpg", "mpeg",
    "wmv", "flv", "ts",
];
