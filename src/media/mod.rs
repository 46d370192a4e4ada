// Media file bookkeeping: picking, importing, removing and sizing video files.
// None of this touches the catalog; callers pair these calls with store operations.

pub mod copy;
pub mod discover;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::constants::{SIZE_NOT_FOUND_LABEL, SIZE_UNAVAILABLE_LABEL};
use crate::error::Result;

pub use copy::import_file;
pub use discover::{discover_video_files, is_video_file};

/// Size of an imported file as seen by the admin list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSize {
    Bytes(u64),
    Missing,
    Unavailable,
}

impl FileSize {
    pub fn label(&self) -> String {
        match self {
            FileSize::Bytes(bytes) => format_size_mb(*bytes),
            FileSize::Missing => SIZE_NOT_FOUND_LABEL.to_string(),
            FileSize::Unavailable => SIZE_UNAVAILABLE_LABEL.to_string(),
        }
    }
}

/// Stat a file. Missing files are reported, not treated as errors.
pub fn file_size(path: &Path) -> FileSize {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => FileSize::Bytes(meta.len()),
        Ok(_) => FileSize::Unavailable,
        Err(e) if e.kind() == ErrorKind::NotFound => FileSize::Missing,
        Err(e) => {
            log::warn!("Could not stat {}: {}", path.display(), e);
            FileSize::Unavailable
        }
    }
}

/// Sizes are shown in megabytes with two decimals
pub fn format_size_mb(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.2} MB", bytes as f64 / MB)
}

/// Delete an imported file. Deleting a file that is already gone succeeds.
pub fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} already removed", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Locators are stored as plain paths; accept the file:// form the mobile app wrote too.
pub fn locator_to_path(uri: &str) -> &Path {
    Path::new(uri.strip_prefix("file://").unwrap_or(uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size_mb(0), "0.00 MB");
        assert_eq!(format_size_mb(1_048_576), "1.00 MB");
        assert_eq!(format_size_mb(5_767_168), "5.50 MB");
    }

    #[test]
    fn test_file_size_states() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        fs::write(&file, vec![0u8; 2048]).unwrap();

        assert_eq!(file_size(&file), FileSize::Bytes(2048));
        assert_eq!(file_size(&dir.path().join("gone.mp4")), FileSize::Missing);
        assert_eq!(file_size(dir.path()), FileSize::Unavailable);
        assert_eq!(FileSize::Missing.label(), "file not found");
    }

    #[test]
    fn test_remove_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        fs::write(&file, b"data").unwrap();

        remove_file(&file).unwrap();
        assert!(!file.exists());
        remove_file(&file).unwrap();
    }

    #[test]
    fn test_remove_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = remove_file(dir.path()).unwrap_err();
        assert!(matches!(err, crate::error::KidTubeError::FileSystem(_)));
    }

    #[test]
    fn test_locator_to_path() {
        assert_eq!(locator_to_path("file:///docs/videos/a.mp4"), Path::new("/docs/videos/a.mp4"));
        assert_eq!(locator_to_path("/docs/videos/a.mp4"), Path::new("/docs/videos/a.mp4"));
    }
}
