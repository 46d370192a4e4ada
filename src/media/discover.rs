// Video file discovery for the import picker

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::constants::VIDEO_EXTENSIONS;

/// Discover all video files under a path (a single file or a directory tree)
pub fn discover_video_files(source_path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if source_path.is_file() {
        if is_video_file(source_path) {
            files.push(source_path.to_path_buf());
        }
    } else if source_path.is_dir() {
        for entry in WalkDir::new(source_path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_video_file(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    // Sort by path for consistent ordering
    files.sort();
    files
}

/// Check if a file is a video based on extension
pub fn is_video_file(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_lowercase(),
        None => return false,
    };

    VIDEO_EXTENSIONS.contains(&ext.as_str())
}
