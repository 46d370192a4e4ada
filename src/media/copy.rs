// File copy for video import

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{KidTubeError, Result};
use crate::hash;

const TEMP_FILE_PREFIX: &str = ".importing-";

/// Copy a picked video into the videos folder under its original file name.
/// Returns the absolute destination path, which becomes the record's uri.
pub fn import_file(source: &Path, videos_dir: &Path) -> Result<PathBuf> {
    let filename = source
        .file_name()
        .ok_or_else(|| KidTubeError::validation(format!("no file name in {}", source.display())))?;

    if !source.is_file() {
        return Err(KidTubeError::FileSystem(io::Error::new(
            ErrorKind::NotFound,
            format!("source video not found: {}", source.display()),
        )));
    }

    fs::create_dir_all(videos_dir)?;

    let dest_path = videos_dir.join(filename);

    // Another record may already point at this file
    if dest_path.exists() {
        return Err(KidTubeError::FileSystem(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{} already exists in the videos folder", dest_path.display()),
        )));
    }

    let mut temp_name = std::ffi::OsString::from(TEMP_FILE_PREFIX);
    temp_name.push(filename);
    let temp_path = videos_dir.join(temp_name);

    if let Err(e) = copy_with_verify(source, &temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    publish(&temp_path, &dest_path)?;

    log::info!("Copied {} to {}", source.display(), dest_path.display());
    Ok(dest_path)
}

/// Move a verified temp copy to its final name. Never replaces an existing file,
/// even one created after the early name check.
fn publish(temp_path: &Path, dest_path: &Path) -> Result<()> {
    let linked = fs::hard_link(temp_path, dest_path);
    let _ = fs::remove_file(temp_path);

    linked.map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            KidTubeError::FileSystem(io::Error::new(
                ErrorKind::AlreadyExists,
                format!("{} already exists in the videos folder", dest_path.display()),
            ))
        } else {
            KidTubeError::from(e)
        }
    })
}

/// Copy file with read-back verification
fn copy_with_verify(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest)?;
    fs::File::open(dest)?.sync_all()?;

    if !hash::files_match(source, dest)? {
        return Err(KidTubeError::FileSystem(io::Error::new(
            ErrorKind::InvalidData,
            format!("copy of {} does not match its source", source.display()),
        )));
    }

    // Preserve modification time
    if let Ok(modified) = fs::metadata(source).and_then(|m| m.modified()) {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(modified));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_import_keeps_original_name() {
        let tmp = TempDir::new().unwrap();
        let source = source_file(tmp.path(), "rex.mp4", b"pretend video bytes");
        let videos_dir = tmp.path().join("docs").join("videos");

        let dest = import_file(&source, &videos_dir).unwrap();
        assert_eq!(dest, videos_dir.join("rex.mp4"));
        assert_eq!(fs::read(&dest).unwrap(), b"pretend video bytes");
        assert!(source.exists(), "source is left in place");
    }

    #[test]
    fn test_import_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let source = source_file(tmp.path(), "song.mov", b"la la la");
        let videos_dir = tmp.path().join("videos");

        import_file(&source, &videos_dir).unwrap();

        for entry in fs::read_dir(&videos_dir).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with(TEMP_FILE_PREFIX), "found temp file {}", name);
        }
    }

    #[test]
    fn test_import_refuses_existing_name() {
        let tmp = TempDir::new().unwrap();
        let source = source_file(tmp.path(), "rex.mp4", b"new");
        let videos_dir = tmp.path().join("videos");
        fs::create_dir_all(&videos_dir).unwrap();
        fs::write(videos_dir.join("rex.mp4"), b"old").unwrap();

        let err = import_file(&source, &videos_dir).unwrap_err();
        assert!(matches!(err, KidTubeError::FileSystem(ref e) if e.kind() == ErrorKind::AlreadyExists));
        assert_eq!(fs::read(videos_dir.join("rex.mp4")).unwrap(), b"old");
    }

    #[test]
    fn test_publish_never_replaces() {
        let tmp = TempDir::new().unwrap();
        let temp = source_file(tmp.path(), ".importing-rex.mp4", b"new");
        let dest = source_file(tmp.path(), "rex.mp4", b"old");

        let err = publish(&temp, &dest).unwrap_err();
        assert!(matches!(err, KidTubeError::FileSystem(ref e) if e.kind() == ErrorKind::AlreadyExists));
        assert_eq!(fs::read(&dest).unwrap(), b"old");
        assert!(!temp.exists());
    }

    #[test]
    fn test_publish_moves_temp_into_place() {
        let tmp = TempDir::new().unwrap();
        let temp = source_file(tmp.path(), ".importing-song.mov", b"la");
        let dest = tmp.path().join("song.mov");

        publish(&temp, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"la");
        assert!(!temp.exists());
    }

    #[test]
    fn test_import_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = import_file(&tmp.path().join("ghost.mp4"), &tmp.path().join("videos")).unwrap_err();
        assert!(matches!(err, KidTubeError::FileSystem(ref e) if e.kind() == ErrorKind::NotFound));
    }

    #[test]
    fn test_import_preserves_mtime() {
        let tmp = TempDir::new().unwrap();
        let source = source_file(tmp.path(), "old.mp4", b"vintage");
        let stamp = filetime::FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&source, stamp).unwrap();

        let dest = import_file(&source, &tmp.path().join("videos")).unwrap();
        let meta = fs::metadata(&dest).unwrap();
        assert_eq!(filetime::FileTime::from_last_modification_time(&meta), stamp);
    }
}
