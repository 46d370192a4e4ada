// Hashing module using BLAKE3
// Used to confirm an imported copy matches its source byte-for-byte.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::constants::HASH_CHUNK_SIZE;
use crate::error::Result;

/// Compute full BLAKE3 hash of entire file
/// Format: "blake3:full:<hash>"
pub fn compute_full_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(format!("blake3:full:{}", hash.to_hex()))
}

/// Check that two files have identical content
pub fn files_match(a: &Path, b: &Path) -> Result<bool> {
    Ok(compute_full_hash(a)? == compute_full_hash(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_hash() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Hello, World!").unwrap();

        let hash = compute_full_hash(file.path()).unwrap();
        assert!(hash.starts_with("blake3:full:"));
        assert_eq!(hash, format!("blake3:full:{}", blake3::hash(b"Hello, World!").to_hex()));
    }

    #[test]
    fn test_files_match() {
        let mut a = NamedTempFile::new().unwrap();
        let mut b = NamedTempFile::new().unwrap();
        a.write_all(b"same bytes").unwrap();
        b.write_all(b"same bytes").unwrap();
        assert!(files_match(a.path(), b.path()).unwrap());

        b.write_all(b"!").unwrap();
        assert!(!files_match(a.path(), b.path()).unwrap());
    }

    #[test]
    fn test_missing_file_is_fs_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = compute_full_hash(&dir.path().join("nope.mp4")).unwrap_err();
        assert!(matches!(err, crate::error::KidTubeError::FileSystem(_)));
    }
}
