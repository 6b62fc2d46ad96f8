use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::media::{extension_of, normalize_extension, MediaEntry};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read media directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Enumerate the regular files directly inside `dir` whose extension is in
/// `extensions`, in directory order. Subdirectories are not descended.
pub fn scan_dir<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Vec<MediaEntry>, ScanError> {
    let allowed: HashSet<String> = extensions
        .iter()
        .filter_map(|e| normalize_extension(e.as_ref()))
        .collect();

    let read_dir = std::fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                warn!("scan: skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };

        let file_name = dir_entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!("scan: skipping non-UTF-8 file name {:?}", file_name);
            continue;
        };

        let accepted = extension_of(name).is_some_and(|ext| allowed.contains(&ext));
        if !accepted {
            continue;
        }

        // Follows symlinks, so a link to a file counts and a link to a directory does not.
        match std::fs::metadata(dir_entry.path()) {
            Ok(meta) if meta.is_file() => entries.push(MediaEntry::from_file_name(name)),
            Ok(_) => debug!("scan: {} is not a regular file", name),
            Err(e) => warn!("scan: cannot stat {}: {}", name, e),
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_extensions;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn sorted_paths(entries: &[MediaEntry]) -> Vec<String> {
        let mut paths: Vec<String> = entries.iter().map(|e| e.path().to_string()).collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_scan_filters_by_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "a.mp4", "b.WEBM", "c.Gif", "d.jpg", "e.JPEG", "f.png", "g.bmp", "notes.txt",
            "song.mp3", "noext", "archive.mp4.zip",
        ] {
            touch(dir.path(), name);
        }

        let entries = scan_dir(dir.path(), &default_extensions()).unwrap();
        assert_eq!(
            sorted_paths(&entries),
            vec![
                "/videos/a.mp4",
                "/videos/b.WEBM",
                "/videos/c.Gif",
                "/videos/d.jpg",
                "/videos/e.JPEG",
                "/videos/f.png",
                "/videos/g.bmp",
            ]
        );
    }

    #[test]
    fn test_scan_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.mp4")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "deep.mp4");
        touch(dir.path(), "top.mp4");

        let entries = scan_dir(dir.path(), &default_extensions()).unwrap();
        assert_eq!(sorted_paths(&entries), vec!["/videos/top.mp4"]);
    }

    #[test]
    fn test_scan_includes_hidden_media() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".mp4");
        touch(dir.path(), ".hidden.png");

        let entries = scan_dir(dir.path(), &default_extensions()).unwrap();
        assert_eq!(
            sorted_paths(&entries),
            vec!["/videos/.hidden.png", "/videos/.mp4"]
        );
    }

    #[test]
    fn test_scan_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.mkv");
        touch(dir.path(), "b.mp4");

        let entries = scan_dir(dir.path(), &["MKV"]).unwrap();
        assert_eq!(sorted_paths(&entries), vec!["/videos/a.mkv"]);
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_dir(dir.path(), &default_extensions()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = scan_dir(&missing, &default_extensions()).unwrap_err();
        assert!(matches!(err, ScanError::ReadDir { ref path, .. } if *path == missing));
    }
}
