//! core/library.rs
//! Folder listing for the browser.
//!
//! Only one level deep: the browser shows what is directly inside a folder,
//! the user walks down by opening directories.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{Entry, EntryKind};

/// Extensions (lowercase, no dot) the browser shows as playable.
pub const AUDIO_EXTENSIONS: [&str; 7] = ["aac", "aif", "aiff", "flac", "mp3", "ogg", "wav"];

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("cannot read folder {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the visible entries of `dir`: directories first, then audio files,
/// each group sorted by case-insensitive name. Hidden items are skipped.
pub fn list_dir(dir: &Path) -> Result<Vec<Entry>, LibraryError> {
    let read = std::fs::read_dir(dir).map_err(|source| LibraryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();

    for item in read {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = item.path();
        // Follows symlinks, same as the file manager would.
        let kind = if path.is_dir() {
            EntryKind::Directory
        } else if is_audio(&path) {
            EntryKind::Audio
        } else {
            continue;
        };

        out.push(Entry { name, path, kind });
    }

    sort_entries(&mut out);
    Ok(out)
}

/// Directories before files, then case-insensitive name.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|e| (!e.is_dir(), e.name.to_lowercase()));
}

pub fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// `stored` if it is a folder we can use, otherwise `home`.
pub fn resolve_location(stored: &Path, home: &Path) -> PathBuf {
    if stored.is_dir() {
        stored.to_path_buf()
    } else {
        home.to_path_buf()
    }
}

/// The user's home folder, or `.` when the platform has none.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn lists_dirs_first_then_audio_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        fs::create_dir(root.join("zeta")).unwrap();
        fs::create_dir(root.join("Alpha")).unwrap();
        fs::create_dir(root.join(".hidden_dir")).unwrap();
        touch(root, "b.MP3");
        touch(root, "A.flac");
        touch(root, "c.wav");
        touch(root, ".secret.mp3");
        touch(root, "notes.txt");
        touch(root, "cover.jpg");
        touch(root, "noext");

        let entries = list_dir(root).unwrap();

        assert_eq!(names(&entries), ["Alpha", "zeta", "A.flac", "b.MP3", "c.wav"]);
        assert!(entries[0].is_dir());
        assert!(entries[1].is_dir());
        assert!(entries[2..].iter().all(|e| e.kind == EntryKind::Audio));
        assert_eq!(entries[3].path, root.join("b.MP3"));
    }

    #[test]
    fn every_known_extension_is_listed() {
        let tmp = TempDir::new().unwrap();
        for ext in AUDIO_EXTENSIONS {
            touch(tmp.path(), &format!("track.{}", ext.to_uppercase()));
        }

        let entries = list_dir(tmp.path()).unwrap();
        assert_eq!(entries.len(), AUDIO_EXTENSIONS.len());
    }

    #[test]
    fn empty_folder_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(list_dir(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_folder_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("gone");

        let err = list_dir(&gone).unwrap_err();
        assert!(matches!(err, LibraryError::ReadDir { path, .. } if path == gone));
    }

    #[test]
    fn resolve_location_falls_back_to_home() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        fs::create_dir(&home).unwrap();
        let music = tmp.path().join("music");
        fs::create_dir(&music).unwrap();
        touch(tmp.path(), "file.mp3");

        assert_eq!(resolve_location(&music, &home), music);
        assert_eq!(resolve_location(&tmp.path().join("deleted"), &home), home);
        assert_eq!(resolve_location(&tmp.path().join("file.mp3"), &home), home);
    }
}
