//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No GUI code
//! - No filesystem walking

use std::path::PathBuf;

/// What kind of item an `Entry` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Audio,
}

/// One item shown in the folder browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name as displayed (no parent path).
    pub name: String,
    /// Full path on disk.
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
