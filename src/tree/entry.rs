//! Entry and summary types produced by a walk

use std::io;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
}

/// One listed directory or file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Final path component (the root's own directory name for the root).
    pub name: String,
    /// Path relative to the walk root; empty for the root.
    pub relative_path: PathBuf,
    pub kind: EntryKind,
    /// Number of path components in `relative_path`. The root is 0.
    pub depth: usize,
    pub is_root: bool,
}

impl TreeEntry {
    pub(crate) fn root(name: String) -> Self {
        Self {
            name,
            relative_path: PathBuf::new(),
            kind: EntryKind::Dir,
            depth: 0,
            is_root: true,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// A subdirectory left out because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub kind: io::ErrorKind,
}

/// Counts for a finished walk. The root directory is not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub dir_count: usize,
    pub file_count: usize,
    pub skipped: Vec<SkippedPath>,
}
