//! Shared utility functions for tree walking

use std::fs::{self, DirEntry};
use std::io;
use std::path::{Component, Path};

use super::entry::EntryKind;

/// Display name for the walk root.
pub fn root_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().to_string();
    }
    // Paths ending in `..` or a bare `/` have no file name
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|s| s.to_string_lossy().to_string()))
        .unwrap_or_else(|| root.display().to_string())
}

/// Root-relative path with `/` separators, the form ignore rules are written against.
pub fn relative_key(relative: &Path) -> String {
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// A directory's readable entries sorted by name, plus the errors hit
/// while enumerating it.
#[derive(Debug, Default)]
pub struct SortedEntries {
    pub entries: Vec<DirEntry>,
    pub errors: Vec<io::Error>,
}

/// Read a directory's entries sorted by name.
pub fn read_sorted(path: &Path) -> io::Result<SortedEntries> {
    let mut sorted = SortedEntries::default();
    for entry in fs::read_dir(path)? {
        match entry {
            Ok(entry) => sorted.entries.push(entry),
            Err(err) => sorted.errors.push(err),
        }
    }
    sorted.entries.sort_by_key(|a| a.file_name());
    Ok(sorted)
}

/// Decide how a directory entry is listed.
///
/// Symlinks are not followed: a link to a directory yields `None`, while
/// links to files and dangling links are listed as files.
pub fn classify(entry: &DirEntry) -> io::Result<Option<EntryKind>> {
    let file_type = entry.file_type()?;

    if file_type.is_symlink() {
        return Ok(match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => None,
            _ => Some(EntryKind::File),
        });
    }

    Ok(Some(if file_type.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::File
    }))
}
