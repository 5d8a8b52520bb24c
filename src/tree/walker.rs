//! TreeWalker - streams filtered entries to a sink in tree order

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PathError, TreeError};
use crate::matcher::Matcher;

use super::config::WalkerConfig;
use super::entry::{EntryKind, SkippedPath, TreeEntry, WalkSummary};
use super::node::{NodeBuilder, TreeNode};
use super::utils::{SortedEntries, classify, read_sorted, relative_key, root_name};

/// Receives entries in output order.
pub trait TreeSink {
    fn output_entry(&mut self, entry: &TreeEntry) -> io::Result<()>;

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        Ok(())
    }
}

/// Walks a directory depth-first, pruning directories the matcher excludes.
///
/// Each directory is emitted before its files, which come before its
/// subdirectories. Siblings are sorted by name. Memory use is O(depth) apart
/// from whatever the sink keeps.
pub struct TreeWalker {
    config: WalkerConfig,
    matcher: Option<Matcher>,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self {
            config,
            matcher: None,
        }
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Walk `root`, streaming entries into `sink`.
    ///
    /// The root is always emitted first and never tested against the matcher.
    /// Unreadable subdirectories are left out and reported in the summary.
    pub fn walk<S: TreeSink>(&self, root: &Path, sink: &mut S) -> Result<WalkSummary, TreeError> {
        let entries = open_root(root)?;
        let mut summary = WalkSummary::default();

        sink.output_entry(&TreeEntry::root(root_name(root)))?;
        self.visit_dir(Path::new(""), 0, entries, sink, &mut summary)?;
        sink.finish(&summary)?;

        tracing::debug!(
            dirs = summary.dir_count,
            files = summary.file_count,
            skipped = summary.skipped.len(),
            "walk finished"
        );
        Ok(summary)
    }

    /// Walk `root` and materialize the result, e.g. for JSON output.
    pub fn walk_tree(&self, root: &Path) -> Result<(TreeNode, WalkSummary), TreeError> {
        let mut builder = NodeBuilder::new();
        let summary = self.walk(root, &mut builder)?;
        Ok((builder.into_tree(), summary))
    }

    fn visit_dir<S: TreeSink>(
        &self,
        relative: &Path,
        depth: usize,
        listing: SortedEntries,
        sink: &mut S,
        summary: &mut WalkSummary,
    ) -> Result<(), TreeError> {
        if self.config.is_cancelled() {
            return Err(TreeError::Cancelled);
        }
        if self.at_max_depth(depth) {
            return Ok(());
        }

        let child_depth = depth + 1;
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for err in listing.errors {
            record_skip(summary, dir_label(relative), err);
        }

        for entry in listing.entries {
            let child = relative.join(entry.file_name());
            let kind = match classify(&entry) {
                Ok(Some(kind)) => kind,
                Ok(None) => continue,
                Err(err) => {
                    record_skip(summary, child, err);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();
            match kind {
                EntryKind::File => files.push((name, child)),
                EntryKind::Dir => dirs.push((name, child, entry.path())),
            }
        }

        if !self.config.dirs_only {
            for (name, child) in files {
                if self.is_excluded(&child, false) {
                    tracing::trace!("excluded file {}", child.display());
                    continue;
                }
                sink.output_entry(&TreeEntry {
                    name,
                    relative_path: child,
                    kind: EntryKind::File,
                    depth: child_depth,
                    is_root: false,
                })?;
                summary.file_count += 1;
            }
        }

        for (name, child, path) in dirs {
            if self.is_excluded(&child, true) {
                tracing::debug!("pruned {}", child.display());
                continue;
            }

            // Read before emitting so an unreadable directory leaves no line behind
            let children = if self.at_max_depth(child_depth) {
                None
            } else {
                match read_sorted(&path) {
                    Ok(children) => Some(children),
                    Err(err) => {
                        record_skip(summary, child, err);
                        continue;
                    }
                }
            };

            sink.output_entry(&TreeEntry {
                name,
                relative_path: child.clone(),
                kind: EntryKind::Dir,
                depth: child_depth,
                is_root: false,
            })?;
            summary.dir_count += 1;

            if let Some(children) = children {
                self.visit_dir(&child, child_depth, children, sink, summary)?;
            }
        }

        Ok(())
    }

    fn at_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth >= max)
    }

    /// Directories are tested with a trailing separator so dir-only rules apply.
    fn is_excluded(&self, relative: &Path, is_dir: bool) -> bool {
        let Some(ref matcher) = self.matcher else {
            return false;
        };
        let mut key = relative_key(relative);
        if is_dir {
            key.push('/');
        }
        matcher.matches(&key, is_dir)
    }
}

/// Leave `path` out of the listing and report it in the summary.
fn record_skip(summary: &mut WalkSummary, path: PathBuf, err: io::Error) {
    tracing::warn!("skipping {}: {}", path.display(), err);
    summary.skipped.push(SkippedPath {
        path,
        kind: err.kind(),
    });
}

/// The root's relative path is empty; report it as `.`.
fn dir_label(relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative.to_path_buf()
    }
}

fn open_root(root: &Path) -> Result<SortedEntries, PathError> {
    let meta = fs::metadata(root).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PathError::NotFound(root.to_path_buf()),
        _ => PathError::Unreadable {
            path: root.to_path_buf(),
            source,
        },
    })?;
    if !meta.is_dir() {
        return Err(PathError::NotADirectory(root.to_path_buf()));
    }
    read_sorted(root).map_err(|source| PathError::Unreadable {
        path: PathBuf::from(root),
        source,
    })
}
