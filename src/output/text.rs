//! Plain-text line formatting

use std::io;

use crate::tree::{EntryKind, TreeEntry, TreeSink};

use super::config::TreeStyle;

/// Format one entry: indentation proportional to depth, a marker, then the name.
pub fn format_entry(entry: &TreeEntry, style: TreeStyle) -> String {
    format!(
        "{}{}{}",
        style.indent().repeat(entry.depth),
        marker(entry.kind, style),
        entry.name
    )
}

pub(crate) fn marker(kind: EntryKind, style: TreeStyle) -> &'static str {
    match kind {
        EntryKind::Dir => style.dir_marker(),
        EntryKind::File => style.file_marker(),
    }
}

/// Sink that keeps every formatted line in memory.
#[derive(Debug, Default)]
pub struct LineCollector {
    style: TreeStyle,
    lines: Vec<String>,
}

impl LineCollector {
    pub fn new(style: TreeStyle) -> Self {
        Self {
            style,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl TreeSink for LineCollector {
    fn output_entry(&mut self, entry: &TreeEntry) -> io::Result<()> {
        self.lines.push(format_entry(entry, self.style));
        Ok(())
    }
}
