//! Streaming output formatter
//!
//! This module provides `StreamingFormatter` which writes each entry as soon
//! as the walker produces it, for use with `TreeWalker::walk`.

use std::io;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::tree::{TreeEntry, TreeSink, WalkSummary};

use super::config::OutputConfig;
use super::text::marker;

/// Streaming output formatter - outputs directly without buffering.
pub struct StreamingFormatter<W: WriteColor = StandardStream> {
    config: OutputConfig,
    out: W,
}

impl StreamingFormatter {
    /// Formatter writing to stdout.
    pub fn new(config: OutputConfig) -> Self {
        let choice = config.color;
        Self::with_writer(config, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn with_writer(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: WriteColor> TreeSink for StreamingFormatter<W> {
    fn output_entry(&mut self, entry: &TreeEntry) -> io::Result<()> {
        let style = self.config.style;
        write!(
            self.out,
            "{}{}",
            style.indent().repeat(entry.depth),
            marker(entry.kind, style)
        )?;

        if entry.is_dir() {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        } else {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
        }
        write!(self.out, "{}", entry.name)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn finish(&mut self, summary: &WalkSummary) -> io::Result<()> {
        if self.config.show_summary {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "{} directories, {} files",
                summary.dir_count, summary.file_count
            )?;
        }
        self.out.flush()
    }
}
