//! JSON output formatting

use std::io::{self, Write};

use crate::tree::TreeNode;

/// Render a tree node as pretty-printed JSON.
pub fn to_json(node: &TreeNode) -> io::Result<String> {
    serde_json::to_string_pretty(node).map_err(io::Error::other)
}

/// Print tree node as pretty-printed JSON to stdout.
pub fn print_json(node: &TreeNode) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", to_json(node)?)?;
    out.flush()
}
