//! Materialized tree for JSON output

use std::io;
use std::path::PathBuf;

use serde::Serialize;

use super::entry::{EntryKind, TreeEntry};
use super::walker::TreeSink;

/// TreeNode for JSON output - builds full tree in memory.
/// For console output, stream entries through a `TreeSink` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    File {
        name: String,
        path: PathBuf,
    },
    Dir {
        name: String,
        path: PathBuf,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name, .. } => name,
            TreeNode::Dir { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Dir { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }
}

/// Sink that rebuilds the nested structure from the pre-order entry stream.
///
/// `stack[d]` is the open directory at depth `d`.
#[derive(Debug, Default)]
pub(crate) struct NodeBuilder {
    stack: Vec<TreeNode>,
}

impl NodeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Close directories until the one at `depth - 1` is on top.
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(node) = self.stack.pop() else {
                break;
            };
            match self.stack.last_mut() {
                Some(TreeNode::Dir { children, .. }) => children.push(node),
                _ => {
                    // The root itself: keep it as the only element
                    self.stack.push(node);
                    break;
                }
            }
        }
    }

    pub(crate) fn into_tree(mut self) -> TreeNode {
        self.close_to(1);
        self.stack.pop().unwrap_or_else(|| TreeNode::Dir {
            name: ".".to_string(),
            path: PathBuf::new(),
            children: Vec::new(),
        })
    }
}

impl TreeSink for NodeBuilder {
    fn output_entry(&mut self, entry: &TreeEntry) -> io::Result<()> {
        if entry.is_root {
            // A new walk starts a new tree
            self.stack.clear();
        }
        self.close_to(entry.depth);
        let node = match entry.kind {
            EntryKind::Dir => TreeNode::Dir {
                name: entry.name.clone(),
                path: entry.relative_path.clone(),
                children: Vec::new(),
            },
            EntryKind::File => TreeNode::File {
                name: entry.name.clone(),
                path: entry.relative_path.clone(),
            },
        };

        match node {
            TreeNode::Dir { .. } => self.stack.push(node),
            TreeNode::File { .. } => match self.stack.last_mut() {
                Some(TreeNode::Dir { children, .. }) => children.push(node),
                _ => self.stack.push(node),
            },
        }
        Ok(())
    }
}
