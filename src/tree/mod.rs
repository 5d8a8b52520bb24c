//! Directory tree walking logic
//!
//! `TreeWalker` streams entries to any `TreeSink` in output order. On top of
//! that, `walk_tree` materializes a `TreeNode` for JSON output and `build`
//! returns formatted lines in one call.

mod config;
mod entry;
mod listing;
mod node;
mod utils;
mod walker;

// Re-export public types
pub use config::{CancelFlag, WalkerConfig};
pub use entry::{EntryKind, SkippedPath, TreeEntry, WalkSummary};
pub use listing::{TreeListing, build};
pub use node::TreeNode;
pub use utils::relative_key;
pub use walker::{TreeSink, TreeWalker};
