//! gettree - directory tree listings filtered by .gitignore-style rules

pub mod config;
pub mod error;
pub mod matcher;
pub mod output;
pub mod rules;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::TreeConfig;
pub use error::{ConfigError, PathError, PatternError, RulesError, TreeError};
pub use matcher::{IgnoreRule, Matcher, Verdict};
pub use output::{LineCollector, OutputConfig, StreamingFormatter, TreeStyle, print_json};
pub use rules::{RuleSources, detect_ignore_file, read_rule_lines};
pub use tree::{
    CancelFlag, EntryKind, SkippedPath, TreeEntry, TreeListing, TreeNode, TreeSink, TreeWalker,
    WalkSummary, WalkerConfig, build,
};
