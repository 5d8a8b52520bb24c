//! One-call tree generation returning formatted lines

use std::path::Path;

use crate::error::TreeError;
use crate::matcher::Matcher;
use crate::output::{LineCollector, TreeStyle};

use super::config::WalkerConfig;
use super::entry::WalkSummary;
use super::walker::TreeWalker;

/// Formatted output of one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeListing {
    pub lines: Vec<String>,
    pub summary: WalkSummary,
}

impl TreeListing {
    /// All lines, each terminated by a newline.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// List `root` with the default walker configuration and style.
///
/// With no matcher every entry is listed.
pub fn build(root: &Path, matcher: Option<&Matcher>) -> Result<TreeListing, TreeError> {
    let mut walker = TreeWalker::new(WalkerConfig::default());
    if let Some(matcher) = matcher {
        walker = walker.with_matcher(matcher.clone());
    }
    walker.listing(root, TreeStyle::default())
}

impl TreeWalker {
    /// Walk `root` and collect its formatted lines.
    pub fn listing(&self, root: &Path, style: TreeStyle) -> Result<TreeListing, TreeError> {
        let mut collector = LineCollector::new(style);
        let summary = self.walk(root, &mut collector)?;
        Ok(TreeListing {
            lines: collector.into_lines(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;

    #[test]
    fn test_build_scenario_with_log_rule() {
        let tree = TestTree::new();
        tree.add_file("a/x.txt", "");
        tree.add_file("b/y.log", "");
        let root_name = tree.path().file_name().unwrap().to_string_lossy().to_string();

        let matcher = Matcher::compile(["*.log"]);
        let listing = build(tree.path(), Some(&matcher)).unwrap();
        assert_eq!(
            listing.lines,
            vec![
                format!("├ 📁{root_name}"),
                "│   ├ 📁a".to_string(),
                "│   │   ├ 📄x.txt".to_string(),
                "│   ├ 📁b".to_string(),
            ]
        );
        assert!(!listing.to_text().contains("y.log"));
    }

    #[test]
    fn test_build_without_matcher_lists_everything_once() {
        let tree = TestTree::new();
        tree.add_file("a/x.txt", "");
        tree.add_file("a/y.log", "");
        tree.add_file("b/c/z.md", "");
        tree.add_file(".hidden", "");

        let listing = build(tree.path(), None).unwrap();
        assert_eq!(listing.lines.len(), 1 + 7);
        for name in ["📁a", "📄x.txt", "📄y.log", "📁b", "📁c", "📄z.md", "📄.hidden"] {
            let hits = listing.lines.iter().filter(|l| l.ends_with(name)).count();
            assert_eq!(hits, 1, "{name} should appear once in {:?}", listing.lines);
        }
    }

    #[test]
    fn test_build_empty_subdirectory() {
        let tree = TestTree::new();
        tree.add_dir("empty");

        let listing = build(tree.path(), None).unwrap();
        assert_eq!(listing.lines.len(), 2);
        assert_eq!(listing.lines[1], "│   ├ 📁empty");
        assert_eq!(listing.summary.dir_count, 1);
        assert_eq!(listing.summary.file_count, 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let tree = TestTree::new();
        tree.add_file("src/main.rs", "");
        tree.add_file("src/lib.rs", "");
        tree.add_file("target/debug/app", "");
        tree.add_file("notes.log", "");

        let matcher = Matcher::compile(["target/", "*.log"]);
        let first = build(tree.path(), Some(&matcher)).unwrap();
        let second = build(tree.path(), Some(&matcher)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_node_modules_pruned_at_any_depth() {
        let tree = TestTree::new();
        tree.add_file("node_modules/pkg/index.js", "");
        tree.add_file("web/node_modules/pkg/index.js", "");
        tree.add_file("web/app.js", "");

        let matcher = Matcher::compile(["node_modules"]);
        let text = build(tree.path(), Some(&matcher)).unwrap().to_text();
        assert!(!text.contains("node_modules"));
        assert!(!text.contains("index.js"));
        assert!(text.contains("📄app.js"));
    }

    #[test]
    fn test_build_missing_root() {
        let tree = TestTree::new();
        let err = build(&tree.path().join("nope"), None).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }
}
