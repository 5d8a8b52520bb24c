//! Ignore-rule matching in the style of .gitignore files

use std::path::Path;
use std::sync::Arc;

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::PatternError;

/// Matching is always performed on root-relative paths. A root of "." keeps
/// the gitignore engine from stripping any prefix off the candidates.
const MATCH_ROOT: &str = ".";

/// One non-comment line of an ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    line_number: usize,
    text: String,
    pattern: String,
    negated: bool,
    dir_only: bool,
    anchored: bool,
}

impl IgnoreRule {
    /// Parse a rule line. Returns `None` for comments, blank lines and lines
    /// that carry no pattern (a bare `!` or `/`).
    pub fn parse(line_number: usize, line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with('#') {
            return None;
        }
        // Trailing whitespace is insignificant unless escaped
        let text = if line.ends_with("\\ ") {
            line
        } else {
            line.trim_end()
        };
        if text.is_empty() {
            return None;
        }

        let mut body = text;
        let mut negated = false;
        let mut anchored = false;

        if let Some(rest) = body
            .strip_prefix('\\')
            .filter(|rest| rest.starts_with('!') || rest.starts_with('#'))
        {
            body = rest;
        } else {
            if let Some(rest) = body.strip_prefix('!') {
                negated = true;
                body = rest;
            }
            if let Some(rest) = body.strip_prefix('/') {
                anchored = true;
                body = rest;
            }
        }

        let mut dir_only = false;
        if let Some(rest) = body.strip_suffix('/') {
            dir_only = true;
            body = rest.strip_suffix('\\').unwrap_or(rest);
        }

        if body.is_empty() {
            return None;
        }
        if body.contains('/') && !body.starts_with("**/") {
            anchored = true;
        }

        Some(Self {
            line_number,
            text: text.to_string(),
            pattern: body.to_string(),
            negated,
            dir_only,
            anchored,
        })
    }

    /// 1-based line number in the rule source.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The rule as written, minus insignificant trailing whitespace.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The glob part of the rule, without `!`, leading `/` or trailing `/`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Anchored rules match relative to the traversal root instead of any basename.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }
}

/// Decision for a path after folding over every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No rule matched.
    Unmatched,
    /// The last matching rule was a plain pattern.
    Excluded,
    /// The last matching rule was a negated pattern.
    Included,
}

impl Verdict {
    pub fn is_excluded(self) -> bool {
        self == Verdict::Excluded
    }
}

impl<T> From<Match<T>> for Verdict {
    fn from(m: Match<T>) -> Self {
        match m {
            Match::None => Verdict::Unmatched,
            Match::Ignore(_) => Verdict::Excluded,
            Match::Whitelist(_) => Verdict::Included,
        }
    }
}

/// Compiled, immutable set of ignore rules.
///
/// Rules are evaluated in input order and the last matching rule decides.
/// Cloning is cheap; the compiled globs are shared.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: Arc<[IgnoreRule]>,
    gitignore: Arc<Gitignore>,
    warnings: Vec<PatternError>,
}

impl Matcher {
    /// A matcher with no rules. Excludes nothing.
    pub fn empty() -> Self {
        Self {
            rules: Arc::from(Vec::new()),
            gitignore: Arc::new(Gitignore::empty()),
            warnings: Vec::new(),
        }
    }

    /// Compile rule lines, skipping (and logging) any line the glob compiler rejects.
    pub fn compile<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match Self::compile_with(lines, false) {
            Ok(matcher) => matcher,
            // Lenient compilation records errors instead of returning them
            Err(_) => Self::empty(),
        }
    }

    /// Compile rule lines, failing on the first malformed rule.
    pub fn compile_strict<I, S>(lines: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::compile_with(lines, true)
    }

    fn compile_with<I, S>(lines: I, strict: bool) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(MATCH_ROOT);
        let mut rules = Vec::new();
        let mut warnings = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line_number = index + 1;
            let Some(rule) = IgnoreRule::parse(line_number, line) else {
                continue;
            };

            if let Err(err) = builder.add_line(None, rule.text()) {
                let error = PatternError {
                    line_number,
                    line: line.to_string(),
                    message: err.to_string(),
                };
                if strict {
                    return Err(error);
                }
                tracing::warn!("skipping {}", error);
                warnings.push(error);
                continue;
            }
            rules.push(rule);
        }

        let gitignore = match builder.build() {
            Ok(gitignore) => gitignore,
            Err(err) => {
                let error = PatternError {
                    line_number: 0,
                    line: String::new(),
                    message: err.to_string(),
                };
                if strict {
                    return Err(error);
                }
                tracing::error!("failed to build ignore matcher: {}", err);
                warnings.push(error);
                rules.clear();
                Gitignore::empty()
            }
        };

        tracing::debug!(
            rules = rules.len(),
            skipped = warnings.len(),
            "compiled ignore rules"
        );

        Ok(Self {
            rules: Arc::from(rules),
            gitignore: Arc::new(gitignore),
            warnings,
        })
    }

    /// Fold every rule over `relative_path`.
    ///
    /// A trailing `/` on the path implies directory semantics. A path lying
    /// beneath an excluded directory is excluded as well. The empty path (the
    /// root itself) is never matched.
    pub fn verdict(&self, relative_path: &str, is_dir: bool) -> Verdict {
        let is_dir = is_dir || relative_path.ends_with('/');
        let path = normalize(relative_path);
        if path.is_empty() || self.rules.is_empty() {
            return Verdict::Unmatched;
        }
        self.gitignore
            .matched_path_or_any_parents(Path::new(path), is_dir)
            .into()
    }

    /// Whether `relative_path` is excluded.
    pub fn matches(&self, relative_path: &str, is_dir: bool) -> bool {
        self.verdict(relative_path, is_dir).is_excluded()
    }

    /// Rules that compiled, in evaluation order.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Lines skipped during lenient compilation.
    pub fn warnings(&self) -> &[PatternError] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::empty()
    }
}

fn normalize(path: &str) -> &str {
    let mut path = path;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.trim_start_matches('/').trim_end_matches('/')
}
