//! Where ignore-rule lines come from

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RulesError;

/// File name probed by [`detect_ignore_file`].
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Number of directories probed: the start directory plus three ancestors.
const DETECT_LEVELS: usize = 4;

/// Look for a `.gitignore` in `start` and its nearest ancestors.
pub fn detect_ignore_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(DETECT_LEVELS)
        .map(|dir| dir.join(IGNORE_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Read an ignore file into lines.
pub fn read_rule_lines(path: &Path) -> Result<Vec<String>, RulesError> {
    let content = fs::read_to_string(path).map_err(|source| RulesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_lines(&content))
}

/// Split rule text (an ignore file or saved exclusions) into lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// The rule sources for one tree-generation request.
///
/// Sources are concatenated in field order, so saved exclusions override the
/// ignore file and extra patterns override both.
#[derive(Debug, Clone, Default)]
pub struct RuleSources {
    pub ignore_file: Option<PathBuf>,
    pub exclusions: Option<String>,
    pub extra: Vec<String>,
}

impl RuleSources {
    pub fn is_empty(&self) -> bool {
        self.ignore_file.is_none()
            && self.exclusions.as_deref().is_none_or(str::is_empty)
            && self.extra.is_empty()
    }

    /// Collect every rule line in evaluation order.
    pub fn resolve(&self) -> Result<Vec<String>, RulesError> {
        let mut lines = Vec::new();
        if let Some(ref path) = self.ignore_file {
            let file_lines = read_rule_lines(path)?;
            tracing::info!("loaded {} lines from {}", file_lines.len(), path.display());
            lines.extend(file_lines);
        }
        if let Some(ref text) = self.exclusions {
            lines.extend(split_lines(text));
        }
        lines.extend(self.extra.iter().cloned());
        Ok(lines)
    }
}
