//! Error types for rule compilation, tree walking and configuration

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The root handed to the walker cannot be listed.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot access '{0}': No such file or directory")]
    NotFound(PathBuf),

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single ignore rule that the glob compiler rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid ignore rule on line {line_number} ({line:?}): {message}")]
pub struct PatternError {
    /// 1-based position of the rule in its source.
    pub line_number: usize,
    pub line: String,
    pub message: String,
}

/// Failure of a whole tree-generation request.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error(transparent)]
    Path(#[from] PathError),

    /// The sink failed to write a line.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),

    #[error("walk cancelled")]
    Cancelled,
}

/// Failure to obtain ignore-rule lines.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("cannot read ignore file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("I/O error for config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
