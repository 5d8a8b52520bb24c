//! Persisted user configuration

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.json";

/// Settings remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Directory listed when no path is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,
    /// Extra rule text, one rule per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<String>,
}

/// Returns the platform-specific path of the configuration file.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", "", "gettree")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

impl TreeConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. So does a file that cannot be
    /// parsed, after logging a warning.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(
                    "failed to parse config file at {}: {}. Falling back to defaults.",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Write configuration to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("saved config to {}", path.display());
        Ok(())
    }
}
