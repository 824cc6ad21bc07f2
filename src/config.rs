//! refwatch configuration types and loading

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::watcher::WatcherConfig;

/// Main refwatch configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Polling behaviour shared by all watched repositories
    pub watcher: WatcherConfig,

    /// Repositories to watch
    pub repos: Vec<RepoConfig>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if self.watcher.poll_interval_ms == 0 {
            return Err(eyre!("watcher.poll-interval-ms must be greater than zero"));
        }
        if self.watcher.channel_capacity == 0 {
            return Err(eyre!("watcher.channel-capacity must be greater than zero"));
        }

        let mut seen = HashSet::new();
        for repo in &self.repos {
            if repo.name.trim().is_empty() {
                return Err(eyre!("Repository at {} has an empty name", repo.path.display()));
            }
            if !seen.insert(repo.name.as_str()) {
                return Err(eyre!("Repository name '{}' is used more than once", repo.name));
            }
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .refwatch.yml
        let local_config = PathBuf::from(".refwatch.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/refwatch/refwatch.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("refwatch").join("refwatch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// One watched repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Display name stamped on every event from this repository
    pub name: String,

    /// Path to the repository's working tree (or bare repository)
    pub path: PathBuf,
}

impl std::str::FromStr for RepoConfig {
    type Err = String;

    /// Parse `NAME=PATH`, or a bare `PATH` named after its last component
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((name, path)) = s.split_once('=') {
            if name.is_empty() || path.is_empty() {
                return Err(format!("Invalid repository '{}'. Use NAME=PATH or PATH", s));
            }
            return Ok(Self {
                name: name.to_string(),
                path: PathBuf::from(path),
            });
        }

        let path = PathBuf::from(s);
        // `.` and `..` have no file name until resolved
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .or_else(|| {
                fs::canonicalize(&path)
                    .ok()
                    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            })
            .ok_or_else(|| format!("Cannot derive a name from '{}'. Use NAME=PATH", s))?;
        Ok(Self { name, path })
    }
}
