//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ServerSettings, Settings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration, preferring an explicit path.
    ///
    /// Falls back to `~/.ecoquest/config.toml`, then to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let global = Self::global_config_path();
        if global.exists() {
            return Self::from_file(&global);
        }

        Ok(Self::default())
    }

    /// Database file location, resolving the default when unset
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database_path
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("ecoquest.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.settings.server.port, 5000);
        assert_eq!(config.settings.server.bind, "127.0.0.1");
        assert!(config.settings.database_path.is_none());
        assert!(config.database_path().ends_with("ecoquest.db"));
    }

    #[test]
    fn test_partial_server_section() {
        let config = Config::from_toml("[settings.server]\nport = 8080\n").unwrap();
        assert_eq!(config.settings.server.port, 8080);
        assert_eq!(config.settings.server.bind, "127.0.0.1");
    }

    #[test]
    fn test_from_file_reads_database_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ndatabase_path = \"/tmp/eq.db\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/eq.db"));
    }

    #[test]
    fn test_from_file_missing_is_error() {
        let dir = tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
