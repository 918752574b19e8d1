//! Init command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;

use ecoquest::config::Config;

/// Default configuration content for ecoquest init
pub const DEFAULT_CONFIG: &str = r#"# EcoQuest Configuration
# =======================

[settings]
# SQLite database file (default: ~/.ecoquest/ecoquest.db)
# database_path = "/var/lib/ecoquest/ecoquest.db"

# HTTP API
[settings.server]
bind = "127.0.0.1"
port = 5000
"#;

/// Write the default configuration.
/// By default creates the global config at ~/.ecoquest/config.toml
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.settings.server.port, 5000);
        assert!(config.settings.database_path.is_none());
    }

    #[test]
    fn test_init_keeps_existing_file_unless_forced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(init_command(Some(path.clone()), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        init_command(Some(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_init_creates_missing_parent_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_command(Some(path.clone()), false).unwrap();
        assert!(Config::from_file(&path).is_ok());
    }
}
