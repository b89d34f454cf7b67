//! CLI configuration
//!
//! An optional `questline.toml` next to where the CLI runs can pin the
//! snapshot store directory. Precedence: CLI flag, then config file, then
//! the platform-local data directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "questline.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory quest snapshots are stored in.
    pub store_dir: Option<PathBuf>,
}

impl Config {
    /// Load `questline.toml` from `dir` if present; defaults otherwise.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Resolve the store directory against an optional CLI override.
    pub fn resolve_store_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.store_dir.clone())
            .unwrap_or_else(default_store_dir)
    }
}

fn default_store_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("questline")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert!(config.store_dir.is_none());
    }

    #[test]
    fn test_config_store_dir_is_read() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "store_dir = \"/tmp/quest-store\"\n",
        )
        .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(
            config.resolve_store_dir(None),
            PathBuf::from("/tmp/quest-store")
        );
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            store_dir: Some(PathBuf::from("/from-config")),
        };
        assert_eq!(
            config.resolve_store_dir(Some(PathBuf::from("/from-cli"))),
            PathBuf::from("/from-cli")
        );
    }
}
