//! Configuration loading and management

mod io;
mod sanitizer;
mod storage;
mod streak;

pub use sanitizer::SanitizerSettings;
pub use storage::StorageSettings;
pub use streak::{BadgeThresholdConfig, DayBoundaryKind, StreakSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Streak and badge settings
    #[serde(default)]
    pub streak: StreakSettings,

    /// HTML sanitization settings
    #[serde(default)]
    pub sanitizer: SanitizerSettings,

    /// Where progress is stored
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check settings that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        self.streak.day_boundary()?;
        self.sanitizer.validate()?;
        Ok(())
    }

    /// Load configuration for a project directory.
    /// Looks for: <dir>/.studyloop/config.toml, then ~/.studyloop/config.toml
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let project_path = dir.join(".studyloop/config.toml");
        if project_path.exists() {
            return Self::from_file(&project_path);
        }

        Self::load_global()
    }

    /// Load ~/.studyloop/config.toml, or defaults if it does not exist
    pub fn load_global() -> Result<Self> {
        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        tracing::debug!("No config found, using defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DayBoundaryKind;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [streak]
            day_boundary = "offset"
            utc_offset_minutes = 60

            [[streak.badges]]
            days = 5
            badge = "streak-5"

            [sanitizer]
            allowed_tags = ["p", "em"]

            [storage]
            database = "/tmp/progress.db"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.streak.day_boundary, DayBoundaryKind::Offset);
        assert_eq!(config.streak.badges.len(), 1);
        assert_eq!(config.sanitizer.allowed_tags, vec!["p", "em"]);
        assert_eq!(
            config.storage.database_path(),
            std::path::PathBuf::from("/tmp/progress.db")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.streak.day_boundary, DayBoundaryKind::Utc);
        assert_eq!(config.streak.badges.len(), 5);
        assert!(config.sanitizer.allowed_tags.contains(&"pre".to_string()));
        assert!(config.storage.database.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".studyloop/config.toml");

        let mut config = Config::default();
        config.sanitizer.allowed_tags = vec!["p".to_string()];
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_dir(dir.path()).unwrap();
        assert_eq!(loaded.sanitizer.allowed_tags, vec!["p"]);
        assert_eq!(loaded.streak.badges, config.streak.badges);
    }

    #[test]
    fn test_invalid_offset_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[streak]\nday_boundary = \"offset\"\nutc_offset_minutes = 5000\n",
        )
        .unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_stripped_tag_in_allow_list_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sanitizer]\nallowed_tags = [\"p\", \"script\"]\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("script"));
    }

    #[test]
    fn test_save_raw_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(Config::save_raw(&path, "[sanitizer]\nallowed_tags = [\"style\"]\n").is_err());
        assert!(!path.exists());

        Config::save_raw(&path, "# empty\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# empty\n");
    }
}
