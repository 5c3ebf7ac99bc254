use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Config;

/// Storage settings (`[storage]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Progress database path (default: ~/.studyloop/progress.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl StorageSettings {
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join("progress.db"))
    }
}
