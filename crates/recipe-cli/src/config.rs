//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use recipe_core::query::SortOption;
use recipe_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const APP_DIR_NAME: &str = "recipe-circle";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub db_path: Option<String>,
    #[serde(default)]
    pub default_sort: Option<SortOption>,
    #[serde(default)]
    pub default_limit: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            db_path: None,
            default_sort: None,
            default_limit: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

/// Config file location, honoring `RECIPES_CONFIG_PATH`
pub fn default_config_path() -> PathBuf {
    if let Some(path) = normalize_text_option(std::env::var("RECIPES_CONFIG_PATH").ok()) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Per-user data directory for the recipe database
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Configured database file, if any
    pub fn db_path(&self) -> Option<PathBuf> {
        normalize_text_option(self.db_path.clone()).map(PathBuf::from)
    }

    fn normalize(&mut self) {
        self.db_path = normalize_text_option(self.db_path.take());
        self.default_limit = self.default_limit.filter(|limit| *limit > 0);
    }
}
