// Local configuration: `~/.quire/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The original development endpoint; overridable via config.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Root directory for Quire global state: `~/.quire/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quire"))
}

/// Path to the global config file: `~/.quire/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

/// Global configuration at `~/.quire/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Remote store base URL; `DEFAULT_API_URL` when unset.
    pub api_url: Option<String>,
    /// Preferred display name for registration.
    pub display_name: Option<String>,
}

impl GlobalConfig {
    /// Load from `~/.quire/config.toml`. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        global_config_path().and_then(|p| Self::load_from(&p).ok()).unwrap_or_default()
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save to `~/.quire/config.toml`.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = global_config_path().ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        self.save_to(&path)
    }

    /// Save to a specific path (creates parent directories).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Effective remote store base URL.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(std::io::Error),
    #[error("config parse error: {0}")]
    Parse(toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = GlobalConfig {
            api_url: Some("https://store.example.com/api".into()),
            display_name: Some("Ada".into()),
        };
        config.save_to(&path).unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display_name = \"Ada\"\n").unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded.display_name.as_deref(), Some("Ada"));
        assert_eq!(loaded.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn unreadable_config_degrades_to_defaults_via_load() {
        // `load` must never fail; it falls back on any error.
        let config = GlobalConfig::default();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
    }
}
