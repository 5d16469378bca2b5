//! Configuration management for Tributary.
//!
//! Configuration is read from `~/.config/tributary/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

use crate::compose::pipeline::DEFAULT_PAGE_LIMIT;

pub const DEFAULT_BASE_URL: &str = "https://ile-api.essentialdeveloper.com/essential-feed";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Items requested per feed page
    pub page_limit: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout_secs: 10,
            user_agent: "tributary/0.1.0".to_string(),
        }
    }
}

/// Local cache settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// SQLite database path; defaults to `<data dir>/tributary/tributary.db`
    pub db_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Endpoints are appended to `api.base_url` as path segments, so it must
    /// be a hierarchical URL such as `https://host/path`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url.clone()));
        }
        Ok(())
    }

    /// Get the default config file path: `~/.config/tributary/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tributary").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        format!(
            r##"# Tributary Configuration

[api]
# Root of the feed API
base_url = "{DEFAULT_BASE_URL}"

# Items requested per feed page
page_limit = {DEFAULT_PAGE_LIMIT}

# Request timeout in seconds
timeout_secs = 10

user_agent = "tributary/0.1.0"

[cache]
# SQLite database holding the cached feed and image data.
# Defaults to the platform data directory when unset.
# db_path = "/path/to/tributary.db"
"##
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Base URL {0} cannot have endpoint paths appended")]
    InvalidBaseUrl(Url),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.api.page_limit, DEFAULT_PAGE_LIMIT);
        assert!(config.cache.db_path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
base_url = "https://feed.example.com/api/"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.base_url.as_str(), "https://feed.example.com/api/");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.api.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let content = r##"
[api]
base_url = "not a url"
"##;
        assert!(toml::from_str::<Config>(content).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[cache]\ndb_path = \"/tmp/feed.db\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.cache.db_path, Some(PathBuf::from("/tmp/feed.db")));
    }

    #[test]
    fn test_load_from_rejects_base_url_without_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"mailto:feed@example.com\"\n").unwrap();

        let result = Config::load_from(&path);

        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
