//! Application configuration management.
//!
//! Configuration is stored at `~/.config/folio/config.json`. A missing file
//! means defaults. `FOLIO_API_URL` and `FOLIO_DATA_FILE` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::preload::DEFAULT_MAX_CONCURRENT_PRELOADS;
use crate::service::DEFAULT_LOCALE;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "folio";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default cache lifetime in minutes
const DEFAULT_CACHE_MINUTES: u64 = 30;

pub const ENV_API_URL: &str = "FOLIO_API_URL";
pub const ENV_DATA_FILE: &str = "FOLIO_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the portfolio backend
    pub api_base_url: Option<String>,
    /// Local JSON document used instead of the backend
    pub data_file: Option<PathBuf>,
    pub locale: String,
    pub cache_minutes: u64,
    /// Images preloaded before the portfolio arrives
    pub critical_images: Vec<String>,
    pub max_concurrent_preloads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            data_file: None,
            locale: DEFAULT_LOCALE.to_string(),
            cache_minutes: DEFAULT_CACHE_MINUTES,
            critical_images: Vec::new(),
            max_concurrent_preloads: DEFAULT_MAX_CONCURRENT_PRELOADS,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from a variable lookup (the process environment in practice).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = Some(url);
        }
        if let Some(file) = lookup(ENV_DATA_FILE).filter(|v| !v.is_empty()) {
            self.data_file = Some(PathBuf::from(file));
        }
    }

    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_minutes.saturating_mul(60))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for logs and other local state.
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.cache_duration(), Duration::from_secs(30 * 60));
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("absent.json")).expect("Failed to load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"locale": "fr", "cache_minutes": 5}"#)
            .expect("Failed to write config");

        let config = Config::load_from(&path).expect("Failed to load");
        assert_eq!(config.locale, "fr");
        assert_eq!(config.cache_duration(), Duration::from_secs(300));
        assert_eq!(config.max_concurrent_preloads, DEFAULT_MAX_CONCURRENT_PRELOADS);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ locale").expect("Failed to write config");

        let err = Config::load_from(&path).expect_err("Malformed config should fail");
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            ENV_API_URL => Some("https://override.example".to_string()),
            ENV_DATA_FILE => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api_base_url.as_deref(), Some("https://override.example"));
        assert!(config.data_file.is_none());
    }
}
