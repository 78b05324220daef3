//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/skillswap/config.toml).

use crate::paths::SkillSwapPaths;
use skillswap_core::config::ClientConfig;
use skillswap_core::{Result, SkillSwapError};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "SKILLSWAP_API_URL";

/// Configuration service that loads and caches the client configuration.
///
/// A missing file is not an error: defaults are used and nothing is written
/// until [`save_config`](Self::save_config) is called.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit file location; `None` resolves the platform default.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the platform default location.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading `path` (used by tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable file falls back to defaults with a warning. The
    /// `SKILLSWAP_API_URL` environment variable always wins over the file.
    pub fn get_config(&self) -> ClientConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!("[ConfigService] Using default configuration: {}", e);
            ClientConfig::default()
        });
        let config = apply_env_override(loaded, std::env::var(API_URL_ENV).ok());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        config
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Loads the configuration file without caching or overrides.
    pub fn load_config(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                path.display()
            );
            return Ok(ClientConfig::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        tracing::debug!("[ConfigService] Loaded {}", path.display());
        Ok(config)
    }

    /// Writes `config` to the configuration file and refreshes the cache.
    pub fn save_config(&self, config: &ClientConfig) -> Result<PathBuf> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config).map_err(|e| SkillSwapError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        self.invalidate_cache();
        Ok(path)
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => SkillSwapPaths::config_file().map_err(|e| SkillSwapError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the `SKILLSWAP_API_URL` override; blank values are ignored.
pub fn apply_env_override(mut config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    if let Some(url) = api_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        tracing::debug!("[ConfigService] {} overrides api_url", API_URL_ENV);
        config.api_url = url;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_core::config::DEFAULT_API_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.load_config().expect("missing file is not an error");
        assert_eq!(config, ClientConfig::default());
        assert!(!temp_dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let service = ConfigService::with_path(&path);

        let config = ClientConfig {
            api_url: "https://swap.example.com".to_string(),
            request_timeout_secs: 5,
            log_level: "debug".to_string(),
        };
        service.save_config(&config).unwrap();

        assert_eq!(service.load_config().unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();

        let err = ConfigService::with_path(&path).load_config().unwrap_err();
        assert!(matches!(err, SkillSwapError::Serialization { .. }));
    }

    #[test]
    fn test_env_override() {
        let config = apply_env_override(ClientConfig::default(), Some("http://10.0.0.2:5000".into()));
        assert_eq!(config.api_url, "http://10.0.0.2:5000");

        let config = apply_env_override(ClientConfig::default(), Some("  ".into()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = 7").unwrap();
        let service = ConfigService::with_path(&path);

        assert_eq!(service.get_config().request_timeout_secs, 7);
        std::fs::write(&path, "request_timeout_secs = 9").unwrap();
        assert_eq!(service.get_config().request_timeout_secs, 7);

        service.invalidate_cache();
        assert_eq!(service.get_config().request_timeout_secs, 9);
    }
}
