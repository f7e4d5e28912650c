//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the portal configuration
//! from the configuration file (~/.config/wavesync/config.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use wavesync_core::config::PortalConfig;
use wavesync_core::error::{Result, WaveError};

use crate::paths::WavesyncPaths;

/// Configuration service that loads and caches the portal configuration.
///
/// This implementation reads the configuration from config.toml
/// and caches it to avoid repeated file I/O operations.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<PortalConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for the default config path.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Result<Self> {
        let path = WavesyncPaths::config_file().map_err(|e| WaveError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a ConfigService reading from an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// Falls back to defaults (with a warning) when the file is unreadable.
    pub fn get_config(&self) -> PortalConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|p| p.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("[ConfigService] Using default configuration: {}", e);
            PortalConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap_or_else(|p| p.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|p| p.into_inner());
        *write_lock = None;
    }

    /// Reads the configuration from disk, bypassing the cache.
    ///
    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<PortalConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                self.path.display()
            );
            return Ok(PortalConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Writes `config` to disk and refreshes the cache.
    pub fn save(&self, config: &PortalConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;

        let mut write_lock = self.config.write().unwrap_or_else(|p| p.into_inner());
        *write_lock = Some(config.clone());
        tracing::info!("[ConfigService] Saved config to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config(), PortalConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let service = ConfigService::with_path(&path);

        let config = PortalConfig {
            gas_limit: Some(300_000),
            confirmation_timeout_secs: 30,
            ..PortalConfig::default()
        };
        service.save(&config).unwrap();

        let fresh = ConfigService::with_path(&path);
        assert_eq!(fresh.get_config(), config);
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().log_level, "info");

        fs::write(&path, "log_level = \"debug\"\n").unwrap();
        assert_eq!(service.get_config().log_level, "info");

        service.invalidate_cache();
        assert_eq!(service.get_config().log_level, "debug");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "gas_limit = \"lots\"").unwrap();
        let service = ConfigService::with_path(&path);

        let err = service.load().unwrap_err();
        assert!(matches!(err, WaveError::Serialization { .. }));
        // The cached accessor falls back to defaults instead.
        assert_eq!(service.get_config(), PortalConfig::default());
    }
}
