//! Path management for wavesync configuration files.

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "WAVESYNC_CONFIG";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for wavesync.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/wavesync/          # Config directory (platform default)
/// └── config.toml              # Portal configuration
/// ```
pub struct WavesyncPaths;

impl WavesyncPaths {
    /// Returns the wavesync configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/wavesync/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("wavesync"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the configuration file.
    ///
    /// `WAVESYNC_CONFIG` takes precedence over the platform default.
    pub fn config_file() -> Result<PathBuf, PathError> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
