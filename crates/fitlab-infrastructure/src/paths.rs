//! Path management for fitlab configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/fitlab/            # Config directory (platform default)
//! └── config.toml              # Application configuration
//! ```

use std::path::PathBuf;

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

/// Resolves fitlab's well-known paths.
pub struct FitlabPaths;

impl FitlabPaths {
    const APP_DIR: &'static str = "fitlab";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Returns the fitlab configuration directory (e.g., `~/.config/fitlab/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(Self::CONFIG_FILE))
    }
}
