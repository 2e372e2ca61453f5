//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the Lab configuration
//! from the configuration file (~/.config/fitlab/config.toml) and applies
//! environment overrides on top of it.

use crate::paths::FitlabPaths;
use fitlab_core::config::LabConfig;
use fitlab_core::error::{LabError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Environment variable overriding `generation.api_url`.
pub const ENV_AI_API_URL: &str = "FITLAB_AI_API_URL";
/// Environment variable overriding `generation.api_key`.
pub const ENV_AI_API_KEY: &str = "FITLAB_AI_API_KEY";
/// Environment variable overriding `generation.timeout_secs`.
pub const ENV_GENERATION_TIMEOUT_SECS: &str = "FITLAB_GENERATION_TIMEOUT_SECS";
/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "FITLAB_LOG_LEVEL";

/// Configuration service that loads and caches the Lab configuration.
///
/// A missing or empty file yields the defaults.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<LabConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for the default config file.
    pub fn new() -> Result<Self> {
        let path = FitlabPaths::config_file().map_err(|e| LabError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a ConfigService for an explicit config file.
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
    pub fn get_config(&self) -> Result<LabConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| LabError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = Self::load_file(&self.path)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok())?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| LabError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Writes `config` to the config file, creating the directory if needed.
    pub fn save(&self, config: &LabConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;
        self.invalidate_cache();
        tracing::info!("[ConfigService] Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Reads a config file without applying environment overrides.
    pub fn load_file(path: &Path) -> Result<LabConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                path.display()
            );
            return Ok(LabConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(LabConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            LabError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(
    config: &mut LabConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(url) = lookup(ENV_AI_API_URL).filter(|v| !v.trim().is_empty()) {
        config.generation.api_url = Some(url);
    }
    if let Some(key) = lookup(ENV_AI_API_KEY).filter(|v| !v.trim().is_empty()) {
        config.generation.api_key = Some(key);
    }
    if let Some(timeout) = lookup(ENV_GENERATION_TIMEOUT_SECS) {
        config.generation.timeout_secs = timeout.trim().parse().map_err(|_| {
            LabError::config(format!(
                "{} must be a number of seconds, got '{}'",
                ENV_GENERATION_TIMEOUT_SECS, timeout
            ))
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));
        let config = ConfigService::load_file(service.path()).unwrap();
        assert_eq!(config, LabConfig::default());
    }

    #[test]
    fn test_load_file_reads_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[generation]
timeout_secs = 15
api_url = "https://ai.example.com"

[feed]
page_size = 5
"#
        )
        .unwrap();

        let config = ConfigService::load_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.generation.timeout_secs, 15);
        assert_eq!(config.generation.api_url.as_deref(), Some("https://ai.example.com"));
        assert_eq!(config.feed.page_size, 5);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[generation\ntimeout_secs = ").unwrap();

        let err = ConfigService::load_file(file.path()).unwrap_err();
        assert!(matches!(err, LabError::Config(_)));
    }

    #[test]
    fn test_save_then_get_config() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("nested").join("config.toml"));

        let mut config = LabConfig::default();
        config.upload.max_file_size = 1024;
        service.save(&config).unwrap();

        let loaded = ConfigService::load_file(service.path()).unwrap();
        assert_eq!(loaded.upload.max_file_size, 1024);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_AI_API_URL, "https://override"),
            (ENV_AI_API_KEY, ""),
            (ENV_GENERATION_TIMEOUT_SECS, " 30 "),
        ]);
        let mut config = LabConfig::default();

        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.generation.api_url.as_deref(), Some("https://override"));
        assert_eq!(config.generation.api_key, None);
        assert_eq!(config.generation.timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_timeout_override() {
        let mut config = LabConfig::default();
        let err = apply_env_overrides(&mut config, |key| {
            (key == ENV_GENERATION_TIMEOUT_SECS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, LabError::Config(_)));
    }
}
