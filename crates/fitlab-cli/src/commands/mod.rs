pub mod config;
pub mod try_on;

use anyhow::{Context, Result};
use fitlab_core::config::LabConfig;
use fitlab_infrastructure::ConfigService;
use std::path::Path;

/// Loads the configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<LabConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new().context("Failed to locate config directory")?,
    };
    service
        .get_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))
}
