//! Application configuration model.
//!
//! Every field has a default so a partial (or missing) `config.toml` is
//! always usable.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default generation timeout in seconds.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// Default number of feed items per page.
pub const DEFAULT_FEED_PAGE_SIZE: usize = 20;
/// Upper bound for the feed page size.
pub const MAX_FEED_PAGE_SIZE: usize = 100;

/// Root configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LabConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub feed: FeedSettings,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            generation: GenerationSettings::default(),
            upload: UploadSettings::default(),
            feed: FeedSettings::default(),
        }
    }
}

/// Generation Service settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Upper bound for one generation call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Base URL of a remote generation API. The stub service is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Simulated latency of the stub service.
    #[serde(default = "default_stub_delay_ms")]
    pub stub_delay_ms: u64,
}

impl GenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            api_url: None,
            api_key: None,
            stub_delay_ms: default_stub_delay_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl FeedSettings {
    /// Page size clamped to `1..=MAX_FEED_PAGE_SIZE`.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_FEED_PAGE_SIZE)
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_GENERATION_TIMEOUT_SECS
}

fn default_stub_delay_ms() -> u64 {
    2000
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_page_size() -> usize {
    DEFAULT_FEED_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LabConfig = toml::from_str(
            r#"
[generation]
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.generation.timeout(), Duration::from_secs(5));
        assert_eq!(config.generation.stub_delay_ms, 2000);
        assert_eq!(config.upload.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.feed.page_size, DEFAULT_FEED_PAGE_SIZE);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(FeedSettings { page_size: 0 }.effective_page_size(), 1);
        assert_eq!(FeedSettings { page_size: 500 }.effective_page_size(), 100);
        assert_eq!(FeedSettings { page_size: 30 }.effective_page_size(), 30);
    }
}
