//! Tracing initialisation for fitlab binaries.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 4] = [
    "fitlab",
    "fitlab_core",
    "fitlab_application",
    "fitlab_infrastructure",
];

/// Builds the filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialises a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(level)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_all_crates() {
        assert_eq!(
            default_filter("debug"),
            "fitlab=debug,fitlab_core=debug,fitlab_application=debug,fitlab_infrastructure=debug"
        );
        assert!(EnvFilter::try_new(default_filter("info")).is_ok());
    }
}
