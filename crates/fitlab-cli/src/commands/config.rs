use anyhow::{Context, Result};
use fitlab_core::config::LabConfig;

pub fn print(config: &LabConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
