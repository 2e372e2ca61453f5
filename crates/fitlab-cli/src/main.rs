use anyhow::Result;
use clap::{Parser, Subcommand};
use fitlab_core::style::Fit;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "fitlab")]
#[command(about = "Fitlab - virtual try-on Lab", long_about = None)]
struct Cli {
    /// Path to an alternative config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a try-on image from a photo and garment references
    TryOn(TryOnArgs),
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args)]
pub struct TryOnArgs {
    /// Photo of the person to dress
    #[arg(long)]
    image: PathBuf,
    /// Reference for the top garment
    #[arg(long)]
    top: Option<String>,
    /// Reference for the bottom garment
    #[arg(long)]
    bottom: Option<String>,
    /// Reference for the footwear
    #[arg(long)]
    footwear: Option<String>,
    #[arg(long)]
    style: Option<String>,
    /// loose, regular or tight
    #[arg(long)]
    fit: Option<Fit>,
    #[arg(long)]
    occasion: Option<String>,
    /// Title used when saving or publishing
    #[arg(long)]
    title: Option<String>,
    /// Save the result as a draft
    #[arg(long)]
    save_draft: bool,
    /// Publish the result to the feed
    #[arg(long)]
    publish: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;
    fitlab_infrastructure::logging::init_tracing(&config.log_level)?;

    match cli.command {
        Commands::TryOn(args) => commands::try_on::run(args, &config).await?,
        Commands::Config => commands::config::print(&config)?,
    }

    Ok(())
}
