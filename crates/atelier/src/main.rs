//! Atelier CLI binary.
//!
//! Every subcommand is one user action against a [`atelier::Studio`]:
//! - Brainstorm prompts and write stories from images
//! - Narrate text and export it as WAV
//! - Generate images and videos, singly or in batches

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_command};

    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    run_command(cli).await?;

    Ok(())
}
