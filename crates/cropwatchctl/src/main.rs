//! Cropwatch Control - terminal client for the field monitoring gateway.

mod cli;
mod commands;
mod dashboard;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use cropwatch_common::{ApiClient, Config};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Background poll noise stays out of the way unless RUST_LOG asks.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    if let Err(e) = run(args).await {
        // Interactive failures surface inline; chained causes included.
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let client = ApiClient::from_config(&config)?;

    match args.command {
        Commands::Dashboard => dashboard::run(config).await,
        Commands::Sensors { json } => commands::sensors(&client, &config, json).await,
        Commands::Weather { lat, lon, json } => {
            commands::weather(&client, &config, lat, lon, json).await
        }
        Commands::Logs { limit, json } => commands::logs(&client, limit, json).await,
        Commands::Chat { message } => commands::chat(&client, &message).await,
        Commands::Analyze { image } => commands::analyze(&client, &image).await,
    }
}
