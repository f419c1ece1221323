//! CLI - command-line argument parsing.
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cropwatch CLI
#[derive(Parser)]
#[command(name = "cropwatchctl")]
#[command(about = "Cropwatch - field monitoring dashboard client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Gateway base URL (overrides config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to config file (overrides $CROPWATCH_CONFIG and defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Live dashboard: sensors, weather, and detection log panels
    Dashboard,

    /// Show current sensor readings
    Sensors {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show current weather for the farm
    Weather {
        /// Latitude override
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude override
        #[arg(long)]
        lon: Option<f64>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show recent detection records
    Logs {
        /// Number of records to fetch
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Send a message to the assistant
    Chat {
        /// The message to send
        message: String,
    },

    /// Upload an image for plant diagnosis
    Analyze {
        /// Path to the image file
        image: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard() {
        let cli = Cli::try_parse_from(["cropwatchctl", "dashboard"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn test_parse_logs_limit() {
        let cli = Cli::try_parse_from(["cropwatchctl", "logs", "--limit", "25"]).unwrap();
        match cli.command {
            Commands::Logs { limit, json } => {
                assert_eq!(limit, 25);
                assert!(!json);
            }
            _ => panic!("expected logs"),
        }
    }

    #[test]
    fn test_global_base_url_override() {
        let cli = Cli::try_parse_from([
            "cropwatchctl",
            "sensors",
            "--base-url",
            "http://gateway.farm:8080",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://gateway.farm:8080"));
    }
}
