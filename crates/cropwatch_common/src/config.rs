//! Client configuration.
//!
//! Configuration lives in `~/.config/cropwatch/config.toml` and every field
//! has a default, so a missing file is not an error. Discovery chain:
//!
//! 1. `$CROPWATCH_CONFIG` (explicit override)
//! 2. `$XDG_CONFIG_HOME/cropwatch/config.toml`
//! 3. `~/.config/cropwatch/config.toml`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "cropwatch";
const CONFIG_FILE: &str = "config.toml";

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL of the field gateway.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub location: LocationSettings,

    #[serde(default)]
    pub poll: PollSettings,

    #[serde(default)]
    pub thresholds: ThresholdSettings,
}

/// Farm coordinates, passed to the weather endpoint when set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationSettings {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Polling cadence and history depth for the live panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    /// Sensor panel refresh interval (seconds).
    #[serde(default = "default_sensors_secs")]
    pub sensors_secs: u64,

    /// Detection log refresh interval (seconds).
    #[serde(default = "default_detections_secs")]
    pub detections_secs: u64,

    /// Weather widget refresh interval (seconds).
    #[serde(default = "default_weather_secs")]
    pub weather_secs: u64,

    /// Snapshots retained per panel, most recent first.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Per-request timeout (seconds).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Detection records requested per poll.
    #[serde(default = "default_detection_limit")]
    pub detection_limit: usize,
}

/// Status thresholds for the render projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Soil moisture (percent) strictly below this needs irrigation.
    #[serde(default = "default_soil_moisture_pct")]
    pub soil_moisture_pct: f64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5050".to_string()
}

fn default_sensors_secs() -> u64 {
    5
}

fn default_detections_secs() -> u64 {
    3
}

fn default_weather_secs() -> u64 {
    60
}

fn default_history_cap() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_detection_limit() -> usize {
    10
}

fn default_soil_moisture_pct() -> f64 {
    20.0
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            sensors_secs: default_sensors_secs(),
            detections_secs: default_detections_secs(),
            weather_secs: default_weather_secs(),
            history_cap: default_history_cap(),
            request_timeout_secs: default_request_timeout_secs(),
            detection_limit: default_detection_limit(),
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            soil_moisture_pct: default_soil_moisture_pct(),
        }
    }
}

impl Config {
    /// Load configuration from the discovery chain, falling back to defaults.
    pub fn load() -> Self {
        match Self::discover_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default_filled()
            }),
            _ => Self::default_filled(),
        }
    }

    /// Parse a specific config file.
    pub fn load_from(path: &std::path::Path) -> Result<Self, crate::error::ApiError> {
        let text = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| crate::error::ApiError::Envelope(format!("config parse: {}", e)))?;
        Ok(config)
    }

    /// Defaults with every nested section populated.
    pub fn default_filled() -> Self {
        Self {
            base_url: default_base_url(),
            location: LocationSettings::default(),
            poll: PollSettings::default(),
            thresholds: ThresholdSettings::default(),
        }
    }

    fn discover_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CROPWATCH_CONFIG") {
            return Some(PathBuf::from(path));
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join(CONFIG_DIR).join(CONFIG_FILE));
        }

        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}
