//! Wire types for the field gateway API.
//!
//! One reconciled contract per endpoint. Earlier gateway versions returned
//! unit-suffixed strings for sensor values and an unwrapped vision shape;
//! those are not supported. Values here are numeric and formatting is left
//! to the render projection.

use serde::{Deserialize, Serialize};

/// Current readings from the field sensor suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative air humidity, percent.
    pub humidity: f64,
    /// Volumetric soil moisture, percent.
    pub soil_moisture: f64,
}

/// Current weather at the farm location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub condition: String,
    pub temp_c: f64,
    pub humidity_pct: f64,
    pub wind_kph: f64,
    /// Agronomic advisory derived by the gateway, e.g. "Rain expected.
    /// Delay fertilizer application."
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_alert: Option<String>,
}

/// One detection from vision analysis of an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    /// Confidence as a fraction in [0, 1].
    pub confidence: f64,
}

/// One row of the detection log / diagnosis history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub label: String,
    pub confidence: f64,
    /// Epoch seconds at which the detection was recorded.
    pub timestamp: f64,
    /// Origin of the detection: "video_feed", "upload", ...
    #[serde(default)]
    pub source: String,
}

/// Assistant reply to a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Answer provenance: "rule_based", "gpt_fallback", "system_error".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Active system alerts attached opportunistically by the gateway.
    #[serde(default)]
    pub warnings: Vec<String>,
}
