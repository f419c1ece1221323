//! HTTP client for the field gateway.
//!
//! Thin and stateless: attach base URL, send, check status, unwrap the
//! envelope, decode. Failure policy belongs to callers — the client never
//! substitutes defaults for a failed call.

use crate::config::Config;
use crate::envelope;
use crate::error::ApiError;
use crate::types::{ChatReply, Detection, DetectionRecord, SensorReading, WeatherReport};
use serde_json::Value;
use std::time::Duration;

/// Client for the field gateway's versioned JSON API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with a bounded per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.poll.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of the MJPEG video feed. Consumed directly as an image
    /// stream, never polled as JSON.
    pub fn video_feed_url(&self) -> String {
        format!("{}/api/v1/vision/feed", self.base_url)
    }

    /// Current sensor readings.
    pub async fn telemetry(&self) -> Result<SensorReading, ApiError> {
        let payload = self
            .get("/api/v1/sensors/telemetry", &[])
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Current weather, optionally for explicit coordinates.
    pub async fn weather(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<WeatherReport, ApiError> {
        let mut query = Vec::new();
        if let Some(lat) = lat {
            query.push(("lat", lat.to_string()));
        }
        if let Some(lon) = lon {
            query.push(("lon", lon.to_string()));
        }
        let payload = self.get("/api/v1/weather/current", &query).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Recent detection records, newest first.
    pub async fn detections(&self, limit: usize) -> Result<Vec<DetectionRecord>, ApiError> {
        let payload = self
            .get("/api/v1/vision/history", &[("limit", limit.to_string())])
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Submit an image for diagnosis. Returns the detection list.
    pub async fn analyze(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<Detection>, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/api/v1/vision/analyze", self.base_url);
        let request = self.http.post(&url).multipart(form);
        let payload = self.execute("POST", "/api/v1/vision/analyze", request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Send a chat message to the assistant.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let url = format!("{}/api/v1/chat/message", self.base_url);
        let request = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "message": message }));
        let payload = self.execute("POST", "/api/v1/chat/message", request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute("GET", path, request).await
    }

    /// Send, check status, unwrap the envelope. Non-2xx bodies are probed
    /// for an error envelope so server-provided details survive.
    async fn execute(
        &self,
        method: &str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, ApiError> {
        let req_id = uuid::Uuid::new_v4();
        tracing::debug!(%req_id, method, path, "gateway request");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
                return Err(envelope::error_from_envelope(&map, status));
            }
            return Err(ApiError::Status {
                status,
                code: "Http".to_string(),
                message: if text.is_empty() {
                    format!("{} {} failed", method, path)
                } else {
                    text
                },
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::Envelope(format!("{} {}: {}", method, path, e)))?;
        envelope::unwrap(body, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:5050/", Duration::from_secs(10)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5050");
        assert_eq!(
            client.video_feed_url(),
            "http://127.0.0.1:5050/api/v1/vision/feed"
        );
    }
}
