//! One-shot command execution.

use crate::render;
use anyhow::{Context, Result};
use cropwatch_common::projection::{DetectionRow, SensorView, WeatherView};
use cropwatch_common::store::Snapshot;
use cropwatch_common::{ApiClient, Config, TelemetryStore};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

/// Fetch and display current sensor readings.
pub async fn sensors(client: &ApiClient, config: &Config, json: bool) -> Result<()> {
    let reading = client
        .telemetry()
        .await
        .context("Failed to fetch sensor telemetry")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
        return Ok(());
    }

    let mut store = TelemetryStore::new(1);
    store.apply(Snapshot::new(reading, 1));
    let view = SensorView::project(&store, config.thresholds.soil_moisture_pct);
    println!("{}", render::sensor_panel(&view));
    Ok(())
}

/// Fetch and display current weather.
pub async fn weather(
    client: &ApiClient,
    config: &Config,
    lat: Option<f64>,
    lon: Option<f64>,
    json: bool,
) -> Result<()> {
    let report = client
        .weather(lat.or(config.location.lat), lon.or(config.location.lon))
        .await
        .context("Failed to fetch weather")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut store = TelemetryStore::new(1);
    store.apply(Snapshot::new(report, 1));
    println!("{}", render::weather_panel(&WeatherView::project(&store)));
    Ok(())
}

/// Fetch and display recent detection records.
pub async fn logs(client: &ApiClient, limit: usize, json: bool) -> Result<()> {
    let records = client
        .detections(limit)
        .await
        .context("Failed to fetch detection log")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let rows: Vec<DetectionRow> = records.iter().map(DetectionRow::from_record).collect();
    println!("{}", render::detection_panel(&rows));
    Ok(())
}

/// Send a chat message and print the assistant's reply.
pub async fn chat(client: &ApiClient, message: &str) -> Result<()> {
    let spinner = thinking_spinner("Asking the assistant...");
    let result = client.chat(message).await;
    spinner.finish_and_clear();

    let reply = result.context("Chat request failed")?;
    println!("{}", reply.reply);
    for warning in &reply.warnings {
        println!("{} {}", "⚠".yellow(), warning.yellow());
    }
    if let Some(source) = &reply.source {
        println!("{}", format!("({})", source).dimmed());
    }
    Ok(())
}

/// Upload an image for diagnosis and print the detections.
pub async fn analyze(client: &ApiClient, image: &Path) -> Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let filename = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.jpg")
        .to_string();

    let spinner = thinking_spinner("Analyzing image...");
    let result = client.analyze(&filename, bytes).await;
    spinner.finish_and_clear();

    let detections = result.context("Image analysis failed")?;
    if detections.is_empty() {
        println!("{}", "No threats detected.".green());
        return Ok(());
    }

    println!("{}", "Diagnosis".bold());
    for d in &detections {
        println!(
            "  {:<28} {:>7}",
            d.label,
            cropwatch_common::projection::percent(d.confidence)
        );
    }
    Ok(())
}

fn thinking_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
