//! Panel rendering for the terminal dashboard and one-shot commands.

use cropwatch_common::projection::{DetectionRow, SensorView, WeatherView};
use owo_colors::OwoColorize;

/// Sensor panel text.
pub fn sensor_panel(view: &SensorView) -> String {
    let status = if view.action_needed {
        view.status.red().bold().to_string()
    } else {
        view.status.green().to_string()
    };

    format!(
        "{}\n  Temp          {}\n  Humidity      {}\n  Soil Moisture {}\n  Status: {}",
        "Live Sensor Data".bold(),
        view.temperature,
        view.humidity,
        view.soil_moisture,
        status
    )
}

/// Weather widget text.
pub fn weather_panel(view: &WeatherView) -> String {
    let mut out = format!(
        "{}\n  {} — {}\n  {}  {} humidity  {} wind",
        "Weather".bold(),
        view.location,
        view.condition,
        view.temperature,
        view.humidity,
        view.wind
    );
    if let Some(alert) = &view.alert {
        out.push_str(&format!("\n  {} {}", "⚠".yellow().bold(), alert.yellow()));
    }
    out
}

/// Detection log panel text.
pub fn detection_panel(rows: &[DetectionRow]) -> String {
    let mut out = format!("{}\n", "Detection Log".bold());
    if rows.is_empty() {
        out.push_str(&format!("  {}\n", "no detections yet".dimmed()));
        return out;
    }
    for row in rows {
        out.push_str(&format!(
            "  {}  {:<28} {:>7}  {}\n",
            row.time.dimmed(),
            row.label,
            row.confidence,
            row.source.dimmed()
        ));
    }
    out
}

/// Dashboard header with the video feed location.
pub fn header(feed_url: &str) -> String {
    format!(
        "{}   video feed: {}",
        "CROPWATCH".green().bold(),
        feed_url.underline()
    )
}

/// Footer line: sensor freshness plus the last background poll failure.
pub fn footer(sensor_age: Option<&str>, last_error: Option<&str>) -> String {
    let freshness = match sensor_age {
        Some(age) => format!("sensors updated {}", age),
        None => "waiting for first poll".to_string(),
    };
    match last_error {
        Some(e) => format!(
            "{}  {} {}",
            freshness.dimmed(),
            "last poll error:".dimmed(),
            e.dimmed()
        ),
        None => format!("{}  {}", freshness.dimmed(), "Ctrl-C to exit".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropwatch_common::projection::SensorView;

    fn dry_view() -> SensorView {
        SensorView {
            temperature: "25.0°C".to_string(),
            humidity: "60.0%".to_string(),
            soil_moisture: "15.0%".to_string(),
            status: "Irrigation Needed".to_string(),
            action_needed: true,
        }
    }

    #[test]
    fn test_sensor_panel_shows_status() {
        let panel = sensor_panel(&dry_view());
        assert!(panel.contains("Irrigation Needed"));
        assert!(panel.contains("15.0%"));
    }

    #[test]
    fn test_detection_panel_empty_placeholder() {
        let panel = detection_panel(&[]);
        assert!(panel.contains("no detections yet"));
    }

    #[test]
    fn test_footer_variants() {
        assert!(footer(None, None).contains("waiting for first poll"));
        assert!(footer(Some("2s ago"), None).contains("sensors updated 2s ago"));
        assert!(footer(Some("2s ago"), Some("weather: timeout")).contains("weather: timeout"));
    }
}
