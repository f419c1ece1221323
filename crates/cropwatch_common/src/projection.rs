//! Render projection: store state to display fields.
//!
//! Everything here is a pure function of its inputs. No network, no timers,
//! no clock reads; timestamps are formatted in UTC so output does not
//! depend on the environment.

use crate::store::{Snapshot, TelemetryStore};
use crate::types::{DetectionRecord, SensorReading, WeatherReport};
use chrono::{DateTime, TimeZone, Utc};

/// Placeholder shown before the first successful poll.
pub const NO_DATA: &str = "--";

/// Irrigation status derived from soil moisture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilStatus {
    IrrigationNeeded,
    Optimal,
}

impl SoilStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilStatus::IrrigationNeeded => "Irrigation Needed",
            SoilStatus::Optimal => "Optimal",
        }
    }
}

/// Soil moisture strictly below the threshold needs irrigation.
pub fn soil_status(moisture_pct: f64, threshold_pct: f64) -> SoilStatus {
    if moisture_pct < threshold_pct {
        SoilStatus::IrrigationNeeded
    } else {
        SoilStatus::Optimal
    }
}

/// Epoch seconds to a `HH:MM:SS` clock string (UTC).
pub fn clock(epoch_secs: f64) -> String {
    match Utc.timestamp_opt(epoch_secs as i64, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => NO_DATA.to_string(),
    }
}

/// Fraction to a percent string with one decimal: `0.82` -> `82.0%`.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Value already in percent, one decimal: `65.0` -> `65.0%`.
pub fn percent_value(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Degrees Celsius with one decimal.
pub fn celsius(temp: f64) -> String {
    format!("{:.1}\u{00b0}C", temp)
}

/// How long ago a snapshot arrived, relative to `now`.
pub fn age_label<T>(snapshot: &Snapshot<T>, now: DateTime<Utc>) -> String {
    let secs = (now - snapshot.fetched_at).num_seconds().max(0);
    if secs < 2 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else {
        format!("{}m ago", secs / 60)
    }
}

/// Display model for the sensor panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorView {
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub status: String,
    pub action_needed: bool,
}

impl SensorView {
    /// Project the sensor store. An empty store renders placeholders with
    /// an unknown status rather than an error (background failure policy:
    /// the panel keeps whatever it last knew).
    pub fn project(store: &TelemetryStore<SensorReading>, soil_threshold_pct: f64) -> Self {
        match store.latest() {
            Some(snapshot) => {
                let reading = &snapshot.payload;
                let status = soil_status(reading.soil_moisture, soil_threshold_pct);
                Self {
                    temperature: celsius(reading.temperature),
                    humidity: percent_value(reading.humidity),
                    soil_moisture: percent_value(reading.soil_moisture),
                    status: status.as_str().to_string(),
                    action_needed: status == SoilStatus::IrrigationNeeded,
                }
            }
            None => Self {
                temperature: NO_DATA.to_string(),
                humidity: NO_DATA.to_string(),
                soil_moisture: NO_DATA.to_string(),
                status: "Unknown".to_string(),
                action_needed: false,
            },
        }
    }
}

/// Display model for the weather widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub location: String,
    pub condition: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub alert: Option<String>,
}

impl WeatherView {
    pub fn project(store: &TelemetryStore<WeatherReport>) -> Self {
        match store.latest() {
            Some(snapshot) => {
                let report = &snapshot.payload;
                Self {
                    location: report.location.clone(),
                    condition: report.condition.clone(),
                    temperature: celsius(report.temp_c),
                    humidity: percent_value(report.humidity_pct),
                    wind: format!("{:.1} km/h", report.wind_kph),
                    alert: report.forecast_alert.clone(),
                }
            }
            None => Self {
                location: NO_DATA.to_string(),
                condition: "Waiting for data".to_string(),
                temperature: NO_DATA.to_string(),
                humidity: NO_DATA.to_string(),
                wind: NO_DATA.to_string(),
                alert: None,
            },
        }
    }
}

/// One formatted row of the detection log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRow {
    pub time: String,
    pub label: String,
    pub confidence: String,
    pub source: String,
}

impl DetectionRow {
    pub fn from_record(record: &DetectionRecord) -> Self {
        Self {
            time: clock(record.timestamp),
            label: record.label.clone(),
            confidence: percent(record.confidence),
            source: if record.source.is_empty() {
                NO_DATA.to_string()
            } else {
                record.source.clone()
            },
        }
    }
}

/// Project the detection-log store into rows, newest record first.
///
/// The latest snapshot already holds the most recent records from the
/// gateway; older snapshots are retained for history but not re-rendered.
pub fn detection_rows(store: &TelemetryStore<Vec<DetectionRecord>>) -> Vec<DetectionRow> {
    store
        .latest()
        .map(|snapshot| snapshot.payload.iter().map(DetectionRow::from_record).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snapshot;

    fn sensor_store(reading: SensorReading) -> TelemetryStore<SensorReading> {
        let mut store = TelemetryStore::new(10);
        store.apply(Snapshot::new(reading, 1));
        store
    }

    #[test]
    fn test_soil_threshold_strictly_less_than() {
        assert_eq!(soil_status(15.0, 20.0), SoilStatus::IrrigationNeeded);
        assert_eq!(soil_status(35.0, 20.0), SoilStatus::Optimal);
        // Boundary: exactly at the threshold is not an alert.
        assert_eq!(soil_status(20.0, 20.0), SoilStatus::Optimal);
    }

    #[test]
    fn test_sensor_view_statuses() {
        let dry = sensor_store(SensorReading {
            temperature: 25.0,
            humidity: 60.0,
            soil_moisture: 15.0,
        });
        let view = SensorView::project(&dry, 20.0);
        assert_eq!(view.status, "Irrigation Needed");
        assert!(view.action_needed);

        let moist = sensor_store(SensorReading {
            temperature: 25.0,
            humidity: 60.0,
            soil_moisture: 35.0,
        });
        let view = SensorView::project(&moist, 20.0);
        assert_eq!(view.status, "Optimal");
        assert!(!view.action_needed);
    }

    #[test]
    fn test_empty_store_renders_placeholders() {
        let store: TelemetryStore<SensorReading> = TelemetryStore::new(10);
        let view = SensorView::project(&store, 20.0);
        assert_eq!(view.temperature, NO_DATA);
        assert_eq!(view.status, "Unknown");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent(0.82), "82.0%");
        assert_eq!(percent(0.825), "82.5%");
        assert_eq!(percent_value(65.0), "65.0%");
    }

    #[test]
    fn test_clock_from_epoch_seconds() {
        // 1700000000 = 2023-11-14 22:13:20 UTC
        assert_eq!(clock(1_700_000_000.0), "22:13:20");
    }

    #[test]
    fn test_projection_is_pure() {
        let store = sensor_store(SensorReading {
            temperature: 24.5,
            humidity: 60.0,
            soil_moisture: 38.2,
        });
        let first = SensorView::project(&store, 20.0);
        let second = SensorView::project(&store, 20.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_detection_rows_from_latest_snapshot() {
        let mut store = TelemetryStore::new(10);
        store.apply(Snapshot::new(
            vec![DetectionRecord {
                label: "aphid".to_string(),
                confidence: 0.82,
                timestamp: 1_700_000_000.0,
                source: "video_feed".to_string(),
            }],
            1,
        ));

        let rows = detection_rows(&store);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "aphid");
        assert_eq!(rows[0].confidence, "82.0%");
        assert_eq!(rows[0].time, "22:13:20");
    }
}
