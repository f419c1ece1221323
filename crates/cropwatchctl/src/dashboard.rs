//! Live dashboard watch mode.
//!
//! One poll session + telemetry store per panel, a one-second render tick,
//! and a Ctrl-C teardown that stops every session before leaving the
//! alternate screen. Background poll failures never interrupt the display;
//! the affected panel keeps its last-known values and the failure is shown
//! dimmed in the footer.

use crate::render;
use anyhow::Result;
use chrono::Utc;
use console::Term;
use cropwatch_common::projection::{age_label, detection_rows, SensorView, WeatherView};
use cropwatch_common::{ApiClient, Config, PollSession, TelemetryStore};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tokio::signal;
use tokio::time::{interval, Duration};

pub async fn run(config: Config) -> Result<()> {
    let client = Arc::new(ApiClient::from_config(&config)?);
    let cap = config.poll.history_cap;

    let sensors = Arc::new(Mutex::new(TelemetryStore::new(cap)));
    let weather = Arc::new(Mutex::new(TelemetryStore::new(cap)));
    let detections = Arc::new(Mutex::new(TelemetryStore::new(cap)));
    let last_error: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

    let sensor_session = PollSession::feed_store(
        Duration::from_secs(config.poll.sensors_secs),
        {
            let client = Arc::clone(&client);
            move || {
                let client = Arc::clone(&client);
                async move { client.telemetry().await }
            }
        },
        Arc::clone(&sensors),
        note_error("sensors", Arc::clone(&last_error)),
    );

    let (lat, lon) = (config.location.lat, config.location.lon);
    let weather_session = PollSession::feed_store(
        Duration::from_secs(config.poll.weather_secs),
        {
            let client = Arc::clone(&client);
            move || {
                let client = Arc::clone(&client);
                async move { client.weather(lat, lon).await }
            }
        },
        Arc::clone(&weather),
        note_error("weather", Arc::clone(&last_error)),
    );

    let limit = config.poll.detection_limit;
    let detection_session = PollSession::feed_store(
        Duration::from_secs(config.poll.detections_secs),
        {
            let client = Arc::clone(&client);
            move || {
                let client = Arc::clone(&client);
                async move { client.detections(limit).await }
            }
        },
        Arc::clone(&detections),
        note_error("detections", Arc::clone(&last_error)),
    );

    let term = Term::stdout();
    enter_alternate_screen(&term)?;

    let mut render_tick = interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                break;
            }
            _ = render_tick.tick() => {
                term.clear_screen()?;

                let sensor_view = SensorView::project(
                    &sensors.lock().unwrap(),
                    config.thresholds.soil_moisture_pct,
                );
                let weather_view = WeatherView::project(&weather.lock().unwrap());
                let rows = detection_rows(&detections.lock().unwrap());
                let error = last_error.lock().unwrap().clone();
                let now = Utc::now();
                let age = sensors
                    .lock()
                    .unwrap()
                    .latest()
                    .map(|s| age_label(s, now));

                println!("{}\n", render::header(&client.video_feed_url()));
                println!("{}\n", render::sensor_panel(&sensor_view));
                println!("{}\n", render::weather_panel(&weather_view));
                println!("{}", render::detection_panel(&rows));
                println!("{}", render::footer(age.as_deref(), error.as_deref()));
                io::stdout().flush()?;
            }
        }
    }

    // Stop before teardown so in-flight responses are discarded, not
    // applied to stores the renderer no longer reads.
    sensor_session.stop();
    weather_session.stop();
    detection_session.stop();

    exit_alternate_screen(&term)?;
    println!("Dashboard closed.");
    Ok(())
}

/// Background failure policy: remember for the footer, log at debug,
/// keep polling. The panel retains its last-known values.
fn note_error(
    panel: &'static str,
    slot: Arc<Mutex<Option<String>>>,
) -> impl Fn(cropwatch_common::ApiError) + Send + Sync + 'static {
    move |e| {
        if e.is_transient() {
            tracing::debug!(panel, error = %e, "transient poll failure");
        } else {
            tracing::warn!(panel, error = %e, "poll failure");
        }
        *slot.lock().unwrap() = Some(format!("{}: {}", panel, e));
    }
}

fn enter_alternate_screen(term: &Term) -> Result<()> {
    print!("\x1b[?1049h"); // Enter alternate screen
    io::stdout().flush()?;
    term.hide_cursor()?;
    Ok(())
}

fn exit_alternate_screen(term: &Term) -> Result<()> {
    term.show_cursor()?;
    print!("\x1b[?1049l"); // Exit alternate screen
    io::stdout().flush()?;
    Ok(())
}
