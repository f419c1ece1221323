//! Cropwatch Common - client-side synchronization core for the field
//! gateway dashboard.
//!
//! Keeps on-screen state consistent with a polled remote source under
//! latency and failure: envelope-unwrapping HTTP client, per-panel poll
//! sessions with stale-response discard, bounded telemetry stores with a
//! monotonic freshness gate, and a pure render projection.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod poller;
pub mod projection;
pub mod store;
pub mod types;

pub use client::ApiClient;
pub use config::Config;
pub use error::ApiError;
pub use poller::PollSession;
pub use store::{Snapshot, TelemetryStore};
pub use types::{ChatReply, Detection, DetectionRecord, SensorReading, WeatherReport};
