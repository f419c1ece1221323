//! Repeating-fetch poll sessions.
//!
//! One [`PollSession`] drives one live panel: it fires its fetch immediately
//! on start, then on a fixed cadence until stopped. Every dispatched fetch
//! runs as its own task, so a slow response never delays the next tick, and
//! every callback is gated on a shared liveness flag so a response arriving
//! after [`PollSession::stop`] is discarded instead of mutating a store that
//! belongs to a torn-down panel.

use crate::error::ApiError;
use crate::store::{Snapshot, TelemetryStore};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Handle to a running poll cycle. Stopping (or dropping) the handle ends
/// the cycle; no result or error callback runs afterward.
pub struct PollSession {
    alive: Arc<AtomicBool>,
    ticker: JoinHandle<()>,
}

impl PollSession {
    /// Start polling `fetch` every `period`, beginning immediately.
    ///
    /// Each dispatch is stamped with a monotonically increasing sequence
    /// number carried into the resulting [`Snapshot`]; stores use it to
    /// reject out-of-order arrivals. A failed fetch invokes `on_error` and
    /// polling continues on the next tick.
    pub fn start<T, F, Fut, R, E>(period: Duration, mut fetch: F, on_result: R, on_error: E) -> Self
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        R: Fn(Snapshot<T>) + Send + Sync + 'static,
        E: Fn(ApiError) + Send + Sync + 'static,
    {
        let alive = Arc::new(AtomicBool::new(true));
        let on_result = Arc::new(on_result);
        let on_error = Arc::new(on_error);

        let ticker = tokio::spawn({
            let alive = Arc::clone(&alive);
            async move {
                let seq = AtomicU64::new(0);
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    // First tick completes immediately.
                    ticker.tick().await;
                    if !alive.load(Ordering::Acquire) {
                        break;
                    }

                    let seq_no = seq.fetch_add(1, Ordering::Relaxed) + 1;
                    let outstanding = fetch();
                    let alive = Arc::clone(&alive);
                    let on_result = Arc::clone(&on_result);
                    let on_error = Arc::clone(&on_error);

                    // Independent task per dispatch: no backpressure, the
                    // next tick fires even while this one is outstanding.
                    tokio::spawn(async move {
                        let outcome = outstanding.await;
                        if !alive.load(Ordering::Acquire) {
                            // Stale response, session already stopped.
                            return;
                        }
                        match outcome {
                            Ok(payload) => on_result(Snapshot::new(payload, seq_no)),
                            Err(e) => on_error(e),
                        }
                    });
                }
            }
        });

        Self { alive, ticker }
    }

    /// Start a session that feeds a panel's store directly.
    ///
    /// The store applies its own freshness gate; `on_error` follows the
    /// background policy of the caller (the dashboard logs and swallows).
    pub fn feed_store<T, F, Fut, E>(
        period: Duration,
        fetch: F,
        store: Arc<Mutex<TelemetryStore<T>>>,
        on_error: E,
    ) -> Self
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        E: Fn(ApiError) + Send + Sync + 'static,
    {
        Self::start(
            period,
            fetch,
            move |snapshot| {
                let mut store = store.lock().expect("telemetry store lock poisoned");
                if !store.apply(snapshot) {
                    tracing::debug!("dropped out-of-order snapshot");
                }
            },
            on_error,
        )
    }

    /// Stop the session. Synchronous: once this returns, no further
    /// callback runs, including for fetches already in flight.
    pub fn stop(&self) {
        self.alive.store(false, Ordering::Release);
        self.ticker.abort();
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.stop();
    }
}
