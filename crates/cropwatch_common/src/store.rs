//! Per-panel telemetry state.
//!
//! Each live panel owns exactly one [`TelemetryStore`]; it is mutated only
//! by that panel's poll session and read only by that panel's render
//! projection, so ownership never crosses a session boundary.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// One successfully fetched unit of telemetry, timestamped at arrival.
/// Immutable once produced.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub payload: T,
    /// Arrival time, not the source's own timestamp.
    pub fetched_at: DateTime<Utc>,
    /// Dispatch order of the originating fetch within its session.
    pub seq: u64,
}

impl<T> Snapshot<T> {
    pub fn new(payload: T, seq: u64) -> Self {
        Self {
            payload,
            fetched_at: Utc::now(),
            seq,
        }
    }
}

/// Bounded most-recent-first history of snapshots for one panel.
///
/// Responses can arrive out of dispatch order when network latency varies;
/// the store accepts a snapshot only if its sequence number exceeds the
/// last accepted one, so the panel never rolls back to older data.
#[derive(Debug)]
pub struct TelemetryStore<T> {
    history: VecDeque<Snapshot<T>>,
    cap: usize,
    last_seq: u64,
}

impl<T> TelemetryStore<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(cap.max(1)),
            cap: cap.max(1),
            last_seq: 0,
        }
    }

    /// Record a snapshot. Returns false when it was rejected as stale.
    ///
    /// Identical consecutive payloads are both recorded; there is no
    /// deduplication. The oldest entry is evicted at capacity.
    pub fn apply(&mut self, snapshot: Snapshot<T>) -> bool {
        if snapshot.seq <= self.last_seq {
            return false;
        }
        self.last_seq = snapshot.seq;
        self.history.push_front(snapshot);
        self.history.truncate(self.cap);
        true
    }

    /// Most recent snapshot, if any poll has succeeded yet.
    pub fn latest(&self) -> Option<&Snapshot<T>> {
        self.history.front()
    }

    /// Snapshots most-recent-first.
    pub fn history(&self) -> impl Iterator<Item = &Snapshot<T>> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(value: u32, seq: u64) -> Snapshot<u32> {
        Snapshot::new(value, seq)
    }

    #[test]
    fn test_latest_equals_history_front() {
        let mut store = TelemetryStore::new(10);
        assert!(store.latest().is_none());

        for seq in 1..=4u64 {
            store.apply(snap(seq as u32 * 10, seq));
        }

        let latest = store.latest().unwrap();
        assert_eq!(latest.payload, 40);
        assert_eq!(
            latest.payload,
            store.history().next().unwrap().payload
        );
    }

    #[test]
    fn test_most_recent_first_truncated_to_cap() {
        let mut store = TelemetryStore::new(3);
        for seq in 1..=5u64 {
            store.apply(snap(seq as u32, seq));
        }

        let values: Vec<u32> = store.history().map(|s| s.payload).collect();
        assert_eq!(values, vec![5, 4, 3]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_payloads_both_recorded() {
        let mut store = TelemetryStore::new(10);
        store.apply(snap(7, 1));
        store.apply(snap(7, 2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_stale_seq_rejected() {
        let mut store = TelemetryStore::new(10);
        assert!(store.apply(snap(1, 5)));
        // A slower response dispatched earlier arrives late.
        assert!(!store.apply(snap(99, 3)));
        // Replays of the accepted seq are also rejected.
        assert!(!store.apply(snap(99, 5)));
        assert_eq!(store.latest().unwrap().payload, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_zero_cap_clamped() {
        let mut store = TelemetryStore::new(0);
        store.apply(snap(1, 1));
        assert_eq!(store.len(), 1);
    }
}
