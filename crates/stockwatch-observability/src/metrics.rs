//! Engine counters: submissions, rejections, flips, notifications, queries.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Lock-free counters shared by the engine and query service.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    reports_accepted: AtomicU64,
    reports_invalid: AtomicU64,
    reports_duplicate: AtomicU64,
    storage_failures: AtomicU64,
    status_flips: AtomicU64,
    events_published: AtomicU64,
    notifications_dropped: AtomicU64,
    notifications_rejected: AtomicU64,
    queries_served: AtomicU64,
    reports_replayed: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.reports_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid(&self) {
        self.reports_invalid.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.reports_duplicate.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_flip(&self) {
        self.status_flips.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one published event and what the subscribers lost.
    pub fn record_publish(&self, dropped_oldest: usize, rejected: usize) {
        self.events_published.fetch_add(1, Ordering::Relaxed);
        self.notifications_dropped
            .fetch_add(dropped_oldest as u64, Ordering::Relaxed);
        self.notifications_rejected
            .fetch_add(rejected as u64, Ordering::Relaxed);
    }

    /// Record `keys` keys answered by one query call.
    pub fn record_query(&self, keys: usize) {
        self.queries_served.fetch_add(keys as u64, Ordering::Relaxed);
    }

    pub fn record_replayed(&self, count: usize) {
        self.reports_replayed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reports_accepted: self.reports_accepted.load(Ordering::Relaxed),
            reports_invalid: self.reports_invalid.load(Ordering::Relaxed),
            reports_duplicate: self.reports_duplicate.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
            status_flips: self.status_flips.load(Ordering::Relaxed),
            events_published: self.events_published.load(Ordering::Relaxed),
            notifications_dropped: self.notifications_dropped.load(Ordering::Relaxed),
            notifications_rejected: self.notifications_rejected.load(Ordering::Relaxed),
            queries_served: self.queries_served.load(Ordering::Relaxed),
            reports_replayed: self.reports_replayed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub reports_accepted: u64,
    pub reports_invalid: u64,
    pub reports_duplicate: u64,
    pub storage_failures: u64,
    pub status_flips: u64,
    pub events_published: u64,
    /// Events evicted from subscriber buffers under `drop_oldest`.
    pub notifications_dropped: u64,
    /// Events refused by subscriber buffers under `reject`.
    pub notifications_rejected: u64,
    pub queries_served: u64,
    pub reports_replayed: u64,
}

impl MetricsSnapshot {
    pub fn reports_rejected(&self) -> u64 {
        self.reports_invalid + self.reports_duplicate + self.storage_failures
    }

    /// Accepted over attempted submissions (0.0–1.0). 1.0 when idle.
    pub fn acceptance_rate(&self) -> f64 {
        let attempted = self.reports_accepted + self.reports_rejected();
        if attempted == 0 {
            return 1.0;
        }
        self.reports_accepted as f64 / attempted as f64
    }
}
