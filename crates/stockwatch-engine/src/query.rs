//! Read-only projections over the ledger.
//!
//! Confidence is re-decayed to the query time on every read; nothing here
//! writes back. Keys that were never reported resolve to an unknown view.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use stockwatch_core::config::StockwatchConfig;
use stockwatch_core::models::{
    EntityKey, FeedEntry, ReportStats, StatusView, StockStatus,
};
use stockwatch_ledger::EntityLedger;
use stockwatch_observability::EngineMetrics;

pub struct QueryService {
    ledger: Arc<EntityLedger>,
    metrics: Arc<EngineMetrics>,
    visibility_threshold: f64,
}

impl QueryService {
    pub fn new(
        ledger: Arc<EntityLedger>,
        metrics: Arc<EngineMetrics>,
        config: &StockwatchConfig,
    ) -> Self {
        Self {
            ledger,
            metrics,
            visibility_threshold: config.query.visibility_threshold,
        }
    }

    pub fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    /// Status of one key as of `as_of` (default: now).
    pub fn status_of(&self, key: &EntityKey, as_of: Option<DateTime<Utc>>) -> StatusView {
        let _entered = stockwatch_observability::query_span!(1usize).entered();
        self.metrics.record_query(1);
        self.project(key, as_of.unwrap_or_else(Utc::now))
    }

    /// Status of each key, projected independently to the same instant.
    pub fn status_of_many(
        &self,
        keys: &[EntityKey],
        as_of: Option<DateTime<Utc>>,
    ) -> Vec<StatusView> {
        let _entered = stockwatch_observability::query_span!(keys.len()).entered();
        self.metrics.record_query(keys.len());
        let as_of = as_of.unwrap_or_else(Utc::now);
        keys.iter().map(|key| self.project(key, as_of)).collect()
    }

    /// Every tracked item at `location_id`, sorted by item id.
    pub fn location_overview(
        &self,
        location_id: &str,
        as_of: Option<DateTime<Utc>>,
    ) -> Vec<StatusView> {
        let keys = self.ledger.keys_at_location(location_id);
        self.status_of_many(&keys, as_of)
    }

    /// Up to `limit` reports from the recent-activity window, newest
    /// `submitted_at` first, each with its own confidence decayed to `as_of`.
    /// A late-arriving report takes its place by submission time.
    pub fn recent_reports(&self, limit: usize, as_of: Option<DateTime<Utc>>) -> Vec<FeedEntry> {
        let as_of = as_of.unwrap_or_else(Utc::now);
        let decay = self.ledger.decay();
        // Arrival order, newest arrival first; the stable sort keeps that
        // order among equal timestamps.
        let mut reports = self.ledger.recent_reports(usize::MAX);
        reports.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        reports
            .into_iter()
            .take(limit)
            .map(|report| {
                let confidence = decay.project(report.base_confidence, report.submitted_at, as_of);
                FeedEntry {
                    reliable: confidence >= self.visibility_threshold,
                    confidence,
                    report,
                }
            })
            .collect()
    }

    /// Counters over the whole recent-activity window.
    pub fn report_stats(&self, as_of: Option<DateTime<Utc>>) -> ReportStats {
        let as_of = as_of.unwrap_or_else(Utc::now);
        let midnight = start_of_day(as_of);
        let entries = self.recent_reports(usize::MAX, Some(as_of));

        let mut stats = ReportStats {
            total_reports: entries.len(),
            ..ReportStats::default()
        };
        for entry in &entries {
            if entry.report.submitted_at >= midnight && entry.report.submitted_at <= as_of {
                stats.reports_today += 1;
            }
            if entry.reliable {
                match entry.report.status {
                    StockStatus::Available => stats.available_reports += 1,
                    StockStatus::Unavailable => stats.unavailable_reports += 1,
                }
            }
        }
        stats
    }

    fn project(&self, key: &EntityKey, as_of: DateTime<Utc>) -> StatusView {
        match self.ledger.peek(key, as_of) {
            Some(projected) => StatusView::from_projection(&projected, self.visibility_threshold),
            None => StatusView::unknown(key.clone()),
        }
    }
}

/// UTC midnight at the start of `as_of`'s day.
fn start_of_day(as_of: DateTime<Utc>) -> DateTime<Utc> {
    as_of
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(as_of, |midnight| Utc.from_utc_datetime(&midnight))
}
