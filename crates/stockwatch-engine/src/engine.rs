//! The write path from inbound report to published event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockwatch_core::config::{PublishPolicy, StockwatchConfig, SubmissionConfig};
use stockwatch_core::errors::{StockwatchError, StockwatchResult};
use stockwatch_core::models::{
    Aggregate, ChangeEvent, EntityKey, PublicStatus, Report, ReportSubmission,
};
use stockwatch_core::traits::IReportLog;
use stockwatch_ledger::{EntityLedger, EntityWriter, Folded};
use stockwatch_notify::SubscriptionNotifier;
use stockwatch_observability::tracing_setup::events;
use stockwatch_observability::EngineMetrics;
use stockwatch_resolver::ResolutionKind;

use crate::validation;

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Id assigned to the accepted report.
    pub report_id: String,
    /// Aggregate as stored after the fold.
    pub aggregate: Aggregate,
    /// Public status (or its visibility) differs from before the report.
    pub changed: bool,
    pub resolution: ResolutionKind,
    /// Event handed to the notifier, if one was published.
    pub event: Option<ChangeEvent>,
    /// Notification problems. Never a reason to roll back.
    pub warnings: Vec<String>,
}

/// Validates, de-duplicates, persists and folds reports, then publishes.
///
/// Everything from the duplicate check to the publish runs under the key's
/// writer lock, so a submit is all-or-nothing and events for one key leave
/// in the order their reports were applied.
pub struct AggregationEngine {
    ledger: Arc<EntityLedger>,
    notifier: Arc<SubscriptionNotifier>,
    metrics: Arc<EngineMetrics>,
    report_log: Option<Arc<dyn IReportLog>>,
    submission: SubmissionConfig,
    visibility_threshold: f64,
}

impl AggregationEngine {
    pub fn new(
        ledger: Arc<EntityLedger>,
        notifier: Arc<SubscriptionNotifier>,
        metrics: Arc<EngineMetrics>,
        config: &StockwatchConfig,
    ) -> Self {
        Self {
            ledger,
            notifier,
            metrics,
            report_log: None,
            submission: config.submission.clone(),
            visibility_threshold: config.query.visibility_threshold,
        }
    }

    /// Append every accepted report to `log` before it is applied.
    pub fn with_report_log(mut self, log: Arc<dyn IReportLog>) -> Self {
        self.report_log = Some(log);
        self
    }

    pub fn ledger(&self) -> &Arc<EntityLedger> {
        &self.ledger
    }

    /// Parse a raw submission, stamping it with `now` if it carries no time.
    pub fn submit_raw(
        &self,
        submission: ReportSubmission,
        now: DateTime<Utc>,
    ) -> StockwatchResult<SubmitOutcome> {
        let key = EntityKey::new(&submission.location_id, &submission.item_id);
        let report = submission.into_report(now).inspect_err(|e| {
            self.metrics.record_invalid();
            events::report_rejected(&key, &e.to_string());
        })?;
        self.submit(report)
    }

    /// Submit an already-built report.
    pub fn submit(&self, report: Report) -> StockwatchResult<SubmitOutcome> {
        let span = stockwatch_observability::submit_span!(report.entity_key);
        let _entered = span.enter();

        let key = report.entity_key.clone();
        if let Err(e) = validation::validate_report(&report) {
            self.metrics.record_invalid();
            events::report_rejected(&key, &e.to_string());
            return Err(e);
        }

        let result = self
            .ledger
            .with_entity(&key, |writer| self.apply(writer, report));

        if let Err(e) = &result {
            match e {
                StockwatchError::DuplicateSubmission { .. } => self.metrics.record_duplicate(),
                StockwatchError::Storage(_) => self.metrics.record_storage_failure(),
                _ => self.metrics.record_invalid(),
            }
            events::report_rejected(&key, &e.to_string());
        }
        result
    }

    fn apply(
        &self,
        writer: &mut EntityWriter<'_>,
        report: Report,
    ) -> StockwatchResult<SubmitOutcome> {
        self.check_duplicate(writer, &report)?;

        let folded = writer.prepare(&report);
        if let Some(log) = &self.report_log {
            log.append(&report)?;
        }

        let report_id = report.id.clone();
        writer.commit(report, &folded);
        self.metrics.record_accepted();

        let aggregate = &folded.aggregate;
        events::report_accepted(
            &aggregate.entity_key,
            aggregate.status,
            aggregate.confidence,
            aggregate.sample_count,
        );

        let (before, after) = self.public_transition(&folded);
        let changed = before != after;
        if let Some(previous) = &folded.previous {
            if previous.status != aggregate.status {
                self.metrics.record_flip();
                events::status_flipped(
                    &aggregate.entity_key,
                    previous.status,
                    aggregate.status,
                    aggregate.confidence,
                );
            }
        }
        if changed {
            events::visibility_changed(&aggregate.entity_key, before, after);
        }

        let mut warnings = Vec::new();
        let publish = changed || self.submission.publish_policy == PublishPolicy::EveryUpdate;
        let event = if publish {
            let event = ChangeEvent::from_aggregate(aggregate, self.visibility_threshold);
            let delivery = self.notifier.publish(&event);
            self.metrics
                .record_publish(delivery.dropped_oldest, delivery.rejected.len());
            if !delivery.is_clean() {
                events::notification_dropped(
                    &aggregate.entity_key,
                    delivery.dropped_oldest,
                    delivery.rejected.len(),
                );
                warnings = delivery.warnings(&aggregate.entity_key);
            }
            Some(event)
        } else {
            None
        };

        Ok(SubmitOutcome {
            report_id,
            aggregate: folded.aggregate.clone(),
            changed,
            resolution: folded.resolution.kind,
            event,
            warnings,
        })
    }

    /// Public status before (prior projected to the fold clock) and after.
    fn public_transition(&self, folded: &Folded) -> (PublicStatus, PublicStatus) {
        let threshold = self.visibility_threshold;
        let before = folded
            .previous
            .as_ref()
            .map_or(PublicStatus::Unknown, |p| p.public_status(threshold));
        (before, folded.aggregate.public_status(threshold))
    }

    /// A token may contribute to a key once per cooldown window, measured in
    /// report time on either side of its last accepted report.
    fn check_duplicate(
        &self,
        writer: &EntityWriter<'_>,
        report: &Report,
    ) -> StockwatchResult<()> {
        let cooldown_secs = self.submission.dedup_cooldown_secs;
        if cooldown_secs == 0 || report.submitter_token.is_empty() {
            return Ok(());
        }
        let Some(last) = writer.last_report_by(&report.submitter_token) else {
            return Ok(());
        };

        let cooldown_ms = i64::try_from(cooldown_secs)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000);
        let elapsed_ms = (report.submitted_at - last).num_milliseconds().saturating_abs();
        if elapsed_ms >= cooldown_ms {
            return Ok(());
        }

        let remaining_ms = cooldown_ms - elapsed_ms;
        let retry_after_secs =
            u64::try_from((remaining_ms + 999) / 1000).unwrap_or(cooldown_secs);
        Err(StockwatchError::DuplicateSubmission {
            entity_key: writer.key().to_string(),
            retry_after_secs,
        })
    }
}
