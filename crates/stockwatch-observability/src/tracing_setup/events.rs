//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use stockwatch_core::models::{EntityKey, PublicStatus, StockStatus};

/// Log an accepted report.
pub fn report_accepted(
    entity_key: &EntityKey,
    status: StockStatus,
    confidence: f64,
    sample_count: u64,
) {
    tracing::info!(
        event = "report_accepted",
        entity_key = %entity_key,
        status = %status,
        confidence = confidence,
        sample_count = sample_count,
        "report accepted"
    );
}

/// Log a rejected report.
pub fn report_rejected(entity_key: &EntityKey, reason: &str) {
    tracing::warn!(
        event = "report_rejected",
        entity_key = %entity_key,
        reason = %reason,
        "report rejected"
    );
}

/// Log a stored status flip.
pub fn status_flipped(
    entity_key: &EntityKey,
    from: StockStatus,
    to: StockStatus,
    confidence: f64,
) {
    tracing::info!(
        event = "status_flipped",
        entity_key = %entity_key,
        from = %from,
        to = %to,
        confidence = confidence,
        "status flipped"
    );
}

/// Log a change in the publicly visible status.
pub fn visibility_changed(entity_key: &EntityKey, from: PublicStatus, to: PublicStatus) {
    tracing::info!(
        event = "visibility_changed",
        entity_key = %entity_key,
        from = %from,
        to = %to,
        "public status changed"
    );
}

/// Log change events lost to full subscriber buffers.
pub fn notification_dropped(entity_key: &EntityKey, dropped_oldest: usize, rejected: usize) {
    tracing::warn!(
        event = "notification_dropped",
        entity_key = %entity_key,
        dropped_oldest = dropped_oldest,
        rejected = rejected,
        "subscriber buffers overflowed"
    );
}

/// Log completion of a report-log replay.
pub fn replay_completed(reports: usize, keys: usize) {
    tracing::info!(
        event = "replay_completed",
        reports = reports,
        keys = keys,
        "report log replayed"
    );
}
