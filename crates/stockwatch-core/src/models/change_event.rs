use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Aggregate, EntityKey, PublicStatus};

/// Payload fanned out to subscribers when an aggregate changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity_key: EntityKey,
    pub status: PublicStatus,
    pub confidence: f64,
    pub visible: bool,
    /// Per-key sequence number (the aggregate's sample count).
    pub sample_count: u64,
    pub at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn from_aggregate(aggregate: &Aggregate, visibility_threshold: f64) -> Self {
        let visible = aggregate.is_visible(visibility_threshold);
        Self {
            entity_key: aggregate.entity_key.clone(),
            status: PublicStatus::resolve(Some(aggregate.status), visible),
            confidence: aggregate.confidence,
            visible,
            sample_count: aggregate.sample_count,
            at: aggregate.last_report_at,
        }
    }
}
