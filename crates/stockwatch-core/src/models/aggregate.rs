use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityKey, PublicStatus, StockStatus};

/// Current reconciled belief for one entity key.
///
/// `confidence` is the reconciled value as of `last_report_at`, which is the
/// origin of the decay clock. Always within [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub entity_key: EntityKey,
    pub status: StockStatus,
    pub confidence: f64,
    pub last_report_at: DateTime<Utc>,
    /// Number of reports folded in.
    pub sample_count: u64,
}

impl Aggregate {
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    pub fn public_status(&self, threshold: f64) -> PublicStatus {
        PublicStatus::resolve(Some(self.status), self.is_visible(threshold))
    }
}
