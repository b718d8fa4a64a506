use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Aggregate, EntityKey, PublicStatus};

/// Point-in-time answer returned by the query surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub entity_key: EntityKey,
    pub status: PublicStatus,
    pub confidence: f64,
    pub visible: bool,
    pub last_report_at: Option<DateTime<Utc>>,
    pub sample_count: u64,
}

impl StatusView {
    /// View for a key with no aggregate.
    pub fn unknown(entity_key: EntityKey) -> Self {
        Self {
            entity_key,
            status: PublicStatus::Unknown,
            confidence: 0.0,
            visible: false,
            last_report_at: None,
            sample_count: 0,
        }
    }

    /// View of an aggregate that has already been projected to the query time.
    pub fn from_projection(projected: &Aggregate, visibility_threshold: f64) -> Self {
        let visible = projected.is_visible(visibility_threshold);
        Self {
            entity_key: projected.entity_key.clone(),
            status: PublicStatus::resolve(Some(projected.status), visible),
            confidence: projected.confidence,
            visible,
            last_report_at: Some(projected.last_report_at),
            sample_count: projected.sample_count,
        }
    }
}
