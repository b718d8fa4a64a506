use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityKey, StockStatus};
use crate::constants::DEFAULT_SUBMISSION_CONFIDENCE;
use crate::errors::StockwatchResult;

/// An immutable crowd-sourced availability fact.
///
/// Created once at the inbound boundary and never mutated. Retained in the
/// ledger history for audit and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Opaque identifier assigned at submission.
    pub id: String,
    pub entity_key: EntityKey,
    pub status: StockStatus,
    /// Confidence at `submitted_at`, in [0.0, 1.0].
    pub base_confidence: f64,
    pub submitted_at: DateTime<Utc>,
    /// Opaque de-duplication token. Not an identity.
    #[serde(default)]
    pub submitter_token: String,
}

impl Report {
    /// Build a report with a fresh id.
    pub fn new(
        entity_key: EntityKey,
        status: StockStatus,
        base_confidence: f64,
        submitted_at: DateTime<Utc>,
        submitter_token: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            entity_key,
            status,
            base_confidence,
            submitted_at,
            submitter_token: submitter_token.into(),
        }
    }
}

fn default_base_confidence() -> f64 {
    DEFAULT_SUBMISSION_CONFIDENCE
}

/// Raw inbound submission as it arrives from a form or API.
///
/// `status` is free text until parsed; missing confidence defaults to 1.0 and
/// a missing timestamp defaults to the time of acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub location_id: String,
    pub item_id: String,
    pub status: String,
    #[serde(default = "default_base_confidence")]
    pub base_confidence: f64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitter_token: String,
}

impl ReportSubmission {
    /// Parse the status and stamp the report. Range checks on confidence are
    /// left to the engine's validation so every path shares them.
    pub fn into_report(self, now: DateTime<Utc>) -> StockwatchResult<Report> {
        let status = self.status.parse::<StockStatus>()?;
        Ok(Report::new(
            EntityKey::new(self.location_id, self.item_id),
            status,
            self.base_confidence,
            self.submitted_at.unwrap_or(now),
            self.submitter_token,
        ))
    }
}
