use serde::{Deserialize, Serialize};

use super::defaults;

/// When an accepted report is handed to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishPolicy {
    /// Only when the public status or its visibility changes.
    VisibilityChange,
    /// After every accepted report.
    EveryUpdate,
}

/// Inbound submission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Window in which a submitter token may report a key only once.
    /// 0 disables de-duplication.
    pub dedup_cooldown_secs: u64,
    pub publish_policy: PublishPolicy,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            dedup_cooldown_secs: defaults::DEFAULT_DEDUP_COOLDOWN_SECS,
            publish_policy: PublishPolicy::VisibilityChange,
        }
    }
}
