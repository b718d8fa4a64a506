use serde::{Deserialize, Serialize};

use super::defaults;

/// Query surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Minimum confidence before a status is surfaced instead of `unknown`.
    pub visibility_threshold: f64,
    /// Number of most recent accepted reports kept for the activity feed.
    pub recent_feed_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: defaults::DEFAULT_VISIBILITY_THRESHOLD,
            recent_feed_capacity: defaults::DEFAULT_RECENT_FEED_CAPACITY,
        }
    }
}
