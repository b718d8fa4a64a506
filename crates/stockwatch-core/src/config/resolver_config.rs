use serde::{Deserialize, Serialize};

use super::defaults;

/// How a new report is merged with the current belief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverStrategy {
    /// Weighted blend of prior and incoming, with the weighted-evidence
    /// flip rule for disagreeing reports.
    WeightedBlend,
    /// The latest report replaces the belief outright.
    LatestWins,
}

/// Conflict resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Weight of the decayed prior in the blend. Default: 0.6.
    pub prior_weight: f64,
    /// Weight of the incoming report in the blend. Default: 0.4.
    pub incoming_weight: f64,
    pub strategy: ResolverStrategy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prior_weight: defaults::DEFAULT_PRIOR_WEIGHT,
            incoming_weight: defaults::DEFAULT_INCOMING_WEIGHT,
            strategy: ResolverStrategy::WeightedBlend,
        }
    }
}
