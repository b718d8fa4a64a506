use serde::{Deserialize, Serialize};

use super::defaults;

/// Decay subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Confidence lost per hour of age (linear).
    pub rate_per_hour: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            rate_per_hour: defaults::DEFAULT_DECAY_RATE_PER_HOUR,
        }
    }
}
