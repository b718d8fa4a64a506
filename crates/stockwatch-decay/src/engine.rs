use chrono::{DateTime, Utc};
use stockwatch_core::config::DecayConfig;
use stockwatch_core::models::Aggregate;

use crate::formula::{self, DecayBreakdown};

/// Decay engine holding the configured linear rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayEngine {
    rate_per_hour: f64,
}

impl DecayEngine {
    /// Create from the decay section of the configuration.
    pub fn new(config: &DecayConfig) -> Self {
        Self::with_rate(config.rate_per_hour)
    }

    /// Create with an explicit rate. Negative rates are treated as zero.
    pub fn with_rate(rate_per_hour: f64) -> Self {
        Self {
            rate_per_hour: rate_per_hour.max(0.0),
        }
    }

    pub fn rate_per_hour(&self) -> f64 {
        self.rate_per_hour
    }

    /// Current confidence of something that had `confidence` `age_hours` ago.
    pub fn decay(&self, confidence: f64, age_hours: f64) -> f64 {
        formula::compute(confidence, age_hours, self.rate_per_hour)
    }

    /// Decay `confidence` from the instant `from` to the instant `to`.
    pub fn project(&self, confidence: f64, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        self.decay(confidence, formula::age_hours(from, to))
    }

    /// A copy of `aggregate` with its confidence re-decayed to `as_of`.
    /// `last_report_at` is preserved so the copy still names the decay origin.
    pub fn project_aggregate(&self, aggregate: &Aggregate, as_of: DateTime<Utc>) -> Aggregate {
        Aggregate {
            confidence: self.project(aggregate.confidence, aggregate.last_report_at, as_of),
            ..aggregate.clone()
        }
    }

    /// Decay with a full breakdown.
    pub fn breakdown(&self, confidence: f64, age_hours: f64) -> DecayBreakdown {
        formula::compute_breakdown(confidence, age_hours, self.rate_per_hour)
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::new(&DecayConfig::default())
    }
}
