use chrono::{DateTime, Utc};
use stockwatch_core::constants::MILLIS_PER_HOUR;

/// Linear decay formula.
///
/// ```text
/// result = max(0, confidence - age_hours × rate_per_hour)
/// ```
///
/// Negative ages are treated as zero so projecting to an instant before the
/// decay origin never inflates confidence. Result is clamped to [0.0, 1.0].
pub fn compute(confidence: f64, age_hours: f64, rate_per_hour: f64) -> f64 {
    let age = age_hours.max(0.0);
    (confidence - age * rate_per_hour).clamp(0.0, 1.0)
}

/// Hours elapsed from `from` to `to`. Negative when `to` precedes `from`.
pub fn age_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Decay computed step by step, for debugging and observability.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayBreakdown {
    pub base_confidence: f64,
    pub age_hours: f64,
    pub rate_per_hour: f64,
    /// Confidence actually removed (never more than the base).
    pub lost: f64,
    pub final_confidence: f64,
}

/// Compute decay with a full breakdown.
pub fn compute_breakdown(confidence: f64, age_hours: f64, rate_per_hour: f64) -> DecayBreakdown {
    let final_confidence = compute(confidence, age_hours, rate_per_hour);
    DecayBreakdown {
        base_confidence: confidence,
        age_hours: age_hours.max(0.0),
        rate_per_hour,
        lost: (confidence - final_confidence).max(0.0),
        final_confidence,
    }
}
