//! Weighted blend and the weighted-evidence flip rule.
//!
//! A confidence only ever counts as evidence for its own status. A decayed
//! belief is drifting toward unknown, not toward the opposite status. For a
//! disagreeing report:
//!
//! ```text
//! flip      iff incoming × wi > prior × wp
//! flipped   = reconcile(prior, incoming)
//! contested = min(prior, prior × wp + (1 - incoming) × wi)
//! ```

/// `prior × prior_weight + incoming × incoming_weight`, clamped to [0.0, 1.0].
pub fn reconcile(prior: f64, incoming: f64, prior_weight: f64, incoming_weight: f64) -> f64 {
    (prior * prior_weight + incoming * incoming_weight).clamp(0.0, 1.0)
}

/// The disagreeing report's weighted share strictly exceeds the prior's.
pub fn outweighs(prior: f64, incoming: f64, prior_weight: f64, incoming_weight: f64) -> bool {
    incoming * incoming_weight > prior * prior_weight
}

/// Confidence left in the believed status after a disagreeing report that
/// did not flip it. Never above `prior`.
pub fn contested_confidence(
    prior: f64,
    incoming: f64,
    prior_weight: f64,
    incoming_weight: f64,
) -> f64 {
    reconcile(prior, 1.0 - incoming, prior_weight, incoming_weight).min(prior.clamp(0.0, 1.0))
}
