//! Deterministic reconstruction of an aggregate from its report history.

use stockwatch_core::models::{Aggregate, Report};
use stockwatch_decay::DecayEngine;
use stockwatch_resolver::ConflictResolver;

use crate::fold;

/// Fold `history` in order, returning the final aggregate (`None` if empty).
///
/// Uses the same fold as live submission, so the result matches what the
/// ledger published after the last of these reports.
pub fn rebuild(
    history: &[Report],
    decay: &DecayEngine,
    resolver: &ConflictResolver,
) -> Option<Aggregate> {
    history.iter().fold(None, |prior, report| {
        Some(fold::fold(prior.as_ref(), report, decay, resolver).aggregate)
    })
}
