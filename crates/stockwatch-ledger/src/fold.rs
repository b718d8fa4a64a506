//! Folding one report into an aggregate. Pure; shared by live submission
//! and replay so both produce identical results.

use stockwatch_core::models::{Aggregate, Report};
use stockwatch_decay::DecayEngine;
use stockwatch_resolver::{Belief, ConflictResolver, Resolution};

/// Result of folding one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Folded {
    /// Stored prior projected to the fold clock, if the key had one.
    pub previous: Option<Aggregate>,
    pub aggregate: Aggregate,
    pub resolution: Resolution,
}

/// Fold `report` into `prior`.
///
/// The fold clock is `max(prior.last_report_at, report.submitted_at)`: the
/// prior decays up to it, the report decays from its own submission time up
/// to it, and the result is stamped with it. A late report therefore arrives
/// already aged and never moves the decay clock backwards.
pub fn fold(
    prior: Option<&Aggregate>,
    report: &Report,
    decay: &DecayEngine,
    resolver: &ConflictResolver,
) -> Folded {
    let clock = prior.map_or(report.submitted_at, |p| {
        p.last_report_at.max(report.submitted_at)
    });

    let previous = prior.map(|p| decay.project_aggregate(p, clock));
    let incoming = Belief::new(
        report.status,
        decay.project(report.base_confidence, report.submitted_at, clock),
    );
    let prior_belief = previous
        .as_ref()
        .map(|p| Belief::new(p.status, p.confidence));

    let resolution = resolver.resolve(prior_belief.as_ref(), &incoming);

    let aggregate = Aggregate {
        entity_key: report.entity_key.clone(),
        status: resolution.belief.status,
        confidence: resolution.belief.confidence,
        last_report_at: clock,
        sample_count: prior.map_or(0, |p| p.sample_count) + 1,
    };

    Folded {
        previous,
        aggregate,
        resolution,
    }
}
