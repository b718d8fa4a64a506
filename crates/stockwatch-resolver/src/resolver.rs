use serde::{Deserialize, Serialize};
use stockwatch_core::config::{ResolverConfig, ResolverStrategy};
use stockwatch_core::models::StockStatus;

use crate::blend;

/// A status together with the confidence currently held in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    pub status: StockStatus,
    pub confidence: f64,
}

impl Belief {
    pub fn new(status: StockStatus, confidence: f64) -> Self {
        Self { status, confidence }
    }
}

/// How the incoming report affected the belief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// No prior belief; the report was taken as-is.
    Initial,
    /// Agreeing report raised (or held) confidence.
    Reinforced,
    /// Disagreeing report lowered (or held) confidence but did not flip
    /// the status.
    Contested,
    /// Disagreeing report outweighed the prior and flipped the status.
    Flipped,
    /// Latest-wins strategy replaced the belief outright.
    Replaced,
}

/// Outcome of resolving one incoming report against the prior belief.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub belief: Belief,
    pub kind: ResolutionKind,
}

impl Resolution {
    /// The reported status replaced a different prior status.
    pub fn status_changed(&self, prior: Option<&Belief>) -> bool {
        prior.is_some_and(|p| p.status != self.belief.status)
    }
}

/// Stateless resolver parameterised by the configured weights and strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictResolver {
    prior_weight: f64,
    incoming_weight: f64,
    strategy: ResolverStrategy,
}

impl ConflictResolver {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            prior_weight: config.prior_weight,
            incoming_weight: config.incoming_weight,
            strategy: config.strategy,
        }
    }

    pub fn strategy(&self) -> ResolverStrategy {
        self.strategy
    }

    /// Weighted blend of a prior confidence and an incoming confidence.
    pub fn reconcile(&self, prior: f64, incoming: f64) -> f64 {
        blend::reconcile(prior, incoming, self.prior_weight, self.incoming_weight)
    }

    /// Resolve `incoming` against the (already decayed) `prior`.
    ///
    /// `incoming.confidence` must already be decayed to the same instant as
    /// the prior.
    pub fn resolve(&self, prior: Option<&Belief>, incoming: &Belief) -> Resolution {
        let Some(prior) = prior else {
            // A first report is taken at face value; blending against an
            // absent prior would under-credit it.
            return Resolution {
                belief: Belief::new(incoming.status, incoming.confidence.clamp(0.0, 1.0)),
                kind: ResolutionKind::Initial,
            };
        };

        if self.strategy == ResolverStrategy::LatestWins {
            return Resolution {
                belief: Belief::new(incoming.status, incoming.confidence.clamp(0.0, 1.0)),
                kind: ResolutionKind::Replaced,
            };
        }

        if prior.status == incoming.status {
            let blended = self.reconcile(prior.confidence, incoming.confidence);
            return Resolution {
                belief: Belief::new(prior.status, blended.max(prior.confidence)),
                kind: ResolutionKind::Reinforced,
            };
        }

        let (wp, wi) = (self.prior_weight, self.incoming_weight);
        if blend::outweighs(prior.confidence, incoming.confidence, wp, wi) {
            let blended = self.reconcile(prior.confidence, incoming.confidence);
            Resolution {
                belief: Belief::new(incoming.status, blended),
                kind: ResolutionKind::Flipped,
            }
        } else {
            Resolution {
                belief: Belief::new(
                    prior.status,
                    blend::contested_confidence(prior.confidence, incoming.confidence, wp, wi),
                ),
                kind: ResolutionKind::Contested,
            }
        }
    }
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}
