//! # stockwatch-engine
//!
//! Accepts reports (validation, de-duplication, durable write-through),
//! folds them into the ledger, fans change events out to subscribers, and
//! answers point-in-time queries with lazily re-decayed confidence.

pub mod engine;
pub mod query;
pub mod runtime;
pub mod validation;

pub use engine::{AggregationEngine, SubmitOutcome};
pub use query::QueryService;
pub use runtime::StockwatchRuntime;
