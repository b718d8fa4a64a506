//! # stockwatch-observability
//!
//! Structured tracing setup with span and event definitions, plus the
//! atomic counters the engine updates on every submit and query.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
