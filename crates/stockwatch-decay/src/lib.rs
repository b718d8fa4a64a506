//! # stockwatch-decay
//!
//! Linear confidence decay: a report's trustworthiness falls by a fixed
//! amount per hour of age and floors at zero. Pure and idempotent, so it is
//! safe to apply at arbitrary read time.

pub mod engine;
pub mod formula;

pub use engine::DecayEngine;
pub use formula::{age_hours, DecayBreakdown};
