//! # stockwatch-ledger
//!
//! Owns all mutable state: per-key aggregates, append-only report history,
//! and the recent-activity feed. Writers for one key are serialized; readers
//! only ever see a whole aggregate swap.

pub mod fold;
pub mod ledger;
pub mod replay;
pub mod report_log;
mod slot;

pub use fold::{fold, Folded};
pub use ledger::{EntityLedger, EntityWriter};
pub use replay::rebuild;
pub use report_log::{InMemoryReportLog, JsonlReportLog};
