//! # stockwatch-core
//!
//! Foundation crate for the Stockwatch availability engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StockwatchConfig;
pub use errors::{StockwatchError, StockwatchResult};
pub use models::{
    Aggregate, ChangeEvent, EntityKey, PublicStatus, Report, ReportSubmission, StatusView,
    StockStatus,
};
