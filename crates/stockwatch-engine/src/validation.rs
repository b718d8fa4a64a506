//! Boundary checks applied before a report can reach the ledger.

use stockwatch_core::errors::{StockwatchError, StockwatchResult};
use stockwatch_core::models::Report;

/// Reject reports with a blank key or a confidence outside [0.0, 1.0].
pub fn validate_report(report: &Report) -> StockwatchResult<()> {
    if !report.entity_key.is_well_formed() {
        return Err(StockwatchError::invalid(format!(
            "entity key `{}` has an empty location or item",
            report.entity_key
        )));
    }
    let confidence = report.base_confidence;
    if !confidence.is_finite() {
        return Err(StockwatchError::invalid(format!(
            "base_confidence must be finite, got {confidence}"
        )));
    }
    if !(0.0..=1.0).contains(&confidence) {
        return Err(StockwatchError::invalid(format!(
            "base_confidence must be between 0.0 and 1.0, got {confidence}"
        )));
    }
    Ok(())
}
