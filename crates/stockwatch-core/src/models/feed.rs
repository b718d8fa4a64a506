use serde::{Deserialize, Serialize};

use super::Report;

/// A report in the recent-activity feed, with its own confidence decayed to
/// the query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub report: Report,
    pub confidence: f64,
    /// Above the visibility threshold.
    pub reliable: bool,
}

/// Summary counters over the recent-activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_reports: usize,
    /// Reports submitted since UTC midnight of the query time.
    pub reports_today: usize,
    /// Reliable reports asserting availability.
    pub available_reports: usize,
    /// Reliable reports asserting unavailability.
    pub unavailable_reports: usize,
}
