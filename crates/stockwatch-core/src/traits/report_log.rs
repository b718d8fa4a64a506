use crate::errors::StockwatchResult;
use crate::models::Report;

/// Durable write-through target for accepted reports.
///
/// The engine appends every accepted report before publishing the new
/// aggregate, and replays `load_all` in order on startup. Implementations
/// must return reports in the order they were appended.
pub trait IReportLog: Send + Sync {
    fn append(&self, report: &Report) -> StockwatchResult<()>;

    fn load_all(&self) -> StockwatchResult<Vec<Report>>;

    /// Number of reports held.
    fn len(&self) -> StockwatchResult<usize> {
        Ok(self.load_all()?.len())
    }

    fn is_empty(&self) -> StockwatchResult<bool> {
        Ok(self.len()? == 0)
    }
}
