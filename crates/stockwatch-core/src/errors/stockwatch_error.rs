use super::{ConfigError, StorageError};

/// Convenience alias used throughout the workspace.
pub type StockwatchResult<T> = Result<T, StockwatchError>;

/// Top-level error for every Stockwatch operation.
///
/// Queries for keys that have never been reported are not errors; they
/// resolve to an unknown status view instead.
#[derive(Debug, thiserror::Error)]
pub enum StockwatchError {
    /// Malformed status or out-of-range confidence. Rejected at the boundary,
    /// never reaches the ledger.
    #[error("invalid report: {reason}")]
    InvalidReport { reason: String },

    /// Policy rejection: the submitter already reported this key within the
    /// cooldown window.
    #[error("duplicate submission for {entity_key}: retry after {retry_after_secs}s")]
    DuplicateSubmission {
        entity_key: String,
        retry_after_secs: u64,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StockwatchError {
    /// Shorthand for an `InvalidReport` with a formatted reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidReport {
            reason: reason.into(),
        }
    }

    /// Whether this error is a policy rejection rather than a data error.
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, Self::DuplicateSubmission { .. })
    }
}
