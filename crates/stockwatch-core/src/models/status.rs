use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StockwatchError;

/// The two mutually exclusive states a report can assert.
///
/// Accepts the legacy `in_stock` / `out_of_stock` spellings on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[serde(alias = "in_stock")]
    Available,
    #[serde(alias = "out_of_stock")]
    Unavailable,
}

impl StockStatus {
    pub fn opposite(self) -> Self {
        match self {
            Self::Available => Self::Unavailable,
            Self::Unavailable => Self::Available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = StockwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" | "in_stock" => Ok(Self::Available),
            "unavailable" | "out_of_stock" => Ok(Self::Unavailable),
            other => Err(StockwatchError::invalid(format!(
                "unknown status `{other}`"
            ))),
        }
    }
}

/// Status as surfaced to consumers: the stored status when its confidence
/// clears the visibility threshold, otherwise `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicStatus {
    Available,
    Unavailable,
    Unknown,
}

impl PublicStatus {
    /// Suppress `status` unless it is visible. The stored value is untouched.
    pub fn resolve(status: Option<StockStatus>, visible: bool) -> Self {
        match status {
            Some(s) if visible => s.into(),
            _ => Self::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl From<StockStatus> for PublicStatus {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::Available => Self::Available,
            StockStatus::Unavailable => Self::Unavailable,
        }
    }
}

impl fmt::Display for PublicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
