use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ENTITY_KEY_SEPARATOR;
use crate::errors::StockwatchError;

/// Composite identifier for a (location, item) pair whose availability is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub location_id: String,
    pub item_id: String,
}

impl EntityKey {
    pub fn new(location_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            item_id: item_id.into(),
        }
    }

    /// Both halves must be non-blank for the key to be accepted by the engine.
    pub fn is_well_formed(&self) -> bool {
        !self.location_id.trim().is_empty() && !self.item_id.trim().is_empty()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.location_id, ENTITY_KEY_SEPARATOR, self.item_id)
    }
}

impl FromStr for EntityKey {
    type Err = StockwatchError;

    /// Parse `location/item`. The first separator splits; the item id may
    /// itself contain separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (location, item) = s.split_once(ENTITY_KEY_SEPARATOR).ok_or_else(|| {
            StockwatchError::invalid(format!("entity key `{s}` is missing a separator"))
        })?;
        let key = Self::new(location, item);
        if !key.is_well_formed() {
            return Err(StockwatchError::invalid(format!(
                "entity key `{s}` has an empty location or item"
            )));
        }
        Ok(key)
    }
}
