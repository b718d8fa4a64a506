use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use stockwatch_core::models::{Aggregate, EntityKey, Report};

/// Writer-side state for one key. Only touched under the slot's writer lock.
#[derive(Debug, Default)]
pub(crate) struct SlotLog {
    pub history: Vec<Report>,
    /// Latest accepted submission time per submitter token.
    pub last_by_submitter: HashMap<String, DateTime<Utc>>,
}

/// One entity key's state: a writer lock serializing mutation, and the
/// published aggregate behind a read-mostly lock held only for the swap.
#[derive(Debug)]
pub(crate) struct EntitySlot {
    pub key: EntityKey,
    pub writer: Mutex<SlotLog>,
    current: RwLock<Option<Aggregate>>,
}

impl EntitySlot {
    pub fn new(key: EntityKey) -> Self {
        Self {
            key,
            writer: Mutex::new(SlotLog::default()),
            current: RwLock::new(None),
        }
    }

    pub fn current(&self) -> Option<Aggregate> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn publish(&self, aggregate: Aggregate) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(aggregate);
    }
}
