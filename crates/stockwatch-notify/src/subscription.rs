use std::fmt;
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use stockwatch_core::models::ChangeEvent;

use crate::slot::SubscriberSlot;

/// Opaque subscriber handle id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

pub(crate) type Registry = DashMap<SubscriptionId, Arc<SubscriberSlot>>;

/// Receiving end of a subscription. Dropping it unsubscribes.
pub struct Subscription {
    slot: Arc<SubscriberSlot>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(slot: Arc<SubscriberSlot>, registry: Weak<Registry>) -> Self {
        Self { slot, registry }
    }

    pub fn id(&self) -> SubscriptionId {
        self.slot.id
    }

    /// Wait for the next event. Returns `None` once the notifier has been
    /// closed and the buffer is drained.
    pub async fn recv(&self) -> Option<ChangeEvent> {
        loop {
            if let Some(event) = self.slot.pop() {
                return Some(event);
            }
            if self.slot.is_closed() {
                return None;
            }
            self.slot.wait().await;
        }
    }

    /// Next buffered event, if any. Never waits.
    pub fn try_recv(&self) -> Option<ChangeEvent> {
        self.slot.pop()
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.slot.drain()
    }

    /// Events currently buffered.
    pub fn pending(&self) -> usize {
        self.slot.pending()
    }

    /// Events this subscriber lost to overflow (evicted or refused).
    pub fn lost(&self) -> u64 {
        self.slot.lost()
    }

    pub fn is_closed(&self) -> bool {
        self.slot.is_closed()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.slot.id)
            .field("pending", &self.slot.pending())
            .field("lost", &self.slot.lost())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.slot.close();
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.slot.id);
        }
    }
}
