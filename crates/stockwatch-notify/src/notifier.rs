//! Registry of bounded subscriber buffers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stockwatch_core::config::NotifierConfig;
use stockwatch_core::models::{ChangeEvent, EntityKey};

use crate::slot::{Offer, SubscriberSlot};
use crate::subscription::{Registry, Subscription, SubscriptionId};

/// Outcome of one `publish`, returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReport {
    /// Subscribers whose predicate matched and that buffered the event.
    pub delivered: usize,
    /// Of those, how many had to evict their oldest event first.
    pub dropped_oldest: usize,
    /// Subscribers that refused the event because their buffer was full.
    pub rejected: Vec<SubscriptionId>,
}

impl PublishReport {
    /// No subscriber lost an event.
    pub fn is_clean(&self) -> bool {
        self.dropped_oldest == 0 && self.rejected.is_empty()
    }

    /// Human-readable warnings for anything that was not cleanly delivered.
    pub fn warnings(&self, entity_key: &EntityKey) -> Vec<String> {
        let mut out = Vec::new();
        if self.dropped_oldest > 0 {
            out.push(format!(
                "{} subscriber(s) evicted an older event to receive {entity_key}",
                self.dropped_oldest
            ));
        }
        for id in &self.rejected {
            out.push(format!("{id} rejected event for {entity_key}: buffer full"));
        }
        out
    }
}

/// Fans change events out to subscribers.
///
/// `publish` never waits on a subscriber: each one owns a bounded buffer and
/// overflow is resolved by the configured policy.
pub struct SubscriptionNotifier {
    subscribers: Arc<Registry>,
    next_id: AtomicU64,
    config: NotifierConfig,
}

impl SubscriptionNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
            config,
        }
    }

    /// Subscribe to every event matching `predicate`.
    pub fn subscribe<P>(&self, predicate: P) -> Subscription
    where
        P: Fn(&ChangeEvent) -> bool + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let slot = Arc::new(SubscriberSlot::new(
            id,
            Box::new(predicate),
            self.config.buffer_capacity,
            self.config.overflow,
        ));
        self.subscribers.insert(id, Arc::clone(&slot));
        debug!(subscription = %id, "subscriber registered");
        Subscription::new(slot, Arc::downgrade(&self.subscribers))
    }

    pub fn subscribe_all(&self) -> Subscription {
        self.subscribe(|_| true)
    }

    /// Events for any item at `location_id`.
    pub fn subscribe_location(&self, location_id: impl Into<String>) -> Subscription {
        let location_id = location_id.into();
        self.subscribe(move |event| event.entity_key.location_id == location_id)
    }

    /// Events for a single key.
    pub fn subscribe_key(&self, key: EntityKey) -> Subscription {
        self.subscribe(move |event| event.entity_key == key)
    }

    /// Offer `event` to every subscriber.
    pub fn publish(&self, event: &ChangeEvent) -> PublishReport {
        // Snapshot so no shard lock is held while predicates run.
        let slots: Vec<Arc<SubscriberSlot>> = self
            .subscribers
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut report = PublishReport::default();
        for slot in slots {
            match slot.offer(event) {
                Offer::Delivered => report.delivered += 1,
                Offer::DroppedOldest => {
                    report.delivered += 1;
                    report.dropped_oldest += 1;
                }
                Offer::Rejected => {
                    warn!(
                        subscription = %slot.id,
                        entity_key = %event.entity_key,
                        "subscriber buffer full, event rejected"
                    );
                    report.rejected.push(slot.id);
                }
                Offer::Skipped | Offer::Closed => {}
            }
        }
        report
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Close every subscription. Pending `recv` calls return `None` once
    /// their buffers are drained.
    pub fn close(&self) {
        for entry in self.subscribers.iter() {
            entry.value().close();
        }
        self.subscribers.clear();
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }
}

impl Default for SubscriptionNotifier {
    fn default() -> Self {
        Self::new(NotifierConfig::default())
    }
}
