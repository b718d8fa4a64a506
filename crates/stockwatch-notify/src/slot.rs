use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::sync::Notify;

use stockwatch_core::config::OverflowPolicy;
use stockwatch_core::models::ChangeEvent;

use crate::subscription::SubscriptionId;

pub(crate) type Predicate = Box<dyn Fn(&ChangeEvent) -> bool + Send + Sync>;

/// What happened when an event was offered to one subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offer {
    /// Predicate did not match.
    Skipped,
    Delivered,
    /// Delivered after evicting the oldest buffered event.
    DroppedOldest,
    /// Buffer full under the reject policy; event refused.
    Rejected,
    /// Subscriber already closed.
    Closed,
}

pub(crate) struct SubscriberSlot {
    pub id: SubscriptionId,
    predicate: Predicate,
    queue: Mutex<VecDeque<ChangeEvent>>,
    capacity: usize,
    overflow: OverflowPolicy,
    wake: Notify,
    closed: AtomicBool,
    lost: AtomicU64,
}

impl SubscriberSlot {
    pub fn new(
        id: SubscriptionId,
        predicate: Predicate,
        capacity: usize,
        overflow: OverflowPolicy,
    ) -> Self {
        Self {
            id,
            predicate,
            queue: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
            overflow,
            wake: Notify::new(),
            closed: AtomicBool::new(false),
            lost: AtomicU64::new(0),
        }
    }

    pub fn offer(&self, event: &ChangeEvent) -> Offer {
        if self.is_closed() {
            return Offer::Closed;
        }
        if !(self.predicate)(event) {
            return Offer::Skipped;
        }

        let outcome = {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            if queue.len() < self.capacity {
                queue.push_back(event.clone());
                Offer::Delivered
            } else {
                match self.overflow {
                    OverflowPolicy::DropOldest => {
                        queue.pop_front();
                        queue.push_back(event.clone());
                        Offer::DroppedOldest
                    }
                    OverflowPolicy::Reject => Offer::Rejected,
                }
            }
        };

        match outcome {
            Offer::DroppedOldest | Offer::Rejected => {
                self.lost.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
        if outcome != Offer::Rejected {
            self.wake.notify_one();
        }
        outcome
    }

    pub fn pop(&self) -> Option<ChangeEvent> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn lost(&self) -> u64 {
        self.lost.load(Ordering::Relaxed)
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub async fn wait(&self) {
        self.wake.notified().await;
    }
}
