use serde::{Deserialize, Serialize};

use super::defaults;

/// What a full subscriber buffer does with the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Evict the oldest buffered event to make room.
    DropOldest,
    /// Refuse the event for that subscriber and report it to the publisher.
    Reject,
}

/// Subscription notifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Events buffered per subscriber.
    pub buffer_capacity: usize,
    pub overflow: OverflowPolicy,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: defaults::DEFAULT_SUBSCRIBER_BUFFER_CAPACITY,
            overflow: OverflowPolicy::DropOldest,
        }
    }
}
