//! # stockwatch-notify
//!
//! Fans change events out to subscribers. Each subscriber owns a bounded
//! buffer; a slow or vanished subscriber never blocks `publish`. Events for
//! one key reach a subscriber in the order they were published.

pub mod notifier;
mod slot;
pub mod subscription;

pub use notifier::{PublishReport, SubscriptionNotifier};
pub use subscription::{Subscription, SubscriptionId};
