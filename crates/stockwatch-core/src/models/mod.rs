//! Domain models shared across the workspace.

pub mod aggregate;
pub mod change_event;
pub mod entity_key;
pub mod feed;
pub mod report;
pub mod status;
pub mod status_view;

pub use aggregate::Aggregate;
pub use change_event::ChangeEvent;
pub use entity_key::EntityKey;
pub use feed::{FeedEntry, ReportStats};
pub use report::{Report, ReportSubmission};
pub use status::{PublicStatus, StockStatus};
pub use status_view::StatusView;
