//! Configuration system for Stockwatch.
//! TOML-based, resolved as: env > config file > compiled defaults.

pub mod decay_config;
pub mod defaults;
pub mod notifier_config;
pub mod observability_config;
pub mod query_config;
pub mod resolver_config;
pub mod stockwatch_config;
pub mod storage_config;
pub mod submission_config;

pub use decay_config::DecayConfig;
pub use notifier_config::{NotifierConfig, OverflowPolicy};
pub use observability_config::ObservabilityConfig;
pub use query_config::QueryConfig;
pub use resolver_config::{ResolverConfig, ResolverStrategy};
pub use stockwatch_config::StockwatchConfig;
pub use storage_config::StorageConfig;
pub use submission_config::{PublishPolicy, SubmissionConfig};
