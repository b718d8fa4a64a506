//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use stockwatch_core::config::stockwatch_config::ENV_LOG;
use stockwatch_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// `STOCKWATCH_LOG` takes precedence over `config.log_level`. Idempotent:
/// only the first call in a process installs a subscriber, and an already
/// installed foreign subscriber is left in place.
pub fn init_tracing(config: &ObservabilityConfig) {
    let level = config.log_level.clone();
    let json = config.json_logs;
    INIT.call_once(move || {
        let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(&level));
        install(filter, json);
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    INIT.call_once(move || install(filter, true));
}

fn install(filter: EnvFilter, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
