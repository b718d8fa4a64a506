//! Span definitions per operation: submit, query, replay.

/// Create a submit span.
#[macro_export]
macro_rules! submit_span {
    ($entity_key:expr) => {
        tracing::info_span!("stockwatch.submit", entity_key = %$entity_key)
    };
}

/// Create a query span.
#[macro_export]
macro_rules! query_span {
    ($key_count:expr) => {
        tracing::debug_span!("stockwatch.query", key_count = $key_count)
    };
}

/// Create a replay span.
#[macro_export]
macro_rules! replay_span {
    ($source:expr) => {
        tracing::info_span!("stockwatch.replay", source = %$source)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SUBMIT: &str = "stockwatch.submit";
    pub const QUERY: &str = "stockwatch.query";
    pub const REPLAY: &str = "stockwatch.replay";
}
