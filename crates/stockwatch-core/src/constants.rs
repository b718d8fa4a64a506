/// Stockwatch engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Milliseconds per hour, used to turn timestamp deltas into decay ages.
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Separator between location id and item id in a rendered entity key.
pub const ENTITY_KEY_SEPARATOR: char = '/';

/// Base confidence assigned to a submission that does not carry one.
pub const DEFAULT_SUBMISSION_CONFIDENCE: f64 = 1.0;
