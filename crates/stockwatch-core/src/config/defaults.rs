// Single source of truth for all default values.

// --- Decay ---
pub const DEFAULT_DECAY_RATE_PER_HOUR: f64 = 0.15 / 24.0; // 15% per day

// --- Resolver ---
pub const DEFAULT_PRIOR_WEIGHT: f64 = 0.6;
pub const DEFAULT_INCOMING_WEIGHT: f64 = 0.4;

// --- Query ---
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_RECENT_FEED_CAPACITY: usize = 50;

// --- Submission ---
pub const DEFAULT_DEDUP_COOLDOWN_SECS: u64 = 300; // 5 minutes

// --- Notifier ---
pub const DEFAULT_SUBSCRIBER_BUFFER_CAPACITY: usize = 256;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
