use serde::{Deserialize, Serialize};

/// Report-log configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON-lines report log. `None` keeps history in memory only.
    pub report_log_path: Option<String>,
}
