//! Top-level Stockwatch configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    DecayConfig, NotifierConfig, ObservabilityConfig, QueryConfig, ResolverConfig, StorageConfig,
    SubmissionConfig,
};
use crate::errors::ConfigError;

/// Environment variable overriding `query.visibility_threshold`.
pub const ENV_VISIBILITY_THRESHOLD: &str = "STOCKWATCH_VISIBILITY_THRESHOLD";
/// Environment variable overriding `decay.rate_per_hour`.
pub const ENV_DECAY_RATE_PER_HOUR: &str = "STOCKWATCH_DECAY_RATE_PER_HOUR";
/// Environment variable overriding `submission.dedup_cooldown_secs`.
pub const ENV_DEDUP_COOLDOWN_SECS: &str = "STOCKWATCH_DEDUP_COOLDOWN_SECS";
/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG: &str = "STOCKWATCH_LOG";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`STOCKWATCH_*`)
/// 2. Config file (`stockwatch.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockwatchConfig {
    pub decay: DecayConfig,
    pub resolver: ResolverConfig,
    pub query: QueryConfig,
    pub submission: SubmissionConfig,
    pub notifier: NotifierConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl StockwatchConfig {
    /// Load configuration from an optional file, then apply environment
    /// overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides using `lookup` to read variables. Unset variables are
    /// skipped; set but unparseable ones are errors.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_VISIBILITY_THRESHOLD) {
            self.query.visibility_threshold = parse_env(ENV_VISIBILITY_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DECAY_RATE_PER_HOUR) {
            self.decay.rate_per_hour = parse_env(ENV_DECAY_RATE_PER_HOUR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DEDUP_COOLDOWN_SECS) {
            self.submission.dedup_cooldown_secs = parse_env(ENV_DEDUP_COOLDOWN_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG) {
            self.observability.log_level = raw;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("query.visibility_threshold", self.query.visibility_threshold)?;
        check_unit_interval("resolver.prior_weight", self.resolver.prior_weight)?;
        check_unit_interval("resolver.incoming_weight", self.resolver.incoming_weight)?;

        let weight_sum = self.resolver.prior_weight + self.resolver.incoming_weight;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::ValidationFailed {
                field: "resolver".to_string(),
                message: format!("prior_weight + incoming_weight must equal 1.0, got {weight_sum}"),
            });
        }

        if !self.decay.rate_per_hour.is_finite() || self.decay.rate_per_hour < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "decay.rate_per_hour".to_string(),
                message: "must be a finite, non-negative number".to_string(),
            });
        }
        if self.notifier.buffer_capacity == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "notifier.buffer_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::ValidationFailed {
        field: key.to_string(),
        message: format!("cannot parse `{raw}`"),
    })
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(())
}
