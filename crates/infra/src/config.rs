//! Dispatcher configuration.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Command dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// How many times a command is reloaded and re-decided after losing an
    /// optimistic concurrency race before the conflict is surfaced.
    pub max_conflict_retries: u32,
    /// Stream type recorded with every appended event.
    pub aggregate_type: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: 3,
            aggregate_type: "customer".to_string(),
        }
    }
}

impl DispatcherConfig {
    pub const MAX_CONFLICT_RETRIES_VAR: &'static str = "CUSTOMER_ES_MAX_CONFLICT_RETRIES";

    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    /// Defaults overridden by `CUSTOMER_ES_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::MAX_CONFLICT_RETRIES_VAR) {
            config.max_conflict_retries =
                raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: Self::MAX_CONFLICT_RETRIES_VAR,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }
}
