use std::env;
use thiserror::Error;

pub const MAILBOX_CAPACITY_VAR: &str = "ORDER_SERVICE_MAILBOX_CAPACITY";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_MAILBOX_CAPACITY: usize = 32;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidMailboxCapacity { var: &'static str, value: String },
}

/// Process-level settings for the order system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Bounded queue size of the store actor's mailbox.
    pub mailbox_capacity: usize,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAILBOX_CAPACITY_VAR) {
            config.mailbox_capacity = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidMailboxCapacity {
                        var: MAILBOX_CAPACITY_VAR,
                        value: raw,
                    })
                }
            };
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}
