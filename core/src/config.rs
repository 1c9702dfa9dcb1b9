//! Client configuration: endpoint base URL and request timeout.
//!
//! Defaults point at the production gateway with a 10 second timeout. The
//! environment can override either value; callers apply their own overrides
//! (CLI flags) on top of whatever `from_env` returns.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://infra-apigw.hanpda.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_VAR: &str = "MALLKIT_BASE_URL";
pub const TIMEOUT_VAR: &str = "MALLKIT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `MALLKIT_BASE_URL` and `MALLKIT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.set_base_url(base_url, BASE_URL_VAR)?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout = parse_timeout_secs(&raw).ok_or(ConfigError::InvalidTimeout {
                setting: TIMEOUT_VAR,
                value: raw,
            })?;
        }

        Ok(config)
    }

    /// Replace the base URL. A blank value is rejected and blamed on
    /// `setting` (the variable or flag it came from).
    pub fn set_base_url(
        &mut self,
        base_url: String,
        setting: &'static str,
    ) -> Result<(), ConfigError> {
        if base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl { setting });
        }
        self.base_url = base_url;
        Ok(())
    }
}

fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
