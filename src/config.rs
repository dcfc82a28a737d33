// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Client configuration.
//!
//! [`ClientConfig`] is built once and handed to [`crate::client::ZoneClient::new`]; the
//! client never reads the environment itself.
//!
//! # Environment
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `ZONEPATCH_API_HOST` | API base URL | `https://api.abion.com` |
//! | `ZONEPATCH_API_KEY` | API key (required) | |
//! | `ZONEPATCH_API_TIMEOUT` | HTTP timeout in seconds | `60` |

use crate::constants::{
    DEFAULT_API_HOST, DEFAULT_TIMEOUT_SECS, ENV_API_HOST, ENV_API_KEY, ENV_API_TIMEOUT,
};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No API key configured
    #[error("missing API key: set the ZONEPATCH_API_KEY environment variable or pass it explicitly")]
    MissingApiKey,

    /// Timeout is not a whole number of seconds
    #[error("invalid ZONEPATCH_API_TIMEOUT value '{value}': expected a whole number of seconds")]
    InvalidTimeout { value: String },
}

/// Immutable connection settings for the zone API.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://api.abion.com`
    pub host: String,
    /// Value sent in the `X-API-KEY` header
    pub api_key: String,
    /// Applied to connecting and to the whole request
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the default host and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the timeout does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the timeout does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(host) = get(ENV_API_HOST) {
            config.host = host;
        }

        if let Some(value) = get(ENV_API_TIMEOUT) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
