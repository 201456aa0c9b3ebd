//! Client configuration.

use serde::Deserialize;
use thiserror::Error;

use crate::client::API_PATH;

/// Environment variable overriding [`ClientConfig::server_url`].
pub const SERVER_URL_ENV: &str = "TODO_API_URL";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid server url '{0}': expected an http:// or https:// url")]
    InvalidUrl(String),
}

/// Where the todo API lives.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Server root, without the `/api/todos` suffix.
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            server_url: server_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(SERVER_URL_ENV) {
            config.server_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidUrl(self.server_url.clone()))
        }
    }

    /// Full resource URL, e.g. `http://127.0.0.1:3000/api/todos`.
    pub fn api_base_url(&self) -> String {
        format!("{}{API_PATH}", self.server_url.trim().trim_end_matches('/'))
    }
}
