use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Fallback when [`BASE_URL_ENV`] is unset, matching the local backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "APPLIER_API_URL";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url parses"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    /// Resolves the base URL from the environment, falling back to
    /// [`DEFAULT_BASE_URL`]. A set-but-malformed value is a startup error.
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                let trimmed = value.trim();
                let base_url =
                    Url::parse(trimmed).map_err(|source| SettingsError::InvalidBaseUrl {
                        value: trimmed.to_string(),
                        source,
                    })?;
                Ok(Self {
                    base_url,
                    ..Self::default()
                })
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}
