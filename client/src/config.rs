//! Client configuration.
//!
//! Values come from environment variables (the binary preloads a `.env` file
//! with `dotenvy`), falling back to defaults:
//!
//! | Variable | Default |
//! |---|---|
//! | `TASKBOARD_API_URL` | `http://localhost:8000` |
//! | `TASKBOARD_REQUEST_TIMEOUT_SECS` | `30` |
//! | `TASKBOARD_PAGE_SIZE` | `10` |
//! | `TASKBOARD_SEARCH_DEBOUNCE_MS` | `1000` |
//!
//! # Example
//!
//! ```no_run
//! use taskboard_client::config::ClientConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! println!("Backend: {}", config.api.base_url);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to an unusable value
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every request path is appended to, without a trailing `/`
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// List synchronization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Initial pager size
    pub page_size: u32,
    /// Quiet period before a search keystroke settles
    pub search_debounce: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend connection
    pub api: ApiConfig,
    /// List synchronization
    pub sync: SyncConfig,
}

impl ClientConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but unusable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but unusable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("TASKBOARD_API_URL") {
            config.api.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse::<u64>(&lookup, "TASKBOARD_REQUEST_TIMEOUT_SECS")? {
            config.api.request_timeout = Duration::from_secs(secs);
        }
        if let Some(size) = parse::<u32>(&lookup, "TASKBOARD_PAGE_SIZE")? {
            config.sync.page_size = size;
        }
        if let Some(ms) = parse::<u64>(&lookup, "TASKBOARD_SEARCH_DEBOUNCE_MS")? {
            config.sync.search_debounce = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty base URL, a non-HTTP base
    /// URL, or a zero page size
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "TASKBOARD_API_URL",
                value: url.clone(),
                reason: "must be an http(s) URL".into(),
            });
        }
        if self.sync.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "TASKBOARD_PAGE_SIZE",
                value: "0".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value: raw,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.sync.page_size, 10);
        assert_eq!(config.sync.search_debounce, Duration::from_secs(1));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TASKBOARD_API_URL", "https://todo.example.com/api/"),
            ("TASKBOARD_REQUEST_TIMEOUT_SECS", "5"),
            ("TASKBOARD_PAGE_SIZE", "25"),
            ("TASKBOARD_SEARCH_DEBOUNCE_MS", " 250 "),
        ]))
        .unwrap();

        assert_eq!(config.api.base_url, "https://todo.example.com/api");
        assert_eq!(config.api.request_timeout, Duration::from_secs(5));
        assert_eq!(config.sync.page_size, 25);
        assert_eq!(config.sync.search_debounce, Duration::from_millis(250));
    }

    #[test]
    fn unparsable_value_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[("TASKBOARD_PAGE_SIZE", "ten")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "TASKBOARD_PAGE_SIZE", ref value, .. } if value == "ten"
        ));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("TASKBOARD_PAGE_SIZE", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn non_http_url_is_rejected() {
        assert!(ClientConfig::from_lookup(lookup(&[("TASKBOARD_API_URL", "localhost")])).is_err());
    }
}
