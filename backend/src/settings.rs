//! Application settings loaded via OrthoConfig.
//!
//! Every field can be supplied as a CLI flag, a `BIKECARE_*` environment
//! variable, or a configuration file entry. Accessors apply defaults and
//! validate the values the server cannot start without.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::postgrest::StoreConnection;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;
const MIN_STORE_TIMEOUT_MS: u64 = 1;

/// Errors raised when settings cannot produce a runnable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required setting was not supplied.
    #[error("missing required setting {name} (set BIKECARE_{env})")]
    Missing {
        /// Field name as written in configuration files.
        name: &'static str,
        /// Environment variable suffix.
        env: &'static str,
    },
    /// The listener address could not be parsed.
    #[error("invalid bind address {value:?}")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
    },
    /// The store URL could not be parsed.
    #[error("invalid store URL {value:?}: {reason}")]
    InvalidStoreUrl {
        /// Rejected value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// The log format is not one of the supported renderings.
    #[error("invalid log format {value:?}; expected json or pretty")]
    InvalidLogFormat {
        /// Rejected value.
        value: String,
    },
}

/// Rendering used by the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output for local development.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(SettingsError::InvalidLogFormat {
                value: value.to_owned(),
            }),
        }
    }
}

/// Configuration values for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BIKECARE")]
pub struct AppSettings {
    /// Listener address, defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Base URL of the hosted store project.
    pub store_url: Option<String>,
    /// Service API key sent with every store request.
    pub store_api_key: Option<String>,
    /// Upper bound on each outbound store call in milliseconds.
    pub store_timeout_ms: Option<u64>,
    /// Mount the diagnostic routes under `/api/debug`.
    #[ortho_config(default = false)]
    pub diagnostics_enabled: bool,
    /// `json` (default) or `pretty`.
    pub log_format: Option<String>,
}

impl AppSettings {
    /// Return the listener address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
            })
    }

    /// Return the bounded wait applied to every store call.
    ///
    /// Values below one millisecond are clamped to one millisecond.
    pub fn store_timeout(&self) -> Duration {
        let millis = self
            .store_timeout_ms
            .unwrap_or(DEFAULT_STORE_TIMEOUT_MS)
            .max(MIN_STORE_TIMEOUT_MS);
        Duration::from_millis(millis)
    }

    /// Return the configured tracing rendering.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), LogFormat::from_str)
    }

    /// Build the store connection from the required settings.
    pub fn store_connection(&self) -> Result<StoreConnection, SettingsError> {
        let raw_url = required(self.store_url.as_deref(), "store_url", "STORE_URL")?;
        let api_key = required(self.store_api_key.as_deref(), "store_api_key", "STORE_API_KEY")?;
        let base_url = Url::parse(raw_url).map_err(|error| SettingsError::InvalidStoreUrl {
            value: raw_url.to_owned(),
            reason: error.to_string(),
        })?;
        Ok(StoreConnection {
            base_url,
            api_key: api_key.to_owned(),
            timeout: self.store_timeout(),
        })
    }
}

fn required<'a>(
    value: Option<&'a str>,
    name: &'static str,
    env: &'static str,
) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name, env })
}
