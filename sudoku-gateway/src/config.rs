//! Gateway configuration read from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use sudoku_core::RowPolicy;

/// Socket address bound when `SUDOKU_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    3000,
);

/// Storage root used when `SUDOKU_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// `Access-Control-Allow-Origin` value used when `SUDOKU_ALLOW_ORIGIN` is unset.
pub const DEFAULT_ALLOW_ORIGIN: &str = "null";

pub const ENV_LISTEN_ADDR: &str = "SUDOKU_LISTEN_ADDR";
pub const ENV_DATA_DIR: &str = "SUDOKU_DATA_DIR";
pub const ENV_ALLOW_ORIGIN: &str = "SUDOKU_ALLOW_ORIGIN";
pub const ENV_ROW_POLICY: &str = "SUDOKU_ROW_POLICY";

/// A configuration value that could not be interpreted.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the HTTP gateway.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address the server listens on.
    pub listen_addr: SocketAddr,
    /// Directory holding `<id>.txt` puzzle files.
    pub data_dir: PathBuf,
    /// Value sent in `Access-Control-Allow-Origin` on every response.
    pub allow_origin: HeaderValue,
    /// How puzzle text is split into rows.
    pub row_policy: RowPolicy,
}

impl GatewayConfig {
    /// Defaults for everything except the storage root.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            data_dir: data_dir.into(),
            allow_origin: HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN),
            row_policy: RowPolicy::default(),
        }
    }

    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if any variable is set to a value that
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first variable that fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(ENV_DATA_DIR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());
        let mut config = Self::new(data_dir);

        if let Some(value) = lookup(ENV_LISTEN_ADDR) {
            config.listen_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid { var: ENV_LISTEN_ADDR, reason: e.to_string(), value }
            })?;
        }

        if let Some(value) = lookup(ENV_ALLOW_ORIGIN) {
            config.allow_origin = HeaderValue::from_str(&value).map_err(|e| ConfigError::Invalid {
                var: ENV_ALLOW_ORIGIN,
                reason: e.to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_ROW_POLICY) {
            config.row_policy = value.parse().map_err(|e: sudoku_core::ParseRowPolicyError| {
                ConfigError::Invalid { var: ENV_ROW_POLICY, reason: e.to_string(), value }
            })?;
        }

        Ok(config)
    }
}
