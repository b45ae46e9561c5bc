//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GatewayError, Result};

/// Default upstream API base URL
pub const DEFAULT_UPSTREAM_URL: &str = "https://api-gateway-global.viu.com/api";

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every upstream path is appended to
    pub base_url: String,

    /// Country code sent with every request
    pub country_code: String,

    /// Upstream language id
    pub language_id: String,

    /// Upstream area id
    pub area_id: String,

    /// Per-request timeout in seconds; transport default when unset
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            country_code: "ID".to_string(),
            language_id: "8".to_string(),
            area_id: "1000".to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Upstream API configuration
    pub upstream: UpstreamConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply a `PORT` value taken from the environment.
    pub fn apply_port(&mut self, port: Option<&str>) -> Result<()> {
        let Some(port) = port else {
            return Ok(());
        };
        self.port = port
            .trim()
            .parse()
            .map_err(|_| GatewayError::Config(format!("invalid PORT value: {:?}", port)))?;
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
