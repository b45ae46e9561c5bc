//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{ServerConfig, UpstreamConfig, DEFAULT_UPSTREAM_URL};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Upstream API settings
    pub upstream: Option<UpstreamSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: Option<String>,
    pub country_code: Option<String>,
    pub language_id: Option<String>,
    pub area_id: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_enabled: Some(true),
            },
            upstream: Some(UpstreamSettings {
                base_url: Some(DEFAULT_UPSTREAM_URL.to_string()),
                country_code: Some("ID".to_string()),
                language_id: Some("8".to_string()),
                area_id: Some("1000".to_string()),
                timeout_secs: None,
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = UpstreamConfig::default();
        let upstream = match self.upstream {
            Some(u) => UpstreamConfig {
                base_url: u
                    .base_url
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url),
                country_code: u.country_code.unwrap_or(defaults.country_code),
                language_id: u.language_id.unwrap_or(defaults.language_id),
                area_id: u.area_id.unwrap_or(defaults.area_id),
                timeout_secs: u.timeout_secs,
            },
            None => defaults,
        };

        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format.unwrap_or_else(|| "pretty".to_string())),
            None => ("info".to_string(), "pretty".to_string()),
        };

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level,
            log_format,
            upstream,
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
