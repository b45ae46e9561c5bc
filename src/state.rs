//! Application state
//!
//! One instance is built at startup and shared by every handler:
//! - Server configuration
//! - The upstream client, which owns the cached bearer token

use chrono::{DateTime, Utc};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::upstream::UpstreamClient;

#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub upstream: UpstreamClient,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let upstream = UpstreamClient::new(config.upstream.clone())?;
        Ok(Self {
            config,
            upstream,
            started_at: Utc::now(),
        })
    }
}
