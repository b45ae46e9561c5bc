use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Missing or malformed caller input, caught before any upstream call
    #[error("{0}")]
    Validation(String),

    /// Transport failure or non-success status from the upstream API
    #[error("{0}")]
    Upstream(String),

    /// Upstream answered, but without a field we need
    #[error("{0}")]
    UpstreamShape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        GatewayError::Validation(msg.into())
    }

    pub fn missing_field(path: &str) -> Self {
        GatewayError::UpstreamShape(format!("Upstream response is missing `{}`", path))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::UpstreamShape(err.to_string())
        } else {
            GatewayError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::UpstreamShape(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GatewayError>;
