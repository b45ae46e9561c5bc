//! Viu API Gateway
//!
//! A small HTTP server that fronts the Viu mobile API with four JSON
//! endpoints: home feed, search, title detail and stream resolution.
//! It registers a device once, caches the bearer token, and wraps every
//! answer in a `{success, data|error}` envelope.

mod config;
mod config_file;
mod error;
mod http;
mod state;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{GatewayError, Result};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "viu-gateway";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    // `viu-gateway init [path]` writes a default config file and exits
    if first.as_deref() == Some("init") {
        let path = args.next().unwrap_or_else(|| "config.toml".to_string());
        config_file::generate_default_config(&path)
            .map_err(|e| GatewayError::Config(format!("failed to write {}: {}", path, e)))?;
        println!("Wrote default configuration to {}", path);
        return Ok(());
    }

    // Load configuration
    let config_path = first.unwrap_or_else(|| "config.toml".to_string());
    let mut warnings = Vec::new();
    let mut config = if std::path::Path::new(&config_path).exists() {
        match crate::config_file::ConfigFile::from_file(&config_path) {
            Ok(cf) => cf.into_server_config(),
            Err(e) => {
                warnings.push(format!(
                    "Failed to load config file {}: {}. Using defaults.",
                    config_path, e
                ));
                ServerConfig::default()
            }
        }
    } else {
        ServerConfig::default()
    };
    if let Err(e) = config.apply_port(std::env::var("PORT").ok().as_deref()) {
        warnings.push(format!("{}. Keeping port {}.", e, config.port));
    }

    // Initialize logging
    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state
    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| GatewayError::Config(format!("invalid listen address: {}", e)))?;
    tracing::info!("Starting HTTP server on {}", addr);
    tracing::info!("Proxying to {}", config.upstream.base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "viu_gateway={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
