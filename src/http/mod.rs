//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the gateway API routes
//! - Request handlers delegating to the upstream client
//! - The `{success, data|error}` response envelope
//! - Documentation and 404 pages

pub mod envelope;
pub mod handlers;
pub mod pages;
pub mod routes;

pub use routes::create_router;
