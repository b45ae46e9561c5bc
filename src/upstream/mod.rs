//! Viu mobile API client
//!
//! Wraps the private mobile API behind five operations:
//! - authenticate (device registration, bearer token)
//! - home feed
//! - search
//! - title detail (metadata plus episode list)
//! - stream resolution

pub mod client;
pub mod params;
pub mod session;
pub mod types;

pub use client::{SearchOptions, UpstreamClient};
pub use types::DetailPayload;
