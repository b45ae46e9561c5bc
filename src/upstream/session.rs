//! Bearer token cache
//!
//! Holds the one token the process uses for every upstream call. Acquisition
//! goes through a single async gate, so concurrent callers that find the cache
//! empty wait for the in-progress fetch instead of starting their own.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::future::Future;
use tokio::sync::Mutex;

use crate::error::Result;

/// A cached bearer token
#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    #[serde(skip)]
    pub value: String,
    pub acquired_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<SessionToken>>,
    auth_gate: Mutex<()>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token value, if one has been acquired
    pub fn current(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| t.value.clone())
    }

    pub fn snapshot(&self) -> Option<SessionToken> {
        self.token.read().clone()
    }

    fn store(&self, value: String) {
        *self.token.write() = Some(SessionToken {
            value,
            acquired_at: Utc::now(),
        });
    }

    /// Return the cached token, running `fetch` only if there is none.
    ///
    /// No expiry check: a cached token is used for the life of the process.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if let Some(token) = self.current() {
            return Ok(token);
        }

        let _guard = self.auth_gate.lock().await;
        // Someone else may have finished while we waited on the gate.
        if let Some(token) = self.current() {
            return Ok(token);
        }

        let token = fetch().await?;
        self.store(token.clone());
        Ok(token)
    }

    /// Always run `fetch` and replace the cached token with its result.
    ///
    /// On failure the previous token stays in place.
    pub async fn refresh<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let _guard = self.auth_gate.lock().await;
        let token = fetch().await?;
        self.store(token.clone());
        Ok(token)
    }
}
