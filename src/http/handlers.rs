//! HTTP request handlers
//!
//! One handler per upstream operation, plus the documentation and
//! housekeeping endpoints.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::envelope::{Envelope, HttpError};
use super::pages;
use crate::state::AppState;
use crate::upstream::{DetailPayload, SearchOptions};

/// Query parameters for `/api/search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub count: Option<String>,
}

impl SearchParams {
    fn options(&self) -> SearchOptions {
        let defaults = SearchOptions::default();
        SearchOptions {
            page: self.page.clone().unwrap_or(defaults.page),
            count: self.count.clone().unwrap_or(defaults.count),
        }
    }
}

/// GET /api/home
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Envelope<Value>, HttpError> {
    let data = state.upstream.fetch_home().await?;
    Ok(Envelope::ok(data))
}

/// GET /api/search?q=&page=&count=
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Envelope<Value>, HttpError> {
    let Query(params) = params?;
    let query = params
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| HttpError::BadRequest("Query parameter (q) is required".to_string()))?;

    let data = state.upstream.search(query, &params.options()).await?;
    Ok(Envelope::ok(data))
}

/// GET /api/detail/{id}
pub async fn detail(
    State(state): State<Arc<AppState>>,
    product_id: Result<Path<String>, PathRejection>,
) -> Result<Envelope<DetailPayload>, HttpError> {
    let Path(product_id) = product_id?;
    let data = state.upstream.fetch_detail(&product_id).await?;
    Ok(Envelope::ok(data))
}

/// GET /api/stream/{ccs_product_id}
pub async fn stream(
    State(state): State<Arc<AppState>>,
    ccs_product_id: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Value>, HttpError> {
    let Path(ccs_product_id) = ccs_product_id?;
    let data = state.upstream.resolve_stream(&ccs_product_id).await?;
    Ok(Envelope::ok(data))
}

/// Documentation page
pub async fn index() -> Html<&'static str> {
    Html(pages::INDEX)
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::NOT_FOUND))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("viu-gateway v", env!("CARGO_PKG_VERSION"))
}

/// Debug endpoint - token state, never the token itself
pub async fn session_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = state.upstream.session();

    Json(serde_json::json!({
        "authenticated": session.is_some(),
        "acquired_at": session.map(|s| s.acquired_at),
        "upstream": state.upstream.base_url(),
        "started_at": state.started_at,
    }))
}
