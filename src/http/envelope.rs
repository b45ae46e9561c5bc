//! Response envelope
//!
//! Every API route answers with `{ success, data }` or `{ success, error }`.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::GatewayError;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    InternalError(String),
}

impl HttpError {
    fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            HttpError::BadRequest(msg) | HttpError::InternalError(msg) => msg,
        };
        tracing::warn!("Request failed with {}: {}", status, message);

        (status, Envelope::fail(message)).into_response()
    }
}

// Bad input and upstream failures are both reported as 400.
impl From<GatewayError> for HttpError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(msg)
            | GatewayError::Upstream(msg)
            | GatewayError::UpstreamShape(msg) => HttpError::BadRequest(msg),
            _ => HttpError::InternalError(err.to_string()),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}
