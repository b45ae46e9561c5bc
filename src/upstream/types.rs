//! Upstream response shapes.
//!
//! Only the fields the gateway reads are typed. Everything else is passed
//! through untouched as `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, Result};

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
}

/// The `{ "data": ... }` wrapper around every content response
#[derive(Debug, Deserialize)]
pub struct DataResponse {
    pub data: Option<Value>,
}

impl DataResponse {
    pub fn into_data(self) -> Result<Value> {
        self.data.ok_or_else(|| GatewayError::missing_field("data"))
    }
}

/// Combined result of the detail and product-list calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailPayload {
    pub metadata: Value,
    pub product_list: Value,
}

/// Pull `series.series_id` out of a detail response's `data`.
///
/// The upstream sends it as a string or a number depending on the title.
pub fn series_id(metadata: &Value) -> Result<String> {
    match metadata.pointer("/series/series_id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(GatewayError::missing_field("data.series.series_id")),
    }
}

pub fn product_list(data: &Value) -> Result<Value> {
    data.get("product_list")
        .cloned()
        .ok_or_else(|| GatewayError::missing_field("data.product_list"))
}
