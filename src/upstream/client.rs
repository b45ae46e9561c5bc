//! Viu HTTP client.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::params::{self, route, DISTRIBUTE_PATH, MOBILE_PATH, TOKEN_PATH};
use super::session::{Session, SessionToken};
use super::types::{self, DataResponse, DetailPayload, TokenResponse};
use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result};

/// Pagination for [`UpstreamClient::search`].
///
/// Kept as strings: they come straight from the query string and are
/// validated by the client before use.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub page: String,
    pub count: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: "1".to_string(),
            count: "18".to_string(),
        }
    }
}

/// Client for the Viu mobile API.
///
/// One instance is shared by every request; it owns the bearer token.
#[derive(Debug)]
pub struct UpstreamClient {
    http: Client,
    config: UpstreamConfig,
    session: Session,
}

impl UpstreamClient {
    /// Create a new client from configuration
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(params::CONTENT_TYPE));
        headers.insert("platform", HeaderValue::from_static(params::PLATFORM));

        // gzip(true) also sends `accept-encoding: gzip`
        let mut builder = Client::builder()
            .user_agent(params::USER_AGENT)
            .default_headers(headers)
            .gzip(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: UpstreamConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            session: Session::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The cached token, if any
    pub fn session(&self) -> Option<SessionToken> {
        self.session.snapshot()
    }

    /// Register a fresh device and replace the cached token.
    pub async fn authenticate(&self) -> Result<String> {
        self.session.refresh(|| self.request_token()).await
    }

    async fn ensure_token(&self) -> Result<String> {
        self.session.get_or_fetch(|| self.request_token()).await
    }

    async fn request_token(&self) -> Result<String> {
        info!("Requesting upstream token from {}", self.url(TOKEN_PATH));

        let response = self
            .http
            .post(self.url(TOKEN_PATH))
            .form(&params::device_registration(&self.config))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Upstream authentication failed: {}", e);
                GatewayError::from(e)
            })?;

        let body: TokenResponse = response.json().await?;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GatewayError::missing_field("token"))?;

        info!("Upstream token acquired");
        Ok(token)
    }

    /// GET `path` with the locale params appended and return the nested `data`.
    async fn get_data(&self, path: &str, mut query: Vec<(&'static str, String)>) -> Result<Value> {
        let token = self.ensure_token().await?;
        query.extend(params::locale_params(&self.config));

        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Upstream request to {} failed: {}", url, e);
                GatewayError::from(e)
            })?;

        let body: DataResponse = response.json().await?;
        body.into_data()
    }

    /// Home feed
    pub async fn fetch_home(&self) -> Result<Value> {
        self.get_data(MOBILE_PATH, vec![("r", route::HOME.to_string())])
            .await
    }

    /// Keyword search.
    ///
    /// Input is checked before any network traffic, including token
    /// acquisition.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Value> {
        if query.is_empty() {
            return Err(GatewayError::validation("Query is required."));
        }
        if !is_numeric(&options.page) {
            return Err(GatewayError::validation("Invalid page."));
        }
        if !is_numeric(&options.count) {
            return Err(GatewayError::validation("Invalid count."));
        }

        self.get_data(
            MOBILE_PATH,
            vec![
                ("r", route::SEARCH.to_string()),
                ("limit", options.count.clone()),
                ("page", options.page.clone()),
                ("keyword[]", query.to_string()),
            ],
        )
        .await
    }

    /// Title metadata plus the product list of its series.
    ///
    /// The second call needs the series id from the first, so they run in
    /// order.
    pub async fn fetch_detail(&self, product_id: &str) -> Result<DetailPayload> {
        if product_id.is_empty() {
            return Err(GatewayError::validation("Product ID is required."));
        }

        let metadata = self
            .get_data(
                MOBILE_PATH,
                vec![
                    ("r", route::DETAIL.to_string()),
                    ("product_id", product_id.to_string()),
                ],
            )
            .await?;
        let series_id = types::series_id(&metadata)?;
        debug!("Product {} belongs to series {}", product_id, series_id);

        let episodes = self
            .get_data(
                MOBILE_PATH,
                vec![
                    ("r", route::PRODUCT_LIST.to_string()),
                    ("product_id", product_id.to_string()),
                    ("series_id", series_id),
                ],
            )
            .await?;

        Ok(DetailPayload {
            metadata,
            product_list: types::product_list(&episodes)?,
        })
    }

    /// Playback distribution info (stream URLs) for a CCS product id
    pub async fn resolve_stream(&self, ccs_product_id: &str) -> Result<Value> {
        if ccs_product_id.is_empty() {
            return Err(GatewayError::validation("CCS Product ID is required."));
        }

        self.get_data(
            DISTRIBUTE_PATH,
            vec![("ccs_product_id", ccs_product_id.to_string())],
        )
        .await
    }
}

/// True unless the value coerces to `NaN` as a JavaScript number: blank
/// strings, signed decimals, exponents, `0x`/`0o`/`0b` literals and
/// `Infinity` all pass.
fn is_numeric(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || matches!(value, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }

    let radix = match value.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &value[2..];
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    // f64 parsing also takes "inf" and "nan", which JavaScript does not
    value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && value.parse::<f64>().is_ok()
}
