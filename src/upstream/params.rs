//! Fixed request parameters.
//!
//! The mobile API expects every call to identify the app build and locale.
//! These values mirror what the Android app sends.

use uuid::Uuid;

use crate::config::UpstreamConfig;

pub const PLATFORM: &str = "android";
pub const USER_AGENT: &str = "okhttp/4.12.0";
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const TOKEN_PATH: &str = "/auth/token";
pub const MOBILE_PATH: &str = "/mobile";
pub const DISTRIBUTE_PATH: &str = "/playback/distribute";

/// Values for the `r` selector on the `/mobile` passthrough endpoint
pub mod route {
    pub const HOME: &str = "/home/index";
    pub const SEARCH: &str = "/search/video";
    pub const DETAIL: &str = "/vod/detail";
    pub const PRODUCT_LIST: &str = "/vod/product-list";
}

/// Query pairs sent with every content request
pub fn locale_params(config: &UpstreamConfig) -> Vec<(&'static str, String)> {
    vec![
        ("platform_flag_label", "phone".to_string()),
        ("language_flag_id", config.language_id.clone()),
        ("ut", "0".to_string()),
        ("area_id", config.area_id.clone()),
        ("os_flag_id", "2".to_string()),
        ("countryCode", config.country_code.clone()),
    ]
}

/// Form body for the token endpoint.
///
/// Both device identifiers are fresh on every call.
pub fn device_registration(config: &UpstreamConfig) -> Vec<(&'static str, String)> {
    vec![
        ("countryCode", config.country_code.clone()),
        ("platform", PLATFORM.to_string()),
        ("platformFlagLabel", "phone".to_string()),
        ("language", config.language_id.clone()),
        ("deviceId", Uuid::new_v4().to_string()),
        ("dataTrackingDeviceId", Uuid::new_v4().to_string()),
        ("osVersion", "28".to_string()),
        ("appVersion", "2.21.0".to_string()),
        ("buildVersion", "770".to_string()),
        ("carrierId", "72".to_string()),
        ("carrierName", "Telkomsel".to_string()),
        ("appBundleId", "com.vuclip.viu".to_string()),
        ("vuclipUserId", String::new()),
        ("deviceBrand", "vivo".to_string()),
        ("deviceModel", "V2242A".to_string()),
        ("flavour", "all".to_string()),
    ]
}
