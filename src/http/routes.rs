//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{
    detail, favicon, health_check, home, index, not_found, search, session_info, stream,
    version_check,
};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Documentation
        .route("/", get(index))
        // API
        .route("/api/home", get(home))
        .route("/api/search", get(search))
        .route("/api/detail/{id}", get(detail))
        .route("/api/stream/{ccs_product_id}", get(stream))
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        // Debug endpoints
        .route("/debug/session", get(session_info))
        .route("/favicon.ico", any(favicon))
        .route("/favicon.png", any(favicon))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found);

    let router = if state.config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS, Method::HEAD])
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
            .max_age(Duration::from_secs(3600));
        router.layer(cors)
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerConfig, UpstreamConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> Router {
        let config = ServerConfig {
            upstream: UpstreamConfig {
                base_url: server.uri(),
                ..Default::default()
            },
            ..Default::default()
        };
        create_router(Arc::new(AppState::new(config).unwrap()))
    }

    async fn mount_token(server: &MockServer, times: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
            .expect(times)
            .mount(server)
            .await;
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        send(app, Method::GET, uri).await
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = fetch(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_create_router() {
        let state = Arc::new(AppState::new(ServerConfig::default()).unwrap());
        let _router = create_router(state);
    }

    #[tokio::test]
    async fn test_home_envelope() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/mobile"))
            .and(query_param("r", "/home/index"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"banner": []}})),
            )
            .mount(&server)
            .await;

        let (status, body) = get_json(app_for(&server), "/api/home").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"banner": []}}));
    }

    #[tokio::test]
    async fn test_search_requires_q() {
        let server = MockServer::start().await;
        mount_token(&server, 0).await;
        let app = app_for(&server);

        for uri in ["/api/search", "/api/search?q=", "/api/search?page=2"] {
            let (status, body) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body,
                json!({"success": false, "error": "Query parameter (q) is required"})
            );
        }
    }

    #[tokio::test]
    async fn test_search_invalid_page_makes_no_upstream_call() {
        let server = MockServer::start().await;
        mount_token(&server, 0).await;

        let (status, body) = get_json(app_for(&server), "/api/search?q=love&page=two").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": "Invalid page."}));
    }

    #[tokio::test]
    async fn test_search_defaults_forwarded() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/mobile"))
            .and(query_param("r", "/search/video"))
            .and(query_param("keyword[]", "love"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "18"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get_json(app_for(&server), "/api/search?q=love").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_detail_product_list() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(query_param("r", "/vod/detail"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"series": {"series_id": "s-9"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("r", "/vod/product-list"))
            .and(query_param("series_id", "s-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"product_list": [{"product_id": "42"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get_json(app_for(&server), "/api/detail/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["metadata"]["series"]["series_id"], "s-9");
        assert_eq!(body["data"]["product_list"], json!([{"product_id": "42"}]));
    }

    #[tokio::test]
    async fn test_upstream_failure_envelope() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/playback/distribute"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;
        let app = app_for(&server);

        for _ in 0..2 {
            let (status, body) = get_json(app.clone(), "/api/stream/ccs-1").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().contains("503"));
        }
    }

    #[tokio::test]
    async fn test_favicon_and_not_found() {
        let server = MockServer::start().await;
        let app = app_for(&server);

        let (status, body) = fetch(app.clone(), "/favicon.ico").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = fetch(app.clone(), "/favicon.png").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(app.clone(), Method::POST, "/favicon.ico").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, body) = fetch(app.clone(), "/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(String::from_utf8(body).unwrap().contains("404"));

        // Known path, wrong method
        for (method, uri) in [(Method::POST, "/api/home"), (Method::DELETE, "/api/search")] {
            let (status, body) = send(app.clone(), method, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(String::from_utf8(body).unwrap().contains("404"));
        }
    }

    #[tokio::test]
    async fn test_rejected_extractors_use_envelope() {
        let server = MockServer::start().await;
        mount_token(&server, 0).await;
        let app = app_for(&server);

        let (status, body) = get_json(app.clone(), "/api/search?q=a&q=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("duplicate field"));

        for uri in ["/api/detail/%FF", "/api/stream/%FF"] {
            let (status, body) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().contains("UTF-8"));
        }
    }

    #[tokio::test]
    async fn test_lenient_numeric_search_params_forwarded() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/mobile"))
            .and(query_param("r", "/search/video"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(4)
            .mount(&server)
            .await;
        let app = app_for(&server);

        for uri in [
            "/api/search?q=a&page=-1",
            "/api/search?q=a&page=1.5",
            "/api/search?q=a&page=",
            "/api/search?q=a&count=99999999999",
        ] {
            let (status, body) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["success"], true);
        }
    }

    #[tokio::test]
    async fn test_version_route() {
        let server = MockServer::start().await;
        let (status, body) = fetch(app_for(&server), "/version").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            format!("viu-gateway v{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[tokio::test]
    async fn test_session_info_hides_token() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        let state = Arc::new(
            AppState::new(ServerConfig {
                upstream: UpstreamConfig {
                    base_url: server.uri(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .unwrap(),
        );
        let app = create_router(Arc::clone(&state));

        let (_, body) = get_json(app.clone(), "/debug/session").await;
        assert_eq!(body["authenticated"], false);

        state.upstream.authenticate().await.unwrap();
        let (_, body) = get_json(app, "/debug/session").await;
        assert_eq!(body["authenticated"], true);
        assert!(!body.to_string().contains("tok-1"));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let server = MockServer::start().await;
        let app = app_for(&server);

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/home")
            .header(header::ORIGIN, "http://localhost:8080")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
