//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static page from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/languages", get(http::http_languages))
        .route("/api/v1/problem", get(http::http_get_problem))
        .route("/api/v1/advice", post(http::http_post_advice))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::tests::{text_response, GEN_PATH};
    use crate::logic::tests::state_for;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_and_languages() {
        let server = MockServer::start().await;
        let app = build_router(Arc::new(state_for(&server, false).await));

        let (status, v) = send(app.clone(), get_req("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["ok"], true);

        let (_, v) = send(app, get_req("/api/v1/languages")).await;
        assert_eq!(v["languages"], serde_json::json!(["Python", "Java", "C++", "JavaScript"]));
    }

    #[tokio::test]
    async fn problem_lookup_statuses() {
        let server = MockServer::start().await;
        let app = build_router(Arc::new(state_for(&server, false).await));

        let (status, v) = send(app.clone(), get_req("/api/v1/problem?id=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["slug"], "two-sum");
        assert_eq!(v["difficulty"], "Easy");
        assert_eq!(v["difficulty_color"], "#00b894");

        let (status, v) = send(app.clone(), get_req("/api/v1/problem?id=2")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v["error"]["code"], "NOT_FOUND");

        let (status, v) = send(app, get_req("/api/v1/problem?id=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn catalog_outage_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/problems/all/"))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;
        let app = build_router(Arc::new(state_for(&server, false).await));

        let (status, v) = send(app, get_req("/api/v1/problem?id=1")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(v["error"]["code"], "FETCH_ERROR");
    }

    #[tokio::test]
    async fn advice_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Think about a sliding window.")))
            .mount(&server)
            .await;
        let app = build_router(Arc::new(state_for(&server, true).await));

        let (status, v) = send(
            app,
            post_json("/api/v1/advice", serde_json::json!({ "id": 3, "mode": "hint", "language": "Python" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["text"], "Think about a sliding window.");
        assert_eq!(v["fallback"], false);
        assert_eq!(v["mode"], "hint");
        assert_eq!(v["problem"]["difficulty"], "Medium");
        assert!(v.get("code_language").is_none());
    }

    #[tokio::test]
    async fn malformed_problem_queries_use_error_envelope() {
        let server = MockServer::start().await;
        let app = build_router(Arc::new(state_for(&server, false).await));

        for uri in ["/api/v1/problem?id=abc", "/api/v1/problem?id=-1", "/api/v1/problem?id=", "/api/v1/problem"] {
            let (status, v) = send(app.clone(), get_req(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(v["error"]["code"], "INVALID_REQUEST", "{uri}");
            assert!(v["error"]["message"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn malformed_advice_bodies_use_error_envelope() {
        let server = MockServer::start().await;
        let app = build_router(Arc::new(state_for(&server, false).await));

        let (status, v) = send(
            app.clone(),
            post_json("/api/v1/advice", serde_json::json!({ "id": 1, "mode": "bogus", "language": "Python" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"]["code"], "INVALID_REQUEST");

        let (status, v) = send(app.clone(), post_json("/api/v1/advice", serde_json::json!({ "mode": "hint" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"]["code"], "INVALID_REQUEST");

        let raw = Request::builder()
            .method("POST")
            .uri("/api/v1/advice")
            .body(Body::from("{\"id\":1}"))
            .unwrap();
        let (status, v) = send(app, raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"]["code"], "INVALID_REQUEST");
    }
}
