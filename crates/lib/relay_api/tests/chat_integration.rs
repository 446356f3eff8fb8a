//! Integration tests — build the router against a mock upstream and call each route.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::DateTime;
use relay_api::AppState;
use relay_core::{Relay, RelayConfig};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn app(config: RelayConfig) -> Router {
    let relay = Relay::new(config).expect("relay");
    relay_api::router(AppState::new(relay))
}

fn config_for(server: &MockServer) -> RelayConfig {
    RelayConfig {
        endpoint: format!("{}{COMPLETIONS_PATH}", server.uri()),
        timeout: Duration::from_secs(5),
        credential: None,
    }
    .with_credential("sk-test")
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, json)
}

#[tokio::test]
async fn chat_returns_upstream_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_json(json!({
            "model": "deepseek-chat",
            "messages": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hi! How can I help?"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let router = app(config_for(&server));
    let (status, json) = send(router, chat_request(r#"{"message":"hello"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"response": "Hi! How can I help?"}));
}

#[tokio::test]
async fn chat_without_credential_is_500_and_skips_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = RelayConfig {
        credential: None,
        ..config_for(&server)
    };
    let (status, json) = send(app(config), chat_request(r#"{"message":"hello"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"detail": "DEEPSEEK_API_KEY not found in environment variables"})
    );
}

#[tokio::test]
async fn chat_mirrors_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let router = app(config_for(&server));
    let (status, json) = send(router, chat_request(r#"{"message":"hello"}"#)).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json, json!({"detail": "API Error: rate limited"}));
}

#[tokio::test]
async fn chat_timeout_is_500_after_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = RelayConfig {
        timeout: Duration::from_millis(50),
        ..config_for(&server)
    };
    let (status, json) = send(app(config), chat_request(r#"{"message":"hello"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json["detail"].as_str().expect("detail is string");
    assert!(detail.contains("timed out"), "unexpected detail: {detail}");
}

#[tokio::test]
async fn chat_with_malformed_completion_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"object": "chat.completion"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let router = app(config_for(&server));
    let (status, json) = send(router, chat_request(r#"{"message":"hello"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json.get("response").is_none());
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn chat_rejects_missing_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let router = app(config_for(&server));
    let (status, json) = send(router, chat_request(r#"{"text":"hello"}"#)).await;

    assert!(status.is_client_error(), "unexpected status: {status}");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn chat_rejects_wrong_message_type() {
    let router = app(RelayConfig::default());
    let (status, json) = send(router, chat_request(r#"{"message":42}"#)).await;

    assert!(status.is_client_error(), "unexpected status: {status}");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn chat_rejects_invalid_json() {
    let (status, json) = send(app(RelayConfig::default()), chat_request("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn root_reports_running() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, json) = send(app(RelayConfig::default()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "AI Chat Backend is running!"}));
}

#[tokio::test]
async fn health_is_healthy_without_credential_or_upstream() {
    let config = RelayConfig {
        endpoint: "http://127.0.0.1:1/unreachable".into(),
        ..RelayConfig::default()
    };
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app(config), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    let timestamp = json["timestamp"].as_str().expect("timestamp is string");
    assert!(
        DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "timestamp is not ISO-8601: {timestamp}"
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let req = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();
    let resp = app(RelayConfig::default()).oneshot(req).await.expect("request");

    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn chat_reports_upstream_redirect_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(308).insert_header("location", "/moved"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let router = app(config_for(&server));
    let (status, json) = send(router, chat_request(r#"{"message":"hello"}"#)).await;

    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(json, json!({"detail": "API Error: "}));
}
