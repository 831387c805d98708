// ABOUTME: End-to-end smoke tests for the base64-gate HTTP API.
// ABOUTME: Exercises the full router through oneshot calls and one real TCP round trip.

use std::sync::Arc;

use axum::body::Body;
use base64_gate_core::DecodeMode;
use base64_gate_server::{AppState, ServerConfig, create_router};
use http::Request;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

const KEY: &str = "smoke-key";

/// Helper to create a test AppState with a known API key.
fn test_app_state(decode_mode: DecodeMode) -> Arc<AppState> {
    Arc::new(AppState::new(ServerConfig {
        api_key: Some(KEY.to_string()),
        decode_mode,
        ..ServerConfig::default()
    }))
}

/// Helper to extract JSON body from a response.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn codec_request(path: &str, key: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::post(path).header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x_api_key", key);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn smoke_test_full_lifecycle() {
    let state = test_app_state(DecodeMode::Strict);

    // 1. GET / -> welcome message, no key needed
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "root should return 200");
    let json = json_body(resp).await;
    assert!(
        !json["message"].as_str().unwrap().is_empty(),
        "welcome message should not be empty"
    );

    // 2. POST /encode -> base64
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(codec_request("/encode", Some(KEY), serde_json::json!({ "input": "hello" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "encode should return 200");
    let json = json_body(resp).await;
    assert_eq!(json["output"], "aGVsbG8=");

    // 3. POST /decode -> original text
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(codec_request("/decode", Some(KEY), serde_json::json!({ "input": "aGVsbG8=" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "decode should return 200");
    let json = json_body(resp).await;
    assert_eq!(json["output"], "hello");

    // 4. Missing input on both endpoints -> 400
    for path in ["/encode", "/decode"] {
        let app = create_router(Arc::clone(&state));
        let resp = app
            .oneshot(codec_request(path, Some(KEY), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "{path} without input should return 400");
        assert_eq!(json_body(resp).await["message"], "Please provide an input");
    }

    // 5. Wrong and missing keys on both endpoints -> 401
    for path in ["/encode", "/decode"] {
        let app = create_router(Arc::clone(&state));
        let resp = app
            .oneshot(codec_request(path, Some("wrong"), serde_json::json!({ "input": "hello" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), 401, "{path} with wrong key should return 401");
        assert_eq!(json_body(resp).await["message"], "Please provide a valid API key");

        let app = create_router(Arc::clone(&state));
        let resp = app
            .oneshot(codec_request(path, None, serde_json::json!({ "input": "hello" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), 401, "{path} without key should return 401");
        assert_eq!(json_body(resp).await["message"], "Please provide an API key");
    }

    // 6. Malformed base64 -> strict rejection
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(codec_request(
            "/decode",
            Some(KEY),
            serde_json::json!({ "input": "not-valid-base64!!" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400, "strict decode should reject malformed input");

    // 7. GET /docs -> interactive HTML explorer
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "docs should return 200");
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("swagger-ui"), "docs should render the explorer");

    // 8. GET /docs/openapi.json -> OpenAPI document
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/docs/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "openapi.json should return 200");
    let json = json_body(resp).await;
    assert!(json["paths"]["/decode"]["post"].is_object());
    assert_eq!(
        json["components"]["securitySchemes"]["apiKeyAuth"]["name"],
        "x_api_key"
    );
}

#[tokio::test]
async fn smoke_test_lenient_decode() {
    let state = test_app_state(DecodeMode::Lenient);

    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(codec_request(
            "/decode",
            Some(KEY),
            serde_json::json!({ "input": "not-valid-base64!!" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "lenient decode should accept malformed input");
    assert_eq!(
        json_body(resp).await["output"],
        "\u{FFFD}\u{FFFD}~\u{FFFD}\u{FFFD}bw\u{FFFD}\u{06B1}\u{FFFD}"
    );
}

#[tokio::test]
async fn smoke_test_unset_secret_locks_codec_routes() {
    let state = Arc::new(AppState::new(ServerConfig::default()));

    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(codec_request("/encode", Some(KEY), serde_json::json!({ "input": "hello" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "root stays open without a secret");
}

#[tokio::test]
async fn smoke_test_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig {
        bind: addr,
        api_key: Some(KEY.to_string()),
        ..ServerConfig::default()
    };
    let server = tokio::spawn(base64_gate_server::serve(listener, config));

    let body = r#"{"input":"hello"}"#;
    let request = format!(
        "POST /encode HTTP/1.1\r\nhost: {addr}\r\nx_api_key: {KEY}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "unexpected response: {response}");
    assert!(response.contains(r#"{"output":"aGVsbG8="}"#), "unexpected body: {response}");

    server.abort();
}
