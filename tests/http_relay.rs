//! HTTP relay integration tests
//!
//! 通过 Fake TTS 引擎验证 /api/tts/speak 与 /api/ping

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use speakrelay::application::ChunkLimits;
use speakrelay::domain::speech::ChunkSize;
use speakrelay::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig};
use speakrelay::infrastructure::http::{AppState, HttpServer, ServerConfig};

fn router(config: FakeTtsClientConfig) -> Router {
    let limits = ChunkLimits {
        default_size: ChunkSize::new(512).unwrap(),
        max_size: 4096,
    };
    let state = AppState::new(Arc::new(FakeTtsClient::new(config)), limits);
    HttpServer::new(ServerConfig::default(), state).build_router()
}

fn speak_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/tts/speak")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ping() {
    let app = router(FakeTtsClientConfig::default());
    let request = Request::builder()
        .uri("/api/ping")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["errno"], 0);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["engine"], "fake");
}

#[tokio::test]
async fn test_speak_streams_full_audio() {
    let audio: Vec<u8> = (0..3000u32).map(|i| (i % 200) as u8).collect();
    let app = router(FakeTtsClientConfig::new(audio.clone()).with_fragment_size(77));

    let response = app
        .oneshot(speak_request(json!({ "text": "Hello", "chunk_size": 1024 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert!(response.headers().contains_key("x-request-id"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.as_ref(), audio.as_slice());
}

#[tokio::test]
async fn test_speak_rejects_blank_text() {
    let app = router(FakeTtsClientConfig::default());

    let response = app
        .oneshot(speak_request(json!({ "text": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["errno"], 400);
}

#[tokio::test]
async fn test_speak_rejects_oversized_chunk() {
    let app = router(FakeTtsClientConfig::default());

    let response = app
        .oneshot(speak_request(json!({ "text": "Hello", "chunk_size": 8192 })))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 400);
}

#[tokio::test]
async fn test_speak_reports_upstream_status() {
    let app = router(FakeTtsClientConfig::default().failing(500));

    let response = app
        .oneshot(speak_request(json!({ "text": "Hello" })))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errno"], 502);
    assert!(body["error"].as_str().unwrap().contains("HTTP 500"));
}
