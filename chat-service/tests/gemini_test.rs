//! Gemini provider tests against an in-process mock of the Generative Language API.

mod common;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chat_service::services::providers::{GeminiConfig, GeminiGenerator};
use chat_service::services::{PromptTemplate, TextGenerator};
use common::{test_config, TestApp};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct Upstream {
    last_request: Arc<Mutex<Option<(String, Value)>>>,
}

#[derive(Deserialize)]
struct KeyParam {
    key: String,
}

async fn generate_content(
    State(upstream): State<Upstream>,
    Path(model_action): Path<String>,
    Query(params): Query<KeyParam>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *upstream.last_request.lock().await = Some((model_action, body));

    match params.key.as_str() {
        "rate-limited" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": { "code": 429, "message": "Resource exhausted" } })),
        ),
        "invalid" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "API key not valid" } })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "Widget Pro sold 1,204 units." }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 40, "candidatesTokenCount": 8, "totalTokenCount": 48 }
            })),
        ),
    }
}

/// Returns the API base URL of a freshly spawned mock upstream.
async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/v1beta/models/:model_action", post(generate_content))
        .with_state(upstream);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1beta", addr)
}

fn generator(api_base: &str, api_key: &str) -> GeminiGenerator {
    GeminiGenerator::new(
        GeminiConfig {
            api_key: api_key.to_string(),
            model: "gemini-test".to_string(),
            api_base: api_base.to_string(),
        },
        PromptTemplate::new("Answer as the sales analyst."),
    )
    .expect("client builds")
}

#[tokio::test]
async fn sends_formatted_prompt_and_returns_text() {
    let upstream = Upstream::default();
    let api_base = spawn_upstream(upstream.clone()).await;

    let text = generator(&api_base, "test-key")
        .generate("What was last month's top-selling product?")
        .await
        .unwrap();

    assert_eq!(text, "Widget Pro sold 1,204 units.");

    let (model_action, body) = upstream.last_request.lock().await.take().unwrap();
    assert_eq!(model_action, "gemini-test:generateContent");
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Answer as the sales analyst.\n\nUser question: What was last month's top-selling product?\nAnswer:"
    );
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let api_base = spawn_upstream(Upstream::default()).await;

    let err = generator(&api_base, "rate-limited")
        .generate("hi")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Rate limited by the model provider");
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
    let api_base = spawn_upstream(Upstream::default()).await;

    let err = generator(&api_base, "invalid")
        .generate("hi")
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("API error: Gemini API error 400"), "{message}");
    assert!(message.contains("API key not valid"));
}

#[tokio::test]
async fn missing_api_key_fails_without_calling_upstream() {
    let upstream = Upstream::default();
    let api_base = spawn_upstream(upstream.clone()).await;

    let err = generator(&api_base, "").generate("hi").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Provider not configured: GOOGLE_API_KEY is not set"
    );
    assert!(upstream.last_request.lock().await.is_none());
}

#[tokio::test]
async fn unreachable_upstream_is_a_network_error() {
    let err = generator("http://127.0.0.1:1/v1beta", "test-key")
        .generate("hi")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Network error:"));
}

#[tokio::test]
async fn chat_endpoint_relays_gemini_answer() {
    let api_base = spawn_upstream(Upstream::default()).await;
    let app = TestApp::spawn_with(Arc::new(generator(&api_base, "test-key"))).await;

    let response = app
        .post_chat(r#"{"query": "What was last month's top-selling product?"}"#)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "response": "Widget Pro sold 1,204 units." }));
}

#[tokio::test]
async fn chat_endpoint_surfaces_gemini_failure() {
    let api_base = spawn_upstream(Upstream::default()).await;
    let mut config = test_config();
    config.generation.api_base = api_base;
    config.generation.api_key = "rate-limited".to_string();

    let generator = chat_service::services::providers::from_config(&config.generation).unwrap();
    let app = TestApp::spawn_with_config(config, generator).await;

    let response = app.post_chat(r#"{"query": "hello"}"#).await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "error": "Rate limited by the model provider" })
    );
}
