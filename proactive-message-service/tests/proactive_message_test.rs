//! Router-level tests for `GET /get-proactive-message`.
//!
//! The provider is scripted with `MockTextProvider`, so no network is needed.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use proactive_message_service::catalog::{Catalog, Gemstone};
use proactive_message_service::handlers::proactive::GENERATION_FAILED_MESSAGE;
use proactive_message_service::prompt::build_proactive_prompt;
use proactive_message_service::services::providers::mock::MockTextProvider;
use proactive_message_service::services::providers::ProviderError;
use proactive_message_service::services::ProactiveMessageService;
use proactive_message_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

const ROUTE: &str = "/get-proactive-message";

fn app_with(provider: Arc<MockTextProvider>) -> Router {
    let prompt = build_proactive_prompt(&Catalog::built_in()).unwrap();
    build_router(AppState::new(ProactiveMessageService::new(prompt, provider)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn returns_generated_text_verbatim() {
    let text = "Dzień dobry! 💎 Polecam **Granat** za 290 PLN.\n\nCzy mogę pomóc? \"cytat\"";
    let provider = Arc::new(MockTextProvider::new());
    provider.push_text(text);

    let response = app_with(provider).oneshot(get(ROUTE)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({ "message": text }));
}

#[tokio::test]
async fn provider_failure_returns_fixed_error() {
    let provider = Arc::new(MockTextProvider::new());
    provider.push_error(ProviderError::ApiError(
        "Gemini API error 500 Internal Server Error: backend exploded".to_string(),
    ));

    let response = app_with(provider).oneshot(get(ROUTE)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let raw = body_string(response).await;
    assert!(!raw.contains("backend exploded"));
    assert!(!raw.contains("Gemini API error"));

    let body: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(body, json!({ "error": GENERATION_FAILED_MESSAGE }));
}

#[tokio::test]
async fn every_provider_error_kind_maps_to_500() {
    let errors = vec![
        ProviderError::NetworkError("connection refused".to_string()),
        ProviderError::RateLimited,
        ProviderError::ContentFiltered,
        ProviderError::EmptyResponse,
        ProviderError::NotConfigured("no key".to_string()),
    ];

    for error in errors {
        let label = error.to_string();
        let provider = Arc::new(MockTextProvider::new());
        provider.push_error(error);

        let response = app_with(provider).oneshot(get(ROUTE)).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "for {label}"
        );
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, json!({ "error": GENERATION_FAILED_MESSAGE }));
    }
}

#[tokio::test]
async fn consecutive_calls_are_not_cached() {
    let provider = Arc::new(MockTextProvider::new());
    provider.push_text("Pierwsza wiadomość");
    provider.push_text("Druga wiadomość");
    let app = app_with(provider.clone());

    let first = app.clone().oneshot(get(ROUTE)).await.unwrap();
    let second = app.oneshot(get(ROUTE)).await.unwrap();

    let first: Value = serde_json::from_str(&body_string(first).await).unwrap();
    let second: Value = serde_json::from_str(&body_string(second).await).unwrap();
    assert_eq!(first["message"], "Pierwsza wiadomość");
    assert_eq!(second["message"], "Druga wiadomość");
    assert_eq!(provider.prompts().len(), 2);
}

#[tokio::test]
async fn failure_does_not_poison_later_requests() {
    let provider = Arc::new(MockTextProvider::new());
    provider.push_error(ProviderError::RateLimited);
    provider.push_text("Już działa");
    let app = app_with(provider);

    let failed = app.clone().oneshot(get(ROUTE)).await.unwrap();
    let recovered = app.oneshot(get(ROUTE)).await.unwrap();

    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(recovered.status(), StatusCode::OK);
}

#[tokio::test]
async fn same_prompt_is_sent_on_every_call() {
    let provider = Arc::new(MockTextProvider::new());
    for i in 0..5 {
        provider.push_text(format!("odpowiedź {i}"));
    }
    let app = app_with(provider.clone());

    for _ in 0..5 {
        let response = app.clone().oneshot(get(ROUTE)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let prompts = provider.prompts();
    let expected = build_proactive_prompt(&Catalog::built_in()).unwrap();
    assert_eq!(prompts.len(), 5);
    assert!(prompts.iter().all(|p| *p == expected));
}

#[tokio::test]
async fn prompt_sent_upstream_embeds_catalog() {
    let catalog = Catalog::new(vec![Gemstone::new("Granat", 290)]).unwrap();
    let prompt = build_proactive_prompt(&catalog).unwrap();
    let provider = Arc::new(MockTextProvider::new());
    provider.push_text("ok");
    let app = build_router(AppState::new(ProactiveMessageService::new(
        prompt,
        provider.clone(),
    )));

    app.oneshot(get(ROUTE)).await.unwrap();

    let sent = &provider.prompts()[0];
    assert!(sent.contains("Granat"));
    assert!(sent.contains("290"));
}

#[tokio::test]
async fn query_string_is_ignored() {
    let provider = Arc::new(MockTextProvider::new());
    provider.push_text("ok");

    let response = app_with(provider.clone())
        .oneshot(get("/get-proactive-message?product=pierscionek-42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!provider.prompts()[0].contains("pierscionek-42"));
}

#[tokio::test]
async fn cross_origin_get_is_allowed() {
    let provider = Arc::new(MockTextProvider::new());
    provider.push_text("ok");

    let response = app_with(provider)
        .oneshot(
            Request::builder()
                .uri(ROUTE)
                .header(header::ORIGIN, "https://epir-bizuteria.myshopify.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn preflight_does_not_call_provider() {
    let provider = Arc::new(MockTextProvider::new());

    let response = app_with(provider.clone())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(ROUTE)
                .header(header::ORIGIN, "https://epir-bizuteria.myshopify.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn response_carries_request_id() {
    let provider = Arc::new(MockTextProvider::new());
    provider.push_text("ok");

    let response = app_with(provider)
        .oneshot(
            Request::builder()
                .uri(ROUTE)
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn only_get_is_routed() {
    let provider = Arc::new(MockTextProvider::new());

    let post = app_with(provider.clone())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(ROUTE)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let unknown = app_with(provider.clone())
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(post.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert!(provider.prompts().is_empty());
}
