//! Router tests that need neither Postgres nor Redis.
//!
//! The pool and the draft store connect lazily, so every request below is
//! answered before any backend is touched.

use std::sync::Arc;

use amiste_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{drafts::DraftStore, Services},
    AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn app() -> Router {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .unwrap();
    let drafts = DraftStore::new(&config.redis.url, config.drafts.ttl_seconds).unwrap();
    let services = Services::new(Repository::new(pool), drafts, &config.history);

    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let response = app()
        .oneshot(Request::get("/api/v1/machines").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_malformed_header_is_rejected() {
    let response = app()
        .oneshot(
            Request::post("/api/v1/drafts")
                .header(AUTHORIZATION, "Token abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_openapi_document_lists_wizard_routes() {
    let response = app()
        .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/drafts/{id}/next"].is_object());
    assert!(body["paths"]["/machines/{id}/specs"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
