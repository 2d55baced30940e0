//! Live API tests against a running server with Postgres and Redis.
//!
//! Tokens are minted with the default development secret, so the server must
//! run with the default `auth` configuration.

use amiste_server::models::profile::SessionClaims;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";
const DEV_SECRET: &str = "change-this-secret-in-production";

/// Token for a fresh user, who signs in as a visitor
fn visitor_token() -> String {
    let claims = SessionClaims {
        sub: Uuid::new_v4(),
        email: Some(format!("{}@amiste.test", Uuid::new_v4())),
        aud: "authenticated".to_string(),
        exp: chrono::Utc::now().timestamp() + 600,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(DEV_SECRET.as_bytes()))
        .expect("Failed to sign token")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_readiness() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_first_sign_in_is_visitor() {
    let client = Client::new();

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(visitor_token())
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["capabilities"]["role"], "visitante");
    assert_eq!(body["capabilities"]["grants"]["machines"]["view"], true);
    assert_eq!(body["capabilities"]["grants"]["checklists"]["create"], false);
}

#[tokio::test]
#[ignore]
async fn test_visitor_can_read_catalog() {
    let client = Client::new();

    let response = client
        .get(format!("{}/machines", BASE_URL))
        .bearer_auth(visitor_token())
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_visitor_cannot_open_draft() {
    let client = Client::new();

    let response = client
        .post(format!("{}/drafts", BASE_URL))
        .bearer_auth(visitor_token())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_visitor_cannot_create_machine() {
    let client = Client::new();

    let response = client
        .post(format!("{}/machines", BASE_URL))
        .bearer_auth(visitor_token())
        .json(&json!({ "name": "Saeco Aulika" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}
