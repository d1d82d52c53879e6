mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{BASE_URL, cookie, create_test_app};
use serde_json::json;
use shortlink::domain::clock::Clock;

#[tokio::test]
async fn test_shorten_requires_session() {
    let app = create_test_app();

    let response = app
        .server
        .post("/api/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "unauthorized"
    );
}

#[tokio::test]
async fn test_shorten_success() {
    let app = create_test_app();
    let token = app.register("alice", "longenough1").await;

    let response = app
        .server
        .post("/api/url")
        .add_header("Cookie", cookie(&token))
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 7);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["url"], format!("{BASE_URL}/{code}"));
    assert!(body.get("expires").is_none());
}

#[tokio::test]
async fn test_shorten_rejects_invalid_urls() {
    let app = create_test_app();
    let token = app.register("alice", "longenough1").await;

    for url in ["not-a-url", "/relative/path", ""] {
        let response = app
            .server
            .post("/api/url")
            .add_header("Cookie", cookie(&token))
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_rejects_oversized_url() {
    let app = create_test_app();
    let token = app.register("alice", "longenough1").await;

    let url = format!("https://example.com/{}", "a".repeat(2048));
    let response = app
        .server
        .post("/api/url")
        .add_header("Cookie", cookie(&token))
        .json(&json!({ "url": url }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert!(body["error"]["details"]["fields"]["url"].is_string());
}

#[tokio::test]
async fn test_shorten_with_future_expiry() {
    let app = create_test_app();
    let token = app.register("alice", "longenough1").await;
    let expires = app.clock.now() + Duration::days(1);

    let response = app
        .server
        .post("/api/url")
        .add_header("Cookie", cookie(&token))
        .json(&json!({ "url": "https://example.com", "expires": expires }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<serde_json::Value>()["expires"].is_string());
}

#[tokio::test]
async fn test_shorten_rejects_past_expiry() {
    let app = create_test_app();
    let token = app.register("alice", "longenough1").await;
    let expires = app.clock.now() - Duration::minutes(1);

    let response = app
        .server
        .post("/api/url")
        .add_header("Cookie", cookie(&token))
        .json(&json!({ "url": "https://example.com", "expires": expires }))
        .await;

    response.assert_status_bad_request();
}
