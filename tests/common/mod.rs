// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use ausflug_finder::config::Config;
use ausflug_finder::db::Database;
use ausflug_finder::routes::create_router;
use ausflug_finder::services::{IdentityProfile, IdentityProvider};
use ausflug_finder::AppState;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// Provider session id the static identity provider accepts.
pub const OAUTH_SESSION_ID: &str = "provider-session-1";
pub const OAUTH_EMAIL: &str = "oauth.user@example.com";

/// Check if emulator is available via environment variable.
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Connect to the Firestore emulator.
pub async fn test_db() -> Database {
    Database::firestore("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Identity provider that knows exactly one session id.
pub fn test_identity_provider() -> IdentityProvider {
    let mut profiles = HashMap::new();
    profiles.insert(
        OAUTH_SESSION_ID.to_string(),
        IdentityProfile {
            email: OAUTH_EMAIL.to_string(),
            name: "OAuth User".to_string(),
            picture: Some("https://example.com/avatar.png".to_string()),
        },
    );
    IdentityProvider::with_static_profiles(profiles)
}

/// Create a test app on the in-memory store.
/// Returns the router and the shared state.
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Database::in_memory())
}

pub fn create_test_app_with(db: Database) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        db,
        test_identity_provider(),
    ));
    (create_router(state.clone()), state)
}

/// Build a JSON request, optionally with a Bearer token.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a body-less request, optionally with a Bearer token.
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send a request and decode the JSON body (`Null` when empty or not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

/// Register a password account; returns (token, user id).
pub async fn register(app: &Router, name: &str, email: &str) -> (String, String) {
    let (status, _, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "name": name, "email": email, "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {}", body);
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

/// A valid excursion body.
pub fn excursion_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Ein wunderbarer Ausflug für die ganze Familie",
        "address": "Seestrasse 1, 8000 Zürich",
        "region": "CH-ZH",
        "category": "HIKING",
        "parking_situation": "GOOD",
        "has_grill": true,
        "is_outdoor": true,
        "is_free": true,
        "parking_is_free": false
    })
}

/// Create an excursion as `token`; returns its id.
pub async fn create_excursion(app: &Router, token: &str, title: &str) -> String {
    let (status, _, body) = send(
        app,
        json_request("POST", "/api/excursions", Some(token), excursion_body(title)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Post a review as `token`.
pub async fn post_review(
    app: &Router,
    token: &str,
    excursion_id: &str,
    rating: u8,
) -> (StatusCode, Value) {
    let (status, _, body) = send(
        app,
        json_request(
            "POST",
            &format!("/api/excursions/{}/reviews", excursion_id),
            Some(token),
            json!({ "rating": rating, "comment": "Sehr schön, gerne wieder!" }),
        ),
    )
    .await;
    (status, body)
}
