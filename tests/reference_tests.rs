// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reference lookup endpoints and health check.

use axum::http::StatusCode;
use serde_json::Value;

mod common;
use common::{empty_request, send};

fn values(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["value"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_lookups_are_ordered_key_label_pairs() {
    let (app, _) = common::create_test_app();

    let (status, _, categories) = send(&app, empty_request("GET", "/api/categories", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories[0]["value"], "HIKING");
    assert_eq!(categories[0]["label"], "Wanderung");
    assert_eq!(values(&categories).last(), Some(&"OTHER"));

    let (_, _, parking) = send(&app, empty_request("GET", "/api/parking-situations", None)).await;
    assert_eq!(
        values(&parking),
        vec!["EXCELLENT", "GOOD", "LIMITED", "POOR", "NONE"]
    );

    let (_, _, countries) = send(&app, empty_request("GET", "/api/countries", None)).await;
    assert_eq!(values(&countries), vec!["CH", "DE", "AT"]);
}

#[tokio::test]
async fn test_regions_and_cantons() {
    let (app, _) = common::create_test_app();

    let (_, _, all) = send(&app, empty_request("GET", "/api/regions", None)).await;
    assert_eq!(all.as_array().unwrap().len(), 26 + 16 + 9);

    let (_, _, cantons) = send(&app, empty_request("GET", "/api/cantons", None)).await;
    let cantons = values(&cantons);
    assert_eq!(cantons.len(), 26);
    assert!(cantons.iter().all(|k| k.starts_with("CH-")));

    let (_, _, austria) = send(
        &app,
        empty_request("GET", "/api/regions?country=%C3%96sterreich", None),
    )
    .await;
    let austria = values(&austria);
    assert_eq!(austria.len(), 9);
    assert!(austria.iter().all(|k| k.starts_with("AT-")));

    let (status, _, error) = send(
        &app,
        empty_request("GET", "/api/regions?country=FR", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "invalid_value");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = common::create_test_app();
    let (status, headers, body) = send(&app, empty_request("GET", "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
}

#[tokio::test]
async fn test_cors_preflight_allows_credentials() {
    let (app, state) = common::create_test_app();

    let request = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/excursions")
        .header("Origin", state.config.frontend_url.as_str())
        .header("Access-Control-Request-Method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, request).await;

    assert!(status.is_success());
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        state.config.frontend_url.as_str()
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}
