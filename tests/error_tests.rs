// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error-to-response mapping.

use ausflug_finder::error::AppError;
use axum::{http::StatusCode, response::IntoResponse};
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_status_and_code_table() {
    let cases = [
        (AppError::Unauthenticated, StatusCode::UNAUTHORIZED, "unauthenticated"),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED, "invalid_credentials"),
        (AppError::Forbidden, StatusCode::FORBIDDEN, "forbidden"),
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "not_found"),
        (AppError::DuplicateEmail, StatusCode::BAD_REQUEST, "duplicate_email"),
        (AppError::DuplicateReview, StatusCode::BAD_REQUEST, "duplicate_review"),
        (AppError::InvalidValue("region"), StatusCode::BAD_REQUEST, "invalid_value"),
        (AppError::InvalidContentType, StatusCode::BAD_REQUEST, "invalid_content_type"),
        (AppError::Validation("x".into()), StatusCode::BAD_REQUEST, "validation_error"),
        (AppError::IdentityProvider("x".into()), StatusCode::BAD_REQUEST, "invalid_session"),
        (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
        ),
    ];

    for (err, status, code) in cases {
        let (actual_status, body) = render(err).await;
        assert_eq!(actual_status, status, "status for {}", code);
        assert_eq!(body["error"], code);
    }
}

#[tokio::test]
async fn test_internal_details_are_not_leaked() {
    let (_, body) = render(AppError::Database("connection refused to 10.0.0.7".into())).await;
    assert!(body.get("details").is_none());

    let (_, body) = render(AppError::IdentityProvider("upstream returned 502".into())).await;
    assert_eq!(body["details"], "Invalid session");
}

#[tokio::test]
async fn test_invalid_value_names_field() {
    let (_, body) = render(AppError::InvalidValue("parking_situation")).await;
    assert!(body["details"].as_str().unwrap().contains("parking_situation"));
}

#[tokio::test]
async fn test_validation_errors_name_every_field() {
    use ausflug_finder::models::ReviewInput;
    use validator::Validate;

    let input = ReviewInput {
        rating: 9,
        comment: "kurz".into(),
    };
    let err: AppError = input.validate().unwrap_err().into();

    let (status, body) = render(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"], "invalid fields: comment, rating");
}
