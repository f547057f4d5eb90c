// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo upload tests: whole-batch validation, storage and serving.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;
use common::{create_excursion, empty_request, register, send};

const BOUNDARY: &str = "----ausflug-test-boundary";

/// (file name, content type, bytes)
type Part<'a> = (&'a str, &'a str, &'a [u8]);

fn multipart_request(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

fn stored_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_mixed_batch_rejected_and_nothing_persisted() {
    let (app, state) = common::create_test_app();
    let (token, _) = register(&app, "Anna", "anna@example.com").await;
    let id = create_excursion(&app, &token, "Fotospot").await;

    let request = multipart_request(
        &format!("/api/excursions/{}/photos", id),
        Some(&token),
        &[
            ("notes.txt", "text/plain", b"hello".as_slice()),
            ("view.png", "image/png", b"\x89PNG\r\n".as_slice()),
        ],
    );
    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_content_type");
    assert_eq!(stored_files(&state.config.upload_dir), 0);

    let excursion = state.db.get_excursion(&id).await.unwrap().unwrap();
    assert!(excursion.photos.is_empty());
}

#[tokio::test]
async fn test_upload_appends_and_serves_photos() {
    let (app, state) = common::create_test_app();
    let (token, _) = register(&app, "Anna", "anna@example.com").await;
    let id = create_excursion(&app, &token, "Fotospot").await;
    let uri = format!("/api/excursions/{}/photos", id);

    let (status, _, first) = send(
        &app,
        multipart_request(&uri, Some(&token), &[("Sunset.JPEG", "image/jpeg", b"jpegdata".as_slice())]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", first);

    let (status, _, second) = send(
        &app,
        multipart_request(
            &uri,
            Some(&token),
            &[
                ("no-extension", "image/png", b"pngdata".as_slice()),
                ("weird.p$p", "image/webp", b"webpdata".as_slice()),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", second);

    let first_files: Vec<String> = serde_json::from_value(first["uploaded_files"].clone()).unwrap();
    let second_files: Vec<String> =
        serde_json::from_value(second["uploaded_files"].clone()).unwrap();
    assert_eq!(first_files.len(), 1);
    assert!(first_files[0].ends_with(".jpeg"));
    assert_eq!(second_files.len(), 2);
    assert!(second_files.iter().all(|f| f.ends_with(".jpg")));

    let excursion = state.db.get_excursion(&id).await.unwrap().unwrap();
    let mut expected = first_files.clone();
    expected.extend(second_files);
    assert_eq!(excursion.photos, expected);

    let served = fetch_photo(&app, &format!("/uploads/photos/{}", first_files[0])).await;
    assert_eq!(served, b"jpegdata".as_slice());

    let _ = std::fs::remove_dir_all(&state.config.upload_dir);
}

#[tokio::test]
async fn test_only_owner_may_upload() {
    let (app, state) = common::create_test_app();
    let (owner, _) = register(&app, "Anna", "anna@example.com").await;
    let (intruder, _) = register(&app, "Ben", "ben@example.com").await;
    let id = create_excursion(&app, &owner, "Privat").await;
    let uri = format!("/api/excursions/{}/photos", id);
    let parts: &[Part<'_>] = &[("a.png", "image/png", b"png".as_slice())];

    let (status, _, _) = send(&app, multipart_request(&uri, Some(&intruder), parts)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(&app, multipart_request(&uri, None, parts)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        multipart_request("/api/excursions/missing/photos", Some(&owner), parts),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(stored_files(&state.config.upload_dir), 0);
}

#[tokio::test]
async fn test_empty_batch_is_validation_error() {
    let (app, _) = common::create_test_app();
    let (token, _) = register(&app, "Anna", "anna@example.com").await;
    let id = create_excursion(&app, &token, "Leer").await;

    let (status, _, body) = send(
        &app,
        multipart_request(&format!("/api/excursions/{}/photos", id), Some(&token), &[]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_missing_photo_is_404() {
    let (app, _) = common::create_test_app();
    let (status, _, _) = send(
        &app,
        empty_request("GET", "/uploads/photos/does-not-exist.jpg", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Fetch a served photo's raw bytes.
async fn fetch_photo(app: &axum::Router, uri: &str) -> Vec<u8> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
