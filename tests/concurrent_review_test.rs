// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Concurrent reviews of one excursion must not lose aggregate updates.

use axum::http::StatusCode;

mod common;
use common::{create_excursion, empty_request, post_review, register, send};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reviews_keep_aggregate_consistent() {
    let (app, state) = common::create_test_app();
    let (author, _) = register(&app, "Autorin", "author@example.com").await;
    let id = create_excursion(&app, &author, "Vierwaldstättersee").await;

    let mut tokens = Vec::new();
    for i in 0..12 {
        let (token, _) = register(&app, "Gast", &format!("guest{}@example.com", i)).await;
        tokens.push(token);
    }

    let mut handles = Vec::new();
    for (i, token) in tokens.into_iter().enumerate() {
        let app = app.clone();
        let id = id.clone();
        let rating = (i % 5) as u8 + 1;
        handles.push(tokio::spawn(async move {
            let (status, body) = post_review(&app, &token, &id, rating).await;
            assert_eq!(status, StatusCode::OK, "{}", body);
            rating
        }));
    }

    let mut sum = 0u32;
    for handle in handles {
        sum += u32::from(handle.await.unwrap());
    }

    let (_, _, excursion) = send(
        &app,
        empty_request("GET", &format!("/api/excursions/{}", id), None),
    )
    .await;

    let stored = state.db.list_reviews_for_excursion(&id).await.unwrap();
    assert_eq!(stored.len(), 12);
    assert_eq!(excursion["review_count"], 12);

    let expected = ((sum as f64 / 12.0) * 10.0).round() / 10.0;
    assert_eq!(excursion["average_rating"].as_f64().unwrap(), expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_reviews_admit_one() {
    let (app, state) = common::create_test_app();
    let (token, _) = register(&app, "Anna", "anna@example.com").await;
    let id = create_excursion(&app, &token, "Bodensee").await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let app = app.clone();
        let token = token.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            post_review(&app, &token, &id, 4).await.0
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::OK {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(state.db.list_reviews_for_excursion(&id).await.unwrap().len(), 1);
}
