// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Review routes.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Review, ReviewInput};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/excursions/{id}/reviews",
            get(list_reviews).post(create_review),
        )
        .route("/user/reviews", get(my_reviews))
}

async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.reviews.list_for_excursion(&id).await?))
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: AuthUser,
    Json(input): Json<ReviewInput>,
) -> Result<Json<Review>> {
    Ok(Json(state.reviews.create(&caller, &id, input).await?))
}

async fn my_reviews(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.reviews.list_by_user(&caller).await?))
}
