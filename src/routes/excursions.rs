// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Excursion catalog and photo upload routes.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::excursion::{ExcursionDetail, ExcursionQuery};
use crate::models::{Excursion, ExcursionInput};
use crate::services::UploadedPhoto;
use crate::AppState;

pub fn routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/excursions", get(list_excursions).post(create_excursion))
        .route(
            "/excursions/{id}",
            get(get_excursion)
                .put(update_excursion)
                .delete(delete_excursion),
        )
        .route(
            "/excursions/{id}/photos",
            post(upload_photos).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub uploaded_files: Vec<String>,
}

async fn list_excursions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExcursionQuery>,
) -> Result<Json<Vec<Excursion>>> {
    let filter = query.normalize()?;
    let excursions = state.excursions.list(&filter).await?;

    tracing::debug!(count = excursions.len(), filter = ?filter, "Listed excursions");
    Ok(Json(excursions))
}

async fn get_excursion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: Option<AuthUser>,
) -> Result<Json<ExcursionDetail>> {
    let detail = state.excursions.detail(&id, caller.as_ref()).await?;
    Ok(Json(detail))
}

async fn create_excursion(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(input): Json<ExcursionInput>,
) -> Result<Json<Excursion>> {
    let excursion = state.excursions.create(&caller, input).await?;
    Ok(Json(excursion))
}

async fn update_excursion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: AuthUser,
    Json(input): Json<ExcursionInput>,
) -> Result<Json<Excursion>> {
    let excursion = state.excursions.update(&caller, &id, input).await?;
    Ok(Json(excursion))
}

async fn delete_excursion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: AuthUser,
) -> Result<Json<DeletedResponse>> {
    state.excursions.delete(&caller, &id).await?;
    Ok(Json(DeletedResponse {
        message: "Excursion deleted",
    }))
}

/// Multipart upload; every part is treated as one photo.
async fn upload_photos(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    caller: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut photos = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed upload: {}", e)))?
    {
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("malformed upload: {}", e)))?;

        photos.push(UploadedPhoto {
            file_name,
            content_type,
            bytes,
        });
    }

    let uploaded_files = state.photos.upload(&caller, &id, photos).await?;
    Ok(Json(UploadResponse { uploaded_files }))
}
