// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static lookup lists (key/label pairs, in display order).

use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::reference::{self, LookupEntry, CATEGORIES, COUNTRIES, PARKING_SITUATIONS, REGIONS};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/countries", get(countries))
        .route("/regions", get(regions))
        .route("/cantons", get(cantons))
        .route("/categories", get(categories))
        .route("/parking-situations", get(parking_situations))
}

#[derive(Deserialize)]
struct RegionQuery {
    country: Option<String>,
}

async fn countries() -> Json<&'static [LookupEntry]> {
    Json(COUNTRIES.entries())
}

/// All regions, or those of one country (key or label).
async fn regions(Query(query): Query<RegionQuery>) -> Result<Json<Vec<LookupEntry>>> {
    let entries = match query.country.as_deref() {
        Some(raw) => reference::regions_in(COUNTRIES.normalize(raw)?),
        None => REGIONS.entries().to_vec(),
    };
    Ok(Json(entries))
}

/// Swiss cantons only.
async fn cantons() -> Json<Vec<LookupEntry>> {
    Json(reference::regions_in("CH"))
}

async fn categories() -> Json<&'static [LookupEntry]> {
    Json(CATEGORIES.entries())
}

async fn parking_situations() -> Json<&'static [LookupEntry]> {
    Json(PARKING_SITUATIONS.entries())
}
