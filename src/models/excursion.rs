// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Excursion model for storage and API.

use crate::error::AppError;
use crate::models::reference::{self, CATEGORIES, COUNTRIES, PARKING_SITUATIONS, REGIONS};
use crate::time_utils::iso8601;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored excursion record (`excursions` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Excursion {
    /// Opaque UUID (also used as document ID)
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    /// Country key (`CH`, `DE`, `AT`)
    pub country: String,
    /// Region key (ISO 3166-2, e.g. `CH-ZH`)
    pub region: String,
    /// Category key
    pub category: String,
    #[serde(default)]
    pub website_url: Option<String>,
    pub has_grill: bool,
    pub is_outdoor: bool,
    /// Free entry
    pub is_free: bool,
    /// Parking situation key
    pub parking_situation: String,
    pub parking_is_free: bool,
    /// Stored photo filenames, in upload order
    #[serde(default)]
    pub photos: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl Excursion {
    /// Build a new excursion authored by `author_id`.
    pub fn new(fields: ExcursionFields, author_id: String, author_name: String) -> Self {
        let mut excursion = Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: String::new(),
            description: String::new(),
            address: String::new(),
            country: String::new(),
            region: String::new(),
            category: String::new(),
            website_url: None,
            has_grill: false,
            is_outdoor: true,
            is_free: true,
            parking_situation: String::new(),
            parking_is_free: true,
            photos: Vec::new(),
            author_id,
            author_name,
            average_rating: 0.0,
            review_count: 0,
            created_at: crate::time_utils::now_utc(),
        };
        excursion.apply(fields);
        excursion
    }

    /// Replace every editable field. Author, photos and rating aggregates stay.
    pub fn apply(&mut self, fields: ExcursionFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.address = fields.address;
        self.country = fields.country.to_string();
        self.region = fields.region.to_string();
        self.category = fields.category.to_string();
        self.website_url = fields.website_url;
        self.has_grill = fields.has_grill;
        self.is_outdoor = fields.is_outdoor;
        self.is_free = fields.is_free;
        self.parking_situation = fields.parking_situation.to_string();
        self.parking_is_free = fields.parking_is_free;
    }
}

fn default_true() -> bool {
    true
}

/// Client-submitted excursion body (create and full update).
///
/// Enumerated fields accept either the symbolic key or the display label.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExcursionInput {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[validate(length(min = 10, max = 2000))]
    pub description: String,
    #[validate(length(min = 5, max = 300))]
    pub address: String,
    /// Optional; derived from the region when absent
    #[serde(default)]
    pub country: Option<String>,
    /// `canton` is accepted for older clients
    #[serde(alias = "canton")]
    pub region: String,
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub website_url: Option<String>,
    #[serde(default)]
    pub has_grill: bool,
    #[serde(default = "default_true")]
    pub is_outdoor: bool,
    #[serde(default = "default_true")]
    pub is_free: bool,
    pub parking_situation: String,
    #[serde(default = "default_true")]
    pub parking_is_free: bool,
}

/// Validated, normalized editable fields.
#[derive(Debug, Clone)]
pub struct ExcursionFields {
    pub title: String,
    pub description: String,
    pub address: String,
    pub country: &'static str,
    pub region: &'static str,
    pub category: &'static str,
    pub website_url: Option<String>,
    pub has_grill: bool,
    pub is_outdoor: bool,
    pub is_free: bool,
    pub parking_situation: &'static str,
    pub parking_is_free: bool,
}

impl ExcursionInput {
    /// Validate lengths and resolve enumerated values to their keys.
    pub fn normalize(self) -> Result<ExcursionFields, AppError> {
        self.validate()?;

        let region = REGIONS.normalize(&self.region)?;
        let region_country =
            reference::country_of_region(region).ok_or(AppError::InvalidValue("region"))?;
        let country = match self.country.as_deref() {
            Some(raw) => COUNTRIES.normalize(raw)?,
            None => COUNTRIES.normalize(region_country)?,
        };
        if country != region_country {
            return Err(AppError::InvalidValue("region"));
        }

        let website_url = self
            .website_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(ExcursionFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            address: self.address.trim().to_string(),
            country,
            region,
            category: CATEGORIES.normalize(&self.category)?,
            website_url,
            has_grill: self.has_grill,
            is_outdoor: self.is_outdoor,
            is_free: self.is_free,
            parking_situation: PARKING_SITUATIONS.normalize(&self.parking_situation)?,
            parking_is_free: self.parking_is_free,
        })
    }
}

/// Query parameters of `GET /api/excursions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcursionQuery {
    pub country: Option<String>,
    #[serde(alias = "canton")]
    pub region: Option<String>,
    pub category: Option<String>,
    pub is_free: Option<bool>,
    pub is_outdoor: Option<bool>,
    pub has_grill: Option<bool>,
}

/// Normalized equality filters for listing excursions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcursionFilter {
    pub country: Option<&'static str>,
    pub region: Option<&'static str>,
    pub category: Option<&'static str>,
    pub is_free: Option<bool>,
    pub is_outdoor: Option<bool>,
    pub has_grill: Option<bool>,
}

impl ExcursionQuery {
    pub fn normalize(&self) -> Result<ExcursionFilter, AppError> {
        let lookup = |raw: &Option<String>, table: &reference::LookupTable| {
            raw.as_deref().map(|v| table.normalize(v)).transpose()
        };

        Ok(ExcursionFilter {
            country: lookup(&self.country, &COUNTRIES)?,
            region: lookup(&self.region, &REGIONS)?,
            category: lookup(&self.category, &CATEGORIES)?,
            is_free: self.is_free,
            is_outdoor: self.is_outdoor,
            has_grill: self.has_grill,
        })
    }
}

/// Excursion detail with the optional caller's relation to it.
#[derive(Debug, Clone, Serialize)]
pub struct ExcursionDetail {
    #[serde(flatten)]
    pub excursion: Excursion,
    pub is_owner: bool,
}
