// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ausflug-Finder: a crowd-sourced directory of family excursions
//!
//! This crate provides the backend API: accounts (password and delegated
//! OAuth), the excursion catalog, reviews with rating aggregates, photo
//! uploads and static reference lookups.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{
    AuthService, ExcursionService, IdentityProvider, KeyedLocks, PhotoService, PhotoStore,
    ReviewService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub auth: AuthService,
    pub excursions: ExcursionService,
    pub reviews: ReviewService,
    pub photos: PhotoService,
}

impl AppState {
    /// Wire every service around one database handle and one per-excursion
    /// lock table.
    pub fn new(config: Config, db: Database, identity: IdentityProvider) -> Self {
        let locks = KeyedLocks::new();
        let store = PhotoStore::new(config.upload_dir.clone());

        Self {
            auth: AuthService::new(&config, db.clone(), identity),
            excursions: ExcursionService::new(db.clone(), locks.clone()),
            reviews: ReviewService::new(db.clone(), locks.clone()),
            photos: PhotoService::new(db.clone(), store, locks),
            config,
            db,
        }
    }
}
