// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed operations over the document store.
//!
//! Provides high-level operations for:
//! - Users (profile and credential storage)
//! - Sessions (opaque OAuth sessions)
//! - Excursions (catalog entries)
//! - Reviews (one per user and excursion)

use crate::config::{Config, DatabaseBackend};
use crate::db::firestore::FirestoreStore;
use crate::db::memory::MemoryStore;
use crate::db::{collections, DocQuery, Document};
use crate::error::AppError;
use crate::models::{Excursion, ExcursionFilter, Review, Session, User};
use serde::Deserialize;

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

/// Database handle shared by all services. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

impl Database {
    /// Connect to the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.database_backend {
            DatabaseBackend::Firestore => Self::firestore(&config.gcp_project_id).await,
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory database; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Connect to Firestore (or the emulator, if `FIRESTORE_EMULATOR_HOST` is set).
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            backend: Backend::Firestore(FirestoreStore::connect(project_id).await?),
        })
    }

    /// Fresh, empty in-process store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::new()),
        }
    }

    // ─── Generic Operations ──────────────────────────────────────

    async fn get<T: Document>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.get(collection, id).await,
            Backend::Memory(store) => store.get(collection, id),
        }
    }

    async fn find<T>(&self, collection: &str, query: &DocQuery) -> Result<Vec<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        match &self.backend {
            Backend::Firestore(store) => store.find(collection, query).await,
            Backend::Memory(store) => store.find(collection, query),
        }
    }

    async fn find_one<T>(&self, collection: &str, query: &DocQuery) -> Result<Option<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        Ok(self.find(collection, query).await?.into_iter().next())
    }

    async fn put<T: Document>(&self, collection: &str, doc: &T) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.put(collection, doc).await,
            Backend::Memory(store) => store.put(collection, doc),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete(collection, id).await,
            Backend::Memory(store) => store.delete(collection, id),
        }
    }

    async fn delete_where(&self, collection: &str, query: &DocQuery) -> Result<usize, AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete_where(collection, query).await,
            Backend::Memory(store) => store.delete_where(collection, query),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get(collections::USERS, user_id).await
    }

    /// Look up a user by exact (case-sensitive) email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = DocQuery::new().filter("email", email);
        self.find_one(collections::USERS, &query).await
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.put(collections::USERS, user).await
    }

    // ─── Session Operations ──────────────────────────────────────

    pub async fn insert_session(&self, session: &Session) -> Result<(), AppError> {
        self.put(collections::SESSIONS, session).await
    }

    /// Find a session by its opaque token, expired or not.
    pub async fn find_session(&self, session_token: &str) -> Result<Option<Session>, AppError> {
        let query = DocQuery::new().filter("session_token", session_token);
        self.find_one(collections::SESSIONS, &query).await
    }

    /// Delete every session of a user (logout everywhere).
    pub async fn delete_sessions_for_user(&self, user_id: &str) -> Result<usize, AppError> {
        let query = DocQuery::new().filter("user_id", user_id);
        self.delete_where(collections::SESSIONS, &query).await
    }

    // ─── Excursion Operations ────────────────────────────────────

    /// List excursions matching all given filters, newest first.
    pub async fn list_excursions(&self, filter: &ExcursionFilter) -> Result<Vec<Excursion>, AppError> {
        let query = DocQuery::new()
            .filter_opt("country", filter.country)
            .filter_opt("region", filter.region)
            .filter_opt("category", filter.category)
            .filter_opt("is_free", filter.is_free)
            .filter_opt("is_outdoor", filter.is_outdoor)
            .filter_opt("has_grill", filter.has_grill)
            .newest_first("created_at");
        self.find(collections::EXCURSIONS, &query).await
    }

    pub async fn get_excursion(&self, excursion_id: &str) -> Result<Option<Excursion>, AppError> {
        self.get(collections::EXCURSIONS, excursion_id).await
    }

    /// Create or fully replace an excursion.
    pub async fn put_excursion(&self, excursion: &Excursion) -> Result<(), AppError> {
        self.put(collections::EXCURSIONS, excursion).await
    }

    pub async fn delete_excursion(&self, excursion_id: &str) -> Result<(), AppError> {
        self.delete(collections::EXCURSIONS, excursion_id).await
    }

    // ─── Review Operations ───────────────────────────────────────

    pub async fn list_reviews_for_excursion(&self, excursion_id: &str) -> Result<Vec<Review>, AppError> {
        let query = DocQuery::new()
            .filter("excursion_id", excursion_id)
            .newest_first("created_at");
        self.find(collections::REVIEWS, &query).await
    }

    pub async fn list_reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, AppError> {
        let query = DocQuery::new()
            .filter("user_id", user_id)
            .newest_first("created_at");
        self.find(collections::REVIEWS, &query).await
    }

    pub async fn find_review(
        &self,
        excursion_id: &str,
        user_id: &str,
    ) -> Result<Option<Review>, AppError> {
        let query = DocQuery::new()
            .filter("excursion_id", excursion_id)
            .filter("user_id", user_id);
        self.find_one(collections::REVIEWS, &query).await
    }

    pub async fn insert_review(&self, review: &Review) -> Result<(), AppError> {
        self.put(collections::REVIEWS, review).await
    }

    pub async fn delete_reviews_for_excursion(&self, excursion_id: &str) -> Result<usize, AppError> {
        let query = DocQuery::new().filter("excursion_id", excursion_id);
        self.delete_where(collections::REVIEWS, &query).await
    }
}
