// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Excursion catalog: listing, lookup and author-only mutation.

use crate::db::Database;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::excursion::ExcursionDetail;
use crate::models::{Excursion, ExcursionFilter, ExcursionInput};
use crate::services::locks::KeyedLocks;

#[derive(Clone)]
pub struct ExcursionService {
    db: Database,
    /// Per-excursion locks, shared with reviews and photos.
    locks: KeyedLocks,
}

impl ExcursionService {
    pub fn new(db: Database, locks: KeyedLocks) -> Self {
        Self { db, locks }
    }

    /// Excursions matching every given filter, newest first.
    pub async fn list(&self, filter: &ExcursionFilter) -> Result<Vec<Excursion>, AppError> {
        self.db.list_excursions(filter).await
    }

    pub async fn get(&self, excursion_id: &str) -> Result<Excursion, AppError> {
        self.db
            .get_excursion(excursion_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Excursion {}", excursion_id)))
    }

    /// Lookup annotated with whether the (optional) caller authored it.
    pub async fn detail(
        &self,
        excursion_id: &str,
        caller: Option<&AuthUser>,
    ) -> Result<ExcursionDetail, AppError> {
        let excursion = self.get(excursion_id).await?;
        let is_owner = caller.is_some_and(|c| c.id() == excursion.author_id);
        Ok(ExcursionDetail {
            excursion,
            is_owner,
        })
    }

    pub async fn create(
        &self,
        caller: &AuthUser,
        input: ExcursionInput,
    ) -> Result<Excursion, AppError> {
        let fields = input.normalize()?;
        let excursion = Excursion::new(fields, caller.user.id.clone(), caller.user.name.clone());
        self.db.put_excursion(&excursion).await?;

        tracing::info!(
            excursion_id = %excursion.id,
            author_id = %excursion.author_id,
            region = %excursion.region,
            "Created excursion"
        );

        Ok(excursion)
    }

    /// Full replace of the editable fields. `NotFound` takes precedence over
    /// `Forbidden`.
    pub async fn update(
        &self,
        caller: &AuthUser,
        excursion_id: &str,
        input: ExcursionInput,
    ) -> Result<Excursion, AppError> {
        let fields = input.normalize()?;

        let _guard = self.locks.lock(excursion_id).await;
        let mut excursion = self.get(excursion_id).await?;
        caller.ensure_owner(&excursion.author_id)?;

        excursion.apply(fields);
        self.db.put_excursion(&excursion).await?;

        tracing::info!(excursion_id, "Updated excursion");
        Ok(excursion)
    }

    /// Delete the excursion and, first, all of its reviews.
    pub async fn delete(&self, caller: &AuthUser, excursion_id: &str) -> Result<(), AppError> {
        let _guard = self.locks.lock(excursion_id).await;
        let excursion = self.get(excursion_id).await?;
        caller.ensure_owner(&excursion.author_id)?;

        let reviews_removed = self.db.delete_reviews_for_excursion(excursion_id).await?;
        self.db.delete_excursion(excursion_id).await?;

        tracing::info!(excursion_id, reviews_removed, "Deleted excursion");
        Ok(())
    }
}
