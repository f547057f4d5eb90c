// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reviews and the per-excursion rating aggregate.

use crate::db::Database;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{RatingAggregate, Review, ReviewInput};
use crate::services::locks::KeyedLocks;
use crate::time_utils::now_utc;
use validator::Validate;

#[derive(Clone)]
pub struct ReviewService {
    db: Database,
    /// Per-excursion locks, shared with the catalog and photos.
    locks: KeyedLocks,
}

impl ReviewService {
    pub fn new(db: Database, locks: KeyedLocks) -> Self {
        Self { db, locks }
    }

    /// Reviews of one excursion, newest first.
    pub async fn list_for_excursion(&self, excursion_id: &str) -> Result<Vec<Review>, AppError> {
        self.db.list_reviews_for_excursion(excursion_id).await
    }

    /// The caller's own reviews, newest first.
    pub async fn list_by_user(&self, caller: &AuthUser) -> Result<Vec<Review>, AppError> {
        self.db.list_reviews_by_user(caller.id()).await
    }

    /// Add the caller's one review of an excursion and refresh its aggregate.
    pub async fn create(
        &self,
        caller: &AuthUser,
        excursion_id: &str,
        input: ReviewInput,
    ) -> Result<Review, AppError> {
        input.validate()?;
        let rating = u8::try_from(input.rating)
            .map_err(|_| AppError::Validation("invalid fields: rating".to_string()))?;

        let _guard = self.locks.lock(excursion_id).await;

        if self.db.get_excursion(excursion_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Excursion {}", excursion_id)));
        }

        if self.db.find_review(excursion_id, caller.id()).await?.is_some() {
            return Err(AppError::DuplicateReview);
        }

        let review = Review {
            id: uuid::Uuid::new_v4().to_string(),
            excursion_id: excursion_id.to_string(),
            user_id: caller.user.id.clone(),
            user_name: caller.user.name.clone(),
            rating,
            comment: input.comment.trim().to_string(),
            created_at: now_utc(),
        };
        self.db.insert_review(&review).await?;

        let aggregate = self.recompute_aggregate(excursion_id).await?;

        tracing::info!(
            excursion_id,
            user_id = %review.user_id,
            rating = review.rating,
            average_rating = aggregate.average_rating,
            review_count = aggregate.review_count,
            "Review added"
        );

        Ok(review)
    }

    /// Re-read every review of the excursion and store the fresh aggregate.
    ///
    /// Callers must hold the excursion's lock.
    async fn recompute_aggregate(&self, excursion_id: &str) -> Result<RatingAggregate, AppError> {
        let reviews = self.db.list_reviews_for_excursion(excursion_id).await?;
        let aggregate = RatingAggregate::from_reviews(&reviews);

        let mut excursion = self
            .db
            .get_excursion(excursion_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Excursion {}", excursion_id)))?;
        excursion.average_rating = aggregate.average_rating;
        excursion.review_count = aggregate.review_count;
        self.db.put_excursion(&excursion).await?;

        Ok(aggregate)
    }
}
