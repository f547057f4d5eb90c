// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Photo uploads: blob storage on local disk plus the excursion photo list.

use crate::db::Database;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::services::locks::KeyedLocks;
use anyhow::Context;
use axum::body::Bytes;
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSION: &str = "jpg";
const MAX_EXTENSION_LEN: usize = 10;

/// One blob from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedPhoto {
    fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
    }
}

/// Keep the original extension when it is short and plain, else `jpg`.
pub fn sanitized_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Write-once blob store keyed by generated filename.
#[derive(Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store `bytes` under a fresh random name with `extension`; returns the name.
    pub async fn save(&self, bytes: &[u8], extension: &str) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("failed creating {}", self.root.display()))?;

        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed writing {}", path.display()))?;

        Ok(file_name)
    }
}

#[derive(Clone)]
pub struct PhotoService {
    db: Database,
    store: PhotoStore,
    /// Per-excursion locks, shared with the catalog and reviews.
    locks: KeyedLocks,
}

impl PhotoService {
    pub fn new(db: Database, store: PhotoStore, locks: KeyedLocks) -> Self {
        Self { db, store, locks }
    }

    /// Validate the whole batch, write each blob, then append the new
    /// filenames to the excursion. Returns the stored filenames.
    ///
    /// Files written before a mid-batch failure are left on disk.
    pub async fn upload(
        &self,
        caller: &AuthUser,
        excursion_id: &str,
        photos: Vec<UploadedPhoto>,
    ) -> Result<Vec<String>, AppError> {
        let excursion = self
            .db
            .get_excursion(excursion_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Excursion {}", excursion_id)))?;
        caller.ensure_owner(&excursion.author_id)?;

        if photos.is_empty() {
            return Err(AppError::Validation("no files uploaded".to_string()));
        }
        if !photos.iter().all(UploadedPhoto::is_image) {
            return Err(AppError::InvalidContentType);
        }

        let mut stored = Vec::with_capacity(photos.len());
        for photo in &photos {
            let extension = sanitized_extension(photo.file_name.as_deref());
            let file_name = self.store.save(&photo.bytes, &extension).await?;
            stored.push(file_name);
        }

        {
            let _guard = self.locks.lock(excursion_id).await;
            let mut excursion = self
                .db
                .get_excursion(excursion_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Excursion {}", excursion_id)))?;
            excursion.photos.extend(stored.iter().cloned());
            self.db.put_excursion(&excursion).await?;
        }

        tracing::info!(excursion_id, count = stored.len(), "Photos uploaded");
        Ok(stored)
    }
}
