// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User and session models for storage and API.

use crate::time_utils::{iso8601, now_utc};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque UUID (also used as document ID)
    pub id: String,
    /// Email address, unique across all users
    pub email: String,
    /// Display name
    pub name: String,
    /// Profile picture URL
    #[serde(default)]
    pub picture: Option<String>,
    /// Created through the delegated OAuth flow rather than registration
    #[serde(default)]
    pub is_oauth: bool,
    /// bcrypt hash; absent for OAuth accounts
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New password account.
    pub fn with_password(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            picture: None,
            is_oauth: false,
            password_hash: Some(password_hash),
            created_at: now_utc(),
        }
    }

    /// New account created from a delegated OAuth identity.
    pub fn from_oauth(name: String, email: String, picture: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            picture,
            is_oauth: true,
            password_hash: None,
            created_at: now_utc(),
        }
    }
}

/// Opaque session created by the OAuth callback (`sessions` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub session_token: String,
    pub user_id: String,
    #[serde(with = "iso8601")]
    pub expires_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Public user representation (never exposes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub is_oauth: bool,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            picture: user.picture.clone(),
            is_oauth: user.is_oauth,
            created_at: user.created_at,
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
