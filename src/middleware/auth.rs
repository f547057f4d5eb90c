// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller authentication: signed-token helpers and request extractors.
//!
//! A credential arrives either as the `session_token` cookie or as an
//! `Authorization: Bearer` header (the cookie wins). It is resolved against
//! both schemes by [`crate::services::AuthService::resolve`].

use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the auth cookie.
pub const SESSION_COOKIE: &str = "session_token";

/// Signed token lifetime (7 days).
pub const TOKEN_TTL_SECS: usize = 7 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Which scheme vouched for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Signed token from password registration/login.
    SignedToken,
    /// Opaque session token from the OAuth callback.
    Session,
}

/// Authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub scheme: AuthScheme,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    /// Fail with `Forbidden` unless the caller is `owner_id`.
    pub fn ensure_owner(&self, owner_id: &str) -> Result<(), AppError> {
        if self.user.id == owner_id {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %self.user.id,
                owner_id,
                "Rejected modification by non-owner"
            );
            Err(AppError::Forbidden)
        }
    }
}

/// Create a signed token for a user.
pub fn create_jwt(user_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify a signed token. Any failure (bad signature, expiry, garbage) is
/// `None`, never an error.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Option<Claims> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .ok()
}

/// Pull the raw credential from the request: cookie first, then header.
pub fn extract_credential(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_credential(parts).ok_or(AppError::Unauthenticated)?;
        state.auth.resolve(&token).await
    }
}

impl OptionalFromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    /// Anonymous on any resolution failure, including storage errors.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(token) = extract_credential(parts) else {
            return Ok(None);
        };

        match state.auth.resolve(&token).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::Unauthenticated) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "Optional caller resolution failed, continuing anonymously");
                Ok(None)
            }
        }
    }
}
