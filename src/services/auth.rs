// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential issuance and resolution.
//!
//! Two issuance paths converge on one `User`:
//! - password registration/login issues a signed token (JWT, 7 days)
//! - the delegated OAuth callback stores a `Session` with an opaque random
//!   token (7 days)
//!
//! [`AuthService::resolve`] accepts either kind and reports which scheme
//! succeeded.

use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::middleware::auth::{create_jwt, verify_jwt, AuthScheme, AuthUser};
use crate::models::user::RegisterRequest;
use crate::models::{Session, User};
use crate::services::identity::IdentityProvider;
use crate::services::locks::KeyedLocks;
use crate::services::password::{hash_password, verify_password};
use crate::time_utils::now_utc;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use validator::Validate;

/// Opaque session lifetime.
const SESSION_TTL_DAYS: i64 = 7;

/// Random bytes per opaque session token.
const SESSION_TOKEN_BYTES: usize = 32;

/// A freshly issued credential and the user it belongs to.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    db: Database,
    identity: IdentityProvider,
    jwt_signing_key: Vec<u8>,
    bcrypt_cost: u32,
    rng: SystemRandom,
    /// Serializes check-then-insert on email addresses.
    email_locks: KeyedLocks,
}

impl AuthService {
    pub fn new(config: &Config, db: Database, identity: IdentityProvider) -> Self {
        Self {
            db,
            identity,
            jwt_signing_key: config.jwt_signing_key.clone(),
            bcrypt_cost: config.bcrypt_cost,
            rng: SystemRandom::new(),
            email_locks: KeyedLocks::new(),
        }
    }

    // ─── Issuance ────────────────────────────────────────────────────────────

    /// Register a password account and issue a signed token.
    pub async fn register(&self, request: RegisterRequest) -> Result<IssuedCredential, AppError> {
        request.validate()?;

        let _guard = self.email_locks.lock(&request.email).await;

        if self.db.find_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost).await?;
        let user = User::with_password(request.name, request.email, password_hash);
        self.db.insert_user(&user).await?;

        tracing::info!(user_id = %user.id, "Registered password account");

        let token = self.sign(&user)?;
        Ok(IssuedCredential { token, user })
    }

    /// Check email/password and issue a signed token.
    ///
    /// Unknown email, wrong password and password-less OAuth accounts all
    /// produce the same `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedCredential, AppError> {
        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "Password login");

        let token = self.sign(&user)?;
        Ok(IssuedCredential { token, user })
    }

    /// Exchange a provider session id, find or create the user, and start an
    /// opaque session.
    pub async fn oauth_callback(&self, session_id: &str) -> Result<IssuedCredential, AppError> {
        let profile = self.identity.fetch_profile(session_id).await?;

        let user = {
            let _guard = self.email_locks.lock(&profile.email).await;
            match self.db.find_user_by_email(&profile.email).await? {
                Some(existing) => existing,
                None => {
                    let user = User::from_oauth(profile.name, profile.email, profile.picture);
                    self.db.insert_user(&user).await?;
                    tracing::info!(user_id = %user.id, "Created OAuth account");
                    user
                }
            }
        };

        let created_at = now_utc();
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            session_token: self.random_token()?,
            user_id: user.id.clone(),
            expires_at: created_at + chrono::Duration::days(SESSION_TTL_DAYS),
            created_at,
        };
        self.db.insert_session(&session).await?;

        tracing::info!(user_id = %user.id, "OAuth session started");

        Ok(IssuedCredential {
            token: session.session_token,
            user,
        })
    }

    // ─── Resolution ──────────────────────────────────────────────────────────

    /// Resolve a raw credential: signed token first, then session lookup.
    pub async fn resolve(&self, token: &str) -> Result<AuthUser, AppError> {
        if let Some(claims) = verify_jwt(token, &self.jwt_signing_key) {
            let user = self
                .db
                .get_user(&claims.sub)
                .await?
                .ok_or(AppError::Unauthenticated)?;
            return Ok(AuthUser {
                user,
                scheme: AuthScheme::SignedToken,
            });
        }

        let session = self
            .db
            .find_session(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        if session.is_expired(now_utc()) {
            tracing::debug!(user_id = %session.user_id, "Rejected expired session");
            return Err(AppError::Unauthenticated);
        }

        let user = self
            .db
            .get_user(&session.user_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(AuthUser {
            user,
            scheme: AuthScheme::Session,
        })
    }

    /// Delete every session of the caller. Signed tokens stay valid until
    /// they expire.
    pub async fn logout(&self, caller: &AuthUser) -> Result<usize, AppError> {
        let removed = self.db.delete_sessions_for_user(caller.id()).await?;
        tracing::info!(user_id = %caller.id(), removed, "Logged out");
        Ok(removed)
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn sign(&self, user: &User) -> Result<String, AppError> {
        create_jwt(&user.id, &self.jwt_signing_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))
    }

    fn random_token(&self) -> Result<String, AppError> {
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}
