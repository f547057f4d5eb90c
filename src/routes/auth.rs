// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: password registration/login, OAuth callback, logout.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{AuthUser, SESSION_COOKIE};
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::models::UserResponse;
use crate::services::IssuedCredential;
use crate::AppState;

/// Auth cookie lifetime, matching both token kinds.
const COOKIE_MAX_AGE_DAYS: i64 = 7;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/profile", post(oauth_profile))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Token plus the account it was issued for.
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Deserialize)]
pub struct OAuthProfileRequest {
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Build the HTTP-only auth cookie.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::days(COOKIE_MAX_AGE_DAYS))
        .build()
}

/// Expired, empty auth cookie. Sent even when the credential came from the
/// Authorization header, since the browser may still hold a cookie.
fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), secure);
    cookie.make_removal();
    cookie
}

/// Set the cookie and shape the response body.
fn issue(
    state: &AppState,
    jar: CookieJar,
    issued: IssuedCredential,
) -> (CookieJar, Json<AuthResponse>) {
    let jar = jar.add(session_cookie(
        issued.token.clone(),
        state.config.cookie_secure,
    ));
    let body = AuthResponse {
        token: issued.token,
        user: UserResponse::from(&issued.user),
    };
    (jar, Json(body))
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let issued = state.auth.register(request).await?;
    Ok(issue(&state, jar, issued))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let issued = state.auth.login(&request.email, &request.password).await?;
    Ok(issue(&state, jar, issued))
}

/// Delegated OAuth callback: exchange the provider session id.
async fn oauth_profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<OAuthProfileRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("session_id required".to_string()))?;

    let issued = state.auth.oauth_callback(&session_id).await?;
    Ok(issue(&state, jar, issued))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    state.auth.logout(&caller).await?;

    let jar = jar.add(removal_cookie(state.config.cookie_secure));
    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    ))
}

async fn me(caller: AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&caller.user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok".into(), true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(true);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }
}
