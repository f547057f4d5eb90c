// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Delegated OAuth identity provider client.
//!
//! The frontend completes the OAuth dance with the provider and hands us an
//! opaque `session_id`. One GET with that id in the `X-Session-ID` header
//! returns the user's profile. The call is bounded by a timeout and never
//! retried.

use crate::config::Config;
use crate::error::AppError;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

const SESSION_HEADER: &str = "X-Session-ID";

/// Profile returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdentityProfile {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Clone)]
enum ProviderMode {
    Remote { url: String },
    Static {
        profiles: Arc<HashMap<String, IdentityProfile>>,
    },
}

/// Exchanges provider session ids for user profiles.
#[derive(Clone)]
pub struct IdentityProvider {
    http_client: reqwest::Client,
    mode: ProviderMode,
}

impl IdentityProvider {
    /// Create a client for the configured remote endpoint.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.identity_timeout)
            .build()
            .context("failed building identity provider HTTP client")?;

        tracing::info!(
            url = %config.identity_provider_url,
            timeout_secs = config.identity_timeout.as_secs(),
            "Initialized identity provider client"
        );

        Ok(Self {
            http_client,
            mode: ProviderMode::Remote {
                url: config.identity_provider_url.clone(),
            },
        })
    }

    /// Create a provider that answers from a fixed table, without any I/O.
    ///
    /// Intended for deterministic local/integration tests.
    pub fn with_static_profiles(profiles: HashMap<String, IdentityProfile>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            mode: ProviderMode::Static {
                profiles: Arc::new(profiles),
            },
        }
    }

    /// Exchange a session id for the user's profile.
    ///
    /// Every failure (transport, non-success status, malformed body, unknown
    /// id) is an [`AppError::IdentityProvider`].
    pub async fn fetch_profile(&self, session_id: &str) -> Result<IdentityProfile, AppError> {
        if session_id.trim().is_empty() {
            return Err(AppError::IdentityProvider("empty session id".to_string()));
        }

        match &self.mode {
            ProviderMode::Static { profiles } => profiles
                .get(session_id)
                .cloned()
                .ok_or_else(|| AppError::IdentityProvider("unknown session id".to_string())),
            ProviderMode::Remote { url } => self.fetch_remote(url, session_id).await,
        }
    }

    async fn fetch_remote(&self, url: &str, session_id: &str) -> Result<IdentityProfile, AppError> {
        let response = self
            .http_client
            .get(url)
            .header(SESSION_HEADER, session_id)
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::IdentityProvider(format!(
                "provider returned {}",
                status
            )));
        }

        response
            .json::<IdentityProfile>()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("malformed profile: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> IdentityProvider {
        let mut profiles = HashMap::new();
        profiles.insert(
            "sess-1".to_string(),
            IdentityProfile {
                email: "oauth@example.com".into(),
                name: "OAuth User".into(),
                picture: Some("https://example.com/p.png".into()),
            },
        );
        IdentityProvider::with_static_profiles(profiles)
    }

    #[tokio::test]
    async fn test_static_profile_lookup() {
        let profile = provider().fetch_profile("sess-1").await.unwrap();
        assert_eq!(profile.email, "oauth@example.com");
    }

    #[tokio::test]
    async fn test_unknown_and_empty_session_rejected() {
        let provider = provider();
        assert!(matches!(
            provider.fetch_profile("nope").await,
            Err(AppError::IdentityProvider(_))
        ));
        assert!(matches!(
            provider.fetch_profile("  ").await,
            Err(AppError::IdentityProvider(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_remote_is_provider_error() {
        let mut config = Config::test_default();
        config.identity_provider_url = "http://127.0.0.1:9/session-data".to_string();
        config.identity_timeout = std::time::Duration::from_millis(500);
        let provider = IdentityProvider::new(&config).unwrap();

        let result = provider.fetch_profile("sess-1").await;
        assert!(matches!(result, Err(AppError::IdentityProvider(_))));
    }

    #[test]
    fn test_profile_picture_is_optional() {
        let profile: IdentityProfile =
            serde_json::from_str(r#"{"email":"a@b.c","name":"A","session_token":"x"}"#).unwrap();
        assert_eq!(profile.picture, None);
    }
}
