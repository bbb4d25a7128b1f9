//! Keystone v3 password authentication.
//!
//! Exchanges a username/password pair for a project-scoped token. The token
//! arrives in the `X-Subject-Token` response header; its expiry is read from
//! the response body. Tokens are cached and refreshed shortly before expiry.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::TokenProvider;
use crate::error::{ClientError, Result};

/// Buffer time before token expiry to trigger refresh (60 seconds).
const EXPIRY_BUFFER_SECS: u64 = 60;

/// Header carrying the issued token
const SUBJECT_TOKEN_HEADER: &str = "x-subject-token";

/// Response structure from `POST /auth/tokens`.
#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    expires_at: String,
    project: Option<ProjectRef>,
}

#[derive(Debug, Deserialize)]
struct ProjectRef {
    id: String,
}

/// Cached token with expiry tracking.
struct CachedToken {
    token: String,
    project_id: Option<String>,
    fetched_at: Instant,
    expires_in_secs: u64,
}

impl CachedToken {
    /// Check if the token is still valid (with buffer).
    fn is_valid(&self) -> bool {
        let elapsed = self.fetched_at.elapsed().as_secs();
        let effective_expiry = self.expires_in_secs.saturating_sub(EXPIRY_BUFFER_SECS);
        elapsed < effective_expiry
    }
}

/// Password credentials for one user, scoped to one project.
#[derive(Debug, Clone)]
pub struct KeystoneCredentials {
    pub username: String,
    pub password: String,
    pub project_name: String,
    pub user_domain_name: String,
    pub project_domain_name: String,
}

/// A token provider that authenticates against Keystone v3.
pub struct KeystoneTokenProvider {
    auth_url: String,
    credentials: KeystoneCredentials,
    client: reqwest::Client,
    cached_token: RwLock<Option<CachedToken>>,
}

impl KeystoneTokenProvider {
    /// Create a provider. `auth_url` is the identity v3 root, e.g.
    /// `http://controller:5000/v3`.
    pub fn new(auth_url: &str, credentials: KeystoneCredentials, client: reqwest::Client) -> Self {
        Self {
            auth_url: auth_url.trim_end_matches('/').to_string(),
            credentials,
            client,
            cached_token: RwLock::new(None),
        }
    }

    fn request_body(&self) -> serde_json::Value {
        let creds = &self.credentials;
        json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "name": creds.username,
                            "domain": { "name": creds.user_domain_name },
                            "password": creds.password,
                        }
                    }
                },
                "scope": {
                    "project": {
                        "name": creds.project_name,
                        "domain": { "name": creds.project_domain_name },
                    }
                }
            }
        })
    }

    /// Fetch a fresh token from Keystone.
    async fn fetch_token(&self) -> Result<CachedToken> {
        let url = format!("{}/auth/tokens", self.auth_url);
        debug!(
            user = %self.credentials.username,
            project = %self.credentials.project_name,
            "Requesting Keystone token"
        );

        let response = self.client.post(&url).json(&self.request_body()).send().await?;

        if response.status().as_u16() != 201 {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!(
                "Keystone returned {} for user {}: {}",
                status, self.credentials.username, body
            )));
        }

        let token = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or_else(|| {
                ClientError::Auth("Keystone response has no X-Subject-Token".to_string())
            })?;

        let envelope: TokenEnvelope = response.json().await?;

        Ok(CachedToken {
            token,
            project_id: envelope.token.project.map(|p| p.id),
            fetched_at: Instant::now(),
            expires_in_secs: seconds_until(&envelope.token.expires_at, Utc::now())?,
        })
    }

    /// Return the cached token, fetching a new one if missing or stale.
    async fn ensure_token(&self) -> Result<(String, Option<String>)> {
        {
            let cache = self.cached_token.read();
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok((cached.token.clone(), cached.project_id.clone()));
                }
            }
        }

        let fresh = self.fetch_token().await?;
        let result = (fresh.token.clone(), fresh.project_id.clone());
        *self.cached_token.write() = Some(fresh);
        Ok(result)
    }
}

/// Seconds from `now` until an RFC 3339 `expires_at`, floored at zero.
fn seconds_until(expires_at: &str, now: DateTime<Utc>) -> Result<u64> {
    let expires = DateTime::parse_from_rfc3339(expires_at)
        .map_err(|e| ClientError::Auth(format!("Invalid token expiry {:?}: {}", expires_at, e)))?;
    let remaining = expires.with_timezone(&Utc) - now;
    Ok(remaining.num_seconds().max(0) as u64)
}

#[async_trait]
impl TokenProvider for KeystoneTokenProvider {
    async fn token(&self) -> Result<String> {
        self.ensure_token().await.map(|(token, _)| token)
    }

    async fn project_id(&self) -> Result<Option<String>> {
        self.ensure_token().await.map(|(_, project)| project)
    }
}
