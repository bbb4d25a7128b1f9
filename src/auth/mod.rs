//! Token providers for authenticating against the share API
//!
//! Every request carries an `X-Auth-Token`. Tokens come from one of:
//! - Keystone v3 password authentication (cached, refreshed before expiry)
//! - Static tokens (pre-issued tokens, offline tests)

pub mod keystone;
pub mod static_token;

use async_trait::async_trait;

use crate::error::Result;

pub use keystone::{KeystoneCredentials, KeystoneTokenProvider};
pub use static_token::StaticTokenProvider;

/// Source of authentication tokens for one set of credentials.
///
/// Implementations must be cheap to call repeatedly; callers ask for a token
/// on every request and rely on the provider to cache.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get a valid token
    async fn token(&self) -> Result<String>;

    /// Project the token is scoped to, if known.
    ///
    /// Quota and RBAC tests address resources by project id.
    async fn project_id(&self) -> Result<Option<String>>;
}
