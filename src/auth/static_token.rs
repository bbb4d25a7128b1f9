//! Static token provider for pre-issued tokens and offline tests.
//!
//! Returns a fixed token without validation or refresh. A static token will
//! eventually expire; nothing here notices.

use async_trait::async_trait;

use super::TokenProvider;
use crate::error::Result;

/// A token provider that returns a static token.
pub struct StaticTokenProvider {
    token: String,
    project_id: Option<String>,
}

impl StaticTokenProvider {
    /// Create a new static token provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            project_id: None,
        }
    }

    /// Attach the project id the token is scoped to.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }

    async fn project_id(&self) -> Result<Option<String>> {
        Ok(self.project_id.clone())
    }
}
