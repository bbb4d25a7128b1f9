//! Roles and per-role clients
//!
//! Every conformance test acts as one of a few personas. [`ClientManager`]
//! owns one token provider and transport per configured role and hands out
//! [`SharesClient`]s bound to them. All roles share one reqwest client.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::auth::{KeystoneTokenProvider, StaticTokenProvider, TokenProvider};
use crate::client::SharesClient;
use crate::config::{AuthConfig, Config};
use crate::error::{ClientError, Result};
use crate::transport::http::{build_client, HttpTransport};
use crate::transport::Transport;
use crate::waiter::Waiter;

/// Credential set a test acts under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Cloud administrator
    Admin,
    /// Project member; the default persona
    Member,
    /// Member of a second project, for isolation checks
    AltMember,
    /// Read-only project user
    Reader,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::AltMember => "alt_member",
            Role::Reader => "reader",
        }
    }

    pub fn all() -> [Role; 4] {
        [Role::Admin, Role::Member, Role::AltMember, Role::Reader]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ClientError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Role::all()
            .into_iter()
            .find(|role| role.name() == wanted)
            .ok_or_else(|| ClientError::UnknownName {
                kind: "role",
                name: s.to_string(),
            })
    }
}

struct RoleEntry {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
}

/// Builds clients per role from one configuration
pub struct ClientManager {
    config: Arc<Config>,
    entries: BTreeMap<Role, RoleEntry>,
}

impl ClientManager {
    /// Create providers and HTTP transports for every configured role
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let http = build_client(config.service.request_timeout, config.service.insecure)?;

        let mut providers: Vec<(Role, Arc<dyn TokenProvider>)> = Vec::new();
        match &config.auth {
            AuthConfig::Keystone { url, credentials } => {
                for (role, creds) in credentials {
                    let provider = KeystoneTokenProvider::new(url, creds.clone(), http.clone());
                    providers.push((*role, Arc::new(provider)));
                }
            }
            AuthConfig::Token { credentials } => {
                for (role, cred) in credentials {
                    let mut provider = StaticTokenProvider::new(cred.token.clone());
                    if let Some(project_id) = &cred.project_id {
                        provider = provider.with_project_id(project_id.clone());
                    }
                    providers.push((*role, Arc::new(provider)));
                }
            }
        }

        let mut entries = BTreeMap::new();
        for (role, tokens) in providers {
            let transport =
                HttpTransport::new(http.clone(), &config.service.endpoint, tokens.clone())?;
            debug!(role = %role, endpoint = %transport.endpoint(), "Configured role");
            entries.insert(
                role,
                RoleEntry {
                    transport: Arc::new(transport),
                    tokens,
                },
            );
        }

        Ok(Self { config, entries })
    }

    /// Assemble a manager from prebuilt parts, e.g. scripted transports
    pub fn from_parts(
        config: Arc<Config>,
        parts: Vec<(Role, Arc<dyn Transport>, Arc<dyn TokenProvider>)>,
    ) -> Self {
        let entries = parts
            .into_iter()
            .map(|(role, transport, tokens)| (role, RoleEntry { transport, tokens }))
            .collect();
        Self { config, entries }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Roles with credentials
    pub fn roles(&self) -> Vec<Role> {
        self.entries.keys().copied().collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.entries.contains_key(&role)
    }

    fn entry(&self, role: Role) -> Result<&RoleEntry> {
        self.entries
            .get(&role)
            .ok_or_else(|| {
                ClientError::Auth(format!("No credentials configured for role {}", role))
            })
    }

    /// Client for `role` at the configured maximum version
    pub fn client(&self, role: Role) -> Result<SharesClient> {
        let entry = self.entry(role)?;
        Ok(SharesClient::new(entry.transport.clone(), self.config.api.max_version))
    }

    /// Waiter over the role's client using the configured timing
    pub fn waiter(&self, role: Role) -> Result<Waiter> {
        Ok(Waiter::from_config(self.client(role)?, &self.config.waits))
    }

    pub fn token_provider(&self, role: Role) -> Result<Arc<dyn TokenProvider>> {
        Ok(self.entry(role)?.tokens.clone())
    }

    /// Project the role's token is scoped to
    pub async fn project_id(&self, role: Role) -> Result<Option<String>> {
        self.entry(role)?.tokens.project_id().await
    }
}
