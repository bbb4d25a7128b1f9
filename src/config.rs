//! Configuration parsing and structures
//!
//! YAML is read into [`RawConfig`], resolved into [`Config`] (secrets
//! substituted from the environment, defaults filled in), then validated.
//! The resolved value is immutable and passed explicitly to everything that
//! needs it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::auth::KeystoneCredentials;
use crate::env::substitute_env_vars;
use crate::roles::Role;
use crate::version::{ApiVersion, VersionRange};

// =============================================================================
// Raw Config (Deserialized from YAML)
// =============================================================================

/// Raw configuration as deserialized from YAML.
/// This is converted to `Config` via `resolve()`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Service under test
    pub service: ServiceConfig,

    /// How to obtain tokens, per role
    pub auth: RawAuthConfig,

    /// Microversion range the deployment supports
    #[serde(default)]
    pub api: ApiConfig,

    /// Waiter timing
    #[serde(default)]
    pub waits: WaitsConfig,

    /// Optional features of the deployment
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Share protocols
    #[serde(default)]
    pub protocols: ProtocolsConfig,

    /// Share network handling
    #[serde(default)]
    pub multitenancy: MultitenancyConfig,
}

/// Authentication section (tagged enum)
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawAuthConfig {
    /// Keystone v3 password authentication
    Keystone {
        /// Identity v3 endpoint
        url: String,

        /// Domain used when a credential names none
        #[serde(default = "default_domain")]
        domain_name: String,

        credentials: BTreeMap<Role, RawKeystoneCredential>,
    },

    /// Pre-issued tokens
    Token {
        credentials: BTreeMap<Role, RawTokenCredential>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawKeystoneCredential {
    pub username: String,

    /// May reference the environment as `${VAR}`
    pub password: String,

    pub project_name: String,

    pub user_domain_name: Option<String>,

    pub project_domain_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTokenCredential {
    /// May reference the environment as `${VAR}`
    pub token: String,

    pub project_id: Option<String>,
}

fn default_domain() -> String {
    "Default".to_string()
}

// =============================================================================
// Resolved Config (Ready for use)
// =============================================================================

/// Top-level configuration (resolved from RawConfig)
#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub service: ServiceConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub waits: WaitsConfig,
    pub features: FeaturesConfig,
    pub protocols: ProtocolsConfig,
    pub multitenancy: MultitenancyConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Service endpoint and HTTP behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Versioned API root, e.g. `http://controller:8786/v2`
    pub endpoint: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub insecure: bool,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

/// Resolved credentials per role
#[derive(Debug, Clone)]
pub enum AuthConfig {
    Keystone {
        url: String,
        credentials: BTreeMap<Role, KeystoneCredentials>,
    },
    Token {
        credentials: BTreeMap<Role, TokenCredential>,
    },
}

#[derive(Debug, Clone)]
pub struct TokenCredential {
    pub token: String,
    pub project_id: Option<String>,
}

impl AuthConfig {
    /// Roles with credentials, in declaration order
    pub fn roles(&self) -> Vec<Role> {
        match self {
            AuthConfig::Keystone { credentials, .. } => credentials.keys().copied().collect(),
            AuthConfig::Token { credentials } => credentials.keys().copied().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}

/// Microversion bounds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_min_version")]
    pub min_version: ApiVersion,

    #[serde(default = "default_max_version")]
    pub max_version: ApiVersion,
}

fn default_min_version() -> ApiVersion {
    ApiVersion::new(2, 0)
}

fn default_max_version() -> ApiVersion {
    ApiVersion::new(2, 84)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            min_version: default_min_version(),
            max_version: default_max_version(),
        }
    }
}

impl ApiConfig {
    /// Configured range; `None` only for a config that failed validation
    pub fn range(&self) -> Option<VersionRange> {
        VersionRange::new(self.min_version, self.max_version)
    }
}

/// Waiter timing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WaitsConfig {
    /// Time between reads
    #[serde(default = "default_build_interval", with = "humantime_serde")]
    pub build_interval: Duration,

    /// Overall budget of one wait
    #[serde(default = "default_build_timeout", with = "humantime_serde")]
    pub build_timeout: Duration,
}

fn default_build_interval() -> Duration {
    Duration::from_secs(3)
}

fn default_build_timeout() -> Duration {
    Duration::from_secs(500)
}

impl Default for WaitsConfig {
    fn default() -> Self {
        Self {
            build_interval: default_build_interval(),
            build_timeout: default_build_timeout(),
        }
    }
}

/// Optional capabilities of the deployment under test
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub snapshots: bool,
    pub create_from_snapshot: bool,
    pub revert_to_snapshot: bool,
    pub manage_unmanage: bool,
    pub replication: bool,
    pub share_groups: bool,
    pub migration: bool,
    pub backups: bool,
    pub quotas: bool,
    pub encryption: bool,
    pub ipv6: bool,
    pub multi_backend: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            snapshots: true,
            create_from_snapshot: true,
            revert_to_snapshot: false,
            manage_unmanage: false,
            replication: false,
            share_groups: false,
            migration: false,
            backups: false,
            quotas: true,
            encryption: false,
            ipv6: false,
            multi_backend: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolsConfig {
    #[serde(default = "default_protocols")]
    pub enabled: Vec<String>,
}

fn default_protocols() -> Vec<String> {
    vec!["nfs".to_string(), "cifs".to_string()]
}

impl Default for ProtocolsConfig {
    fn default() -> Self {
        Self {
            enabled: default_protocols(),
        }
    }
}

impl ProtocolsConfig {
    /// Case-insensitive membership
    pub fn is_enabled(&self, protocol: &str) -> bool {
        self.enabled.iter().any(|p| p.eq_ignore_ascii_case(protocol))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MultitenancyConfig {
    /// Driver handles share servers; shares need a share network
    #[serde(default)]
    pub enabled: bool,

    /// Existing share network to use instead of creating one per test
    pub share_network_id: Option<String>,
}

// =============================================================================
// Resolution Logic
// =============================================================================

impl RawConfig {
    /// Resolve raw config into final config, substituting secrets
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let RawConfig {
            logging,
            service,
            auth,
            api,
            waits,
            features,
            protocols,
            multitenancy,
        } = self;

        Ok(Config {
            logging,
            service,
            auth: Self::resolve_auth(auth)?,
            api,
            waits,
            features,
            protocols,
            multitenancy,
        })
    }

    fn resolve_auth(raw: RawAuthConfig) -> Result<AuthConfig, ConfigError> {
        match raw {
            RawAuthConfig::Keystone {
                url,
                domain_name,
                credentials,
            } => {
                let mut resolved = BTreeMap::new();
                for (role, cred) in credentials {
                    // Credential domains override the section default
                    resolved.insert(
                        role,
                        KeystoneCredentials {
                            username: cred.username,
                            password: substitute_env_vars(&cred.password)?,
                            project_name: cred.project_name,
                            user_domain_name: cred
                                .user_domain_name
                                .unwrap_or_else(|| domain_name.clone()),
                            project_domain_name: cred
                                .project_domain_name
                                .unwrap_or_else(|| domain_name.clone()),
                        },
                    );
                }
                Ok(AuthConfig::Keystone {
                    url: substitute_env_vars(&url)?,
                    credentials: resolved,
                })
            }
            RawAuthConfig::Token { credentials } => {
                let mut resolved = BTreeMap::new();
                for (role, cred) in credentials {
                    resolved.insert(
                        role,
                        TokenCredential {
                            token: substitute_env_vars(&cred.token)?,
                            project_id: cred.project_id,
                        },
                    );
                }
                Ok(AuthConfig::Token { credentials: resolved })
            }
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a YAML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        raw.resolve()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.endpoint cannot be empty".to_string(),
            ));
        }
        let endpoint = &self.service.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "service.endpoint must be an http(s) URL: {}",
                self.service.endpoint
            )));
        }

        if self.api.range().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "api.min_version {} must not exceed api.max_version {} within one major version",
                self.api.min_version, self.api.max_version
            )));
        }

        if self.waits.build_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "waits.build_interval must be greater than zero".to_string(),
            ));
        }
        if self.waits.build_timeout < self.waits.build_interval {
            return Err(ConfigError::ValidationError(format!(
                "waits.build_timeout ({:?}) is shorter than waits.build_interval ({:?})",
                self.waits.build_timeout, self.waits.build_interval
            )));
        }

        if !self.auth.has_role(Role::Member) {
            return Err(ConfigError::ValidationError(
                "auth.credentials must include the member role".to_string(),
            ));
        }

        if self.protocols.enabled.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one protocol must be enabled".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnvironment(Vec<String>),
}
