//! Skip signals
//!
//! A test that cannot run against the deployment (feature disabled, version
//! outside the configured range, protocol not enabled) returns a [`Skip`]
//! rather than failing. Skips are not errors: the harness reports them and
//! moves on.

use std::fmt;

use crate::config::Config;
use crate::version::ApiVersion;

/// Optional deployment capabilities, one per `features` config flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Snapshots,
    CreateFromSnapshot,
    RevertToSnapshot,
    ManageUnmanage,
    Replication,
    ShareGroups,
    Migration,
    Backups,
    Quotas,
    Encryption,
    Ipv6,
    MultiBackend,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Snapshots => "snapshots",
            Feature::CreateFromSnapshot => "create_from_snapshot",
            Feature::RevertToSnapshot => "revert_to_snapshot",
            Feature::ManageUnmanage => "manage_unmanage",
            Feature::Replication => "replication",
            Feature::ShareGroups => "share_groups",
            Feature::Migration => "migration",
            Feature::Backups => "backups",
            Feature::Quotas => "quotas",
            Feature::Encryption => "encryption",
            Feature::Ipv6 => "ipv6",
            Feature::MultiBackend => "multi_backend",
        }
    }

    pub fn is_enabled(self, config: &Config) -> bool {
        let f = &config.features;
        match self {
            Feature::Snapshots => f.snapshots,
            Feature::CreateFromSnapshot => f.snapshots && f.create_from_snapshot,
            Feature::RevertToSnapshot => f.snapshots && f.revert_to_snapshot,
            Feature::ManageUnmanage => f.manage_unmanage,
            Feature::Replication => f.replication,
            Feature::ShareGroups => f.share_groups,
            Feature::Migration => f.migration,
            Feature::Backups => f.backups,
            Feature::Quotas => f.quotas,
            Feature::Encryption => f.encryption,
            Feature::Ipv6 => f.ipv6,
            Feature::MultiBackend => f.multi_backend,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reason a test was not run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Skip {
    #[error("Feature {0} is disabled")]
    FeatureDisabled(Feature),

    #[error("API version {required} is outside the configured range {min}..={max}")]
    VersionUnsupported {
        required: ApiVersion,
        min: ApiVersion,
        max: ApiVersion,
    },

    #[error("Protocol {0} is not enabled")]
    ProtocolDisabled(String),

    #[error("Test requires driver_handles_share_servers={0}")]
    Multitenancy(bool),

    #[error("{0}")]
    Other(String),
}

pub fn require_feature(config: &Config, feature: Feature) -> Result<(), Skip> {
    if feature.is_enabled(config) {
        Ok(())
    } else {
        Err(Skip::FeatureDisabled(feature))
    }
}

/// The configured range must include `required`
pub fn require_version(config: &Config, required: ApiVersion) -> Result<(), Skip> {
    let (min, max) = (config.api.min_version, config.api.max_version);
    if min <= required && required <= max {
        Ok(())
    } else {
        Err(Skip::VersionUnsupported { required, min, max })
    }
}

pub fn require_protocol(config: &Config, protocol: &str) -> Result<(), Skip> {
    if config.protocols.is_enabled(protocol) {
        Ok(())
    } else {
        Err(Skip::ProtocolDisabled(protocol.to_string()))
    }
}

/// Skip unless the deployment's multitenancy mode matches `enabled`
pub fn require_multitenancy(config: &Config, enabled: bool) -> Result<(), Skip> {
    if config.multitenancy.enabled == enabled {
        Ok(())
    } else {
        Err(Skip::Multitenancy(enabled))
    }
}
