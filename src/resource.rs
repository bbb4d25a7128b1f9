//! Resource kinds and name-based dispatch
//!
//! Generic helpers (cleanup, the waiter, the CLI) address resources by kind
//! rather than by client method. [`ResourceKind`] maps each kind to the
//! client operations that read, delete and reset it.

use std::fmt;
use std::str::FromStr;

use crate::client::{ApiResponse, Resource, SharesClient};
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Share,
    Snapshot,
    ShareReplica,
    ShareGroup,
    ShareGroupSnapshot,
    ShareNetwork,
    SecurityService,
    ShareServer,
    Message,
}

/// (kind, name and response key, state field)
const KINDS: &[(ResourceKind, &str, Option<&str>)] = &[
    (ResourceKind::Share, "share", Some("status")),
    (ResourceKind::Snapshot, "snapshot", Some("status")),
    (ResourceKind::ShareReplica, "share_replica", Some("status")),
    (ResourceKind::ShareGroup, "share_group", Some("status")),
    (ResourceKind::ShareGroupSnapshot, "share_group_snapshot", Some("status")),
    (ResourceKind::ShareNetwork, "share_network", Some("status")),
    (ResourceKind::SecurityService, "security_service", None),
    (ResourceKind::ShareServer, "share_server", Some("status")),
    (ResourceKind::Message, "message", None),
];

impl ResourceKind {
    fn row(self) -> (&'static str, Option<&'static str>) {
        KINDS
            .iter()
            .find(|(kind, ..)| *kind == self)
            .map(|(_, name, field)| (*name, *field))
            .unwrap_or(("unknown", None))
    }

    /// Name used on the command line and as the response body key
    pub fn name(self) -> &'static str {
        self.row().0
    }

    /// Field the waiter watches by default; `None` for stateless kinds
    pub fn state_field(self) -> Option<&'static str> {
        self.row().1
    }

    pub fn all() -> impl Iterator<Item = ResourceKind> {
        KINDS.iter().map(|(kind, ..)| *kind)
    }

    /// Read one resource
    pub async fn get(self, client: &SharesClient, id: &str) -> Result<Resource> {
        let response = match self {
            ResourceKind::Share => client.get_share(id).await?,
            ResourceKind::Snapshot => client.get_snapshot(id).await?,
            ResourceKind::ShareReplica => client.get_replica(id).await?,
            ResourceKind::ShareGroup => client.get_share_group(id).await?,
            ResourceKind::ShareGroupSnapshot => client.get_share_group_snapshot(id).await?,
            ResourceKind::ShareNetwork => client.get_share_network(id).await?,
            ResourceKind::SecurityService => client.get_security_service(id).await?,
            ResourceKind::ShareServer => client.get_share_server(id).await?,
            ResourceKind::Message => client.get_message(id).await?,
        };
        response.resource(self.name())
    }

    pub async fn delete(self, client: &SharesClient, id: &str) -> Result<ApiResponse> {
        match self {
            ResourceKind::Share => client.delete_share(id).await,
            ResourceKind::Snapshot => client.delete_snapshot(id).await,
            ResourceKind::ShareReplica => client.delete_replica(id).await,
            ResourceKind::ShareGroup => client.delete_share_group(id).await,
            ResourceKind::ShareGroupSnapshot => client.delete_share_group_snapshot(id).await,
            ResourceKind::ShareNetwork => client.delete_share_network(id).await,
            ResourceKind::SecurityService => client.delete_security_service(id).await,
            ResourceKind::ShareServer => client.delete_share_server(id).await,
            ResourceKind::Message => client.delete_message(id).await,
        }
    }

    /// Administrative status override, for kinds that have one
    pub async fn reset_status(
        self,
        client: &SharesClient,
        id: &str,
        status: &str,
    ) -> Result<ApiResponse> {
        match self {
            ResourceKind::Share => client.reset_share_status(id, status).await,
            ResourceKind::Snapshot => client.reset_snapshot_status(id, status).await,
            ResourceKind::ShareReplica => client.reset_replica_status(id, status).await,
            ResourceKind::ShareGroup => client.reset_share_group_status(id, status).await,
            ResourceKind::ShareServer => client.reset_share_server_status(id, status).await,
            other => Err(ClientError::InvalidRequest(format!(
                "{} has no reset_status action",
                other
            ))),
        }
    }

    /// Delete bypassing state checks, for kinds that support it
    pub async fn force_delete(self, client: &SharesClient, id: &str) -> Result<ApiResponse> {
        match self {
            ResourceKind::Share => client.force_delete_share(id).await,
            ResourceKind::Snapshot => client.force_delete_snapshot(id).await,
            ResourceKind::ShareReplica => client.force_delete_replica(id).await,
            other => Err(ClientError::InvalidRequest(format!(
                "{} has no force_delete action",
                other
            ))),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = ClientError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        KINDS
            .iter()
            .find(|(_, name, _)| *name == wanted)
            .map(|(kind, ..)| *kind)
            .ok_or_else(|| ClientError::UnknownName {
                kind: "resource kind",
                name: s.to_string(),
            })
    }
}
