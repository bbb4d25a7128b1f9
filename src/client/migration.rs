//! Two-phase share migration (always experimental)
//!
//! `migration_start` gained `preserve_snapshots` at 2.29, when every boolean
//! became mandatory.

use reqwest::Method;
use serde_json::{json, Map, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;
use crate::policy::Capability;

/// Arguments of `migration_start`
#[derive(Debug, Clone, Default)]
pub struct MigrationRequest {
    pub host: String,
    pub force_host_assisted_migration: bool,
    pub writable: bool,
    pub preserve_metadata: bool,
    pub nondisruptive: bool,
    pub preserve_snapshots: bool,
    pub new_share_network_id: Option<String>,
    pub new_share_type_id: Option<String>,
}

impl MigrationRequest {
    /// Driver-assisted migration to `host` preserving everything
    pub fn to_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            force_host_assisted_migration: false,
            writable: true,
            preserve_metadata: true,
            nondisruptive: false,
            preserve_snapshots: true,
            new_share_network_id: None,
            new_share_type_id: None,
        }
    }

    fn to_body(&self, with_snapshots: bool) -> Value {
        let mut args = Map::new();
        args.insert("host".to_string(), json!(self.host));
        args.insert(
            "force_host_assisted_migration".to_string(),
            json!(self.force_host_assisted_migration),
        );
        args.insert("writable".to_string(), json!(self.writable));
        args.insert("preserve_metadata".to_string(), json!(self.preserve_metadata));
        args.insert("nondisruptive".to_string(), json!(self.nondisruptive));
        if with_snapshots {
            args.insert("preserve_snapshots".to_string(), json!(self.preserve_snapshots));
        }
        if let Some(network) = &self.new_share_network_id {
            args.insert("new_share_network_id".to_string(), json!(network));
        }
        if let Some(share_type) = &self.new_share_type_id {
            args.insert("new_share_type_id".to_string(), json!(share_type));
        }
        action("migration_start", Value::Object(args))
    }
}

impl SharesClient {
    pub async fn migration_start(
        &self,
        share_id: &str,
        request: &MigrationRequest,
    ) -> Result<ApiResponse> {
        let with_snapshots = Capability::MigrationParams.supported_at(self.version);
        self.call(Operation::MigrationStart, Method::POST, path(&["shares", share_id, "action"]))
            .body(request.to_body(with_snapshots))
            .send()
            .await
    }

    pub async fn migration_complete(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(Operation::MigrationComplete, Method::POST, path(&["shares", share_id, "action"]))
            .body(action("migration_complete", Value::Null))
            .send()
            .await
    }

    pub async fn migration_cancel(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(Operation::MigrationCancel, Method::POST, path(&["shares", share_id, "action"]))
            .body(action("migration_cancel", Value::Null))
            .send()
            .await
    }

    /// `task_state` and `total_progress` of a running migration
    pub async fn migration_get_progress(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(Operation::MigrationProgress, Method::POST, path(&["shares", share_id, "action"]))
            .body(action("migration_get_progress", Value::Null))
            .send()
            .await
    }

    pub async fn reset_task_state(&self, share_id: &str, task_state: &str) -> Result<ApiResponse> {
        self.call(Operation::ResetTaskState, Method::POST, path(&["shares", share_id, "action"]))
            .body(action("reset_task_state", json!({ "task_state": task_state })))
            .send()
            .await
    }
}
