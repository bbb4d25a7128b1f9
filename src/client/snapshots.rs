//! Share snapshots

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;
use crate::policy::Variant;

/// Body of a create-snapshot request
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSnapshot {
    pub share_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub force: bool,
}

impl NewSnapshot {
    pub fn of(share_id: impl Into<String>) -> Self {
        Self {
            share_id: share_id.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl SharesClient {
    pub async fn create_snapshot(&self, snapshot: &NewSnapshot) -> Result<ApiResponse> {
        self.call(Operation::CreateSnapshot, Method::POST, "snapshots")
            .body(json!({ "snapshot": snapshot }))
            .send()
            .await
    }

    pub async fn list_snapshots(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListSnapshots, Method::GET, "snapshots")
            .filters(filters)
            .send()
            .await
    }

    pub async fn list_snapshots_detail(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListSnapshotsDetail, Method::GET, "snapshots/detail")
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_snapshot(&self, snapshot_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetSnapshot, Method::GET, path(&["snapshots", snapshot_id]))
            .send()
            .await
    }

    pub async fn update_snapshot(&self, snapshot_id: &str, fields: Value) -> Result<ApiResponse> {
        self.call(Operation::UpdateSnapshot, Method::PUT, path(&["snapshots", snapshot_id]))
            .body(json!({ "snapshot": fields }))
            .send()
            .await
    }

    pub async fn delete_snapshot(&self, snapshot_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteSnapshot, Method::DELETE, path(&["snapshots", snapshot_id]))
            .send()
            .await
    }

    pub async fn reset_snapshot_status(
        &self,
        snapshot_id: &str,
        status: &str,
    ) -> Result<ApiResponse> {
        let name = Variant::ResetStatusAction.select(self.version);
        self.call(
            Operation::ResetSnapshotStatus,
            Method::POST,
            path(&["snapshots", snapshot_id, "action"]),
        )
        .body(action(name, json!({ "status": status })))
        .send()
        .await
    }

    pub async fn force_delete_snapshot(&self, snapshot_id: &str) -> Result<ApiResponse> {
        let name = Variant::ForceDeleteAction.select(self.version);
        self.call(
            Operation::ForceDeleteSnapshot,
            Method::POST,
            path(&["snapshots", snapshot_id, "action"]),
        )
        .body(action(name, Value::Null))
        .send()
        .await
    }

    /// Bring an existing backend snapshot under management
    pub async fn manage_snapshot(
        &self,
        share_id: &str,
        provider_location: &str,
        driver_options: Value,
    ) -> Result<ApiResponse> {
        self.call(Operation::ManageSnapshot, Method::POST, "snapshots/manage")
            .body(json!({
                "snapshot": {
                    "share_id": share_id,
                    "provider_location": provider_location,
                    "driver_options": driver_options,
                }
            }))
            .send()
            .await
    }

    pub async fn unmanage_snapshot(&self, snapshot_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::UnmanageSnapshot,
            Method::POST,
            path(&["snapshots", snapshot_id, "action"]),
        )
        .body(action("unmanage", Value::Null))
        .send()
        .await
    }
}
