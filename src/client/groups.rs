//! Share groups, share group snapshots and share group types
//! (experimental before 2.55)

use reqwest::Method;
use serde_json::{json, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;

impl SharesClient {
    /// `fields` may carry `name`, `share_types`, `share_group_type_id`,
    /// `share_network_id` and `source_share_group_snapshot_id`
    pub async fn create_share_group(&self, fields: Value) -> Result<ApiResponse> {
        self.call(Operation::CreateShareGroup, Method::POST, "share-groups")
            .body(json!({ "share_group": fields }))
            .send()
            .await
    }

    pub async fn list_share_groups(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListShareGroups, Method::GET, "share-groups/detail")
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_share_group(&self, group_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShareGroup, Method::GET, path(&["share-groups", group_id]))
            .send()
            .await
    }

    pub async fn update_share_group(&self, group_id: &str, fields: Value) -> Result<ApiResponse> {
        self.call(Operation::UpdateShareGroup, Method::PUT, path(&["share-groups", group_id]))
            .body(json!({ "share_group": fields }))
            .send()
            .await
    }

    pub async fn delete_share_group(&self, group_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteShareGroup, Method::DELETE, path(&["share-groups", group_id]))
            .send()
            .await
    }

    pub async fn reset_share_group_status(
        &self,
        group_id: &str,
        status: &str,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::ResetShareGroupStatus,
            Method::POST,
            path(&["share-groups", group_id, "action"]),
        )
        .body(action("reset_status", json!({ "status": status })))
        .send()
        .await
    }

    pub async fn create_share_group_snapshot(
        &self,
        group_id: &str,
        name: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut snapshot = json!({ "share_group_id": group_id });
        if let Some(name) = name {
            snapshot["name"] = json!(name);
        }
        self.call(Operation::CreateShareGroupSnapshot, Method::POST, "share-group-snapshots")
            .body(json!({ "share_group_snapshot": snapshot }))
            .send()
            .await
    }

    pub async fn get_share_group_snapshot(&self, snapshot_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::GetShareGroupSnapshot,
            Method::GET,
            path(&["share-group-snapshots", snapshot_id]),
        )
        .send()
        .await
    }

    pub async fn delete_share_group_snapshot(&self, snapshot_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteShareGroupSnapshot,
            Method::DELETE,
            path(&["share-group-snapshots", snapshot_id]),
        )
        .send()
        .await
    }

    pub async fn create_share_group_type(
        &self,
        name: &str,
        share_types: &[&str],
        is_public: bool,
    ) -> Result<ApiResponse> {
        self.call(Operation::CreateShareGroupType, Method::POST, "share-group-types")
            .body(json!({
                "share_group_type": {
                    "name": name,
                    "share_types": share_types,
                    "is_public": is_public,
                }
            }))
            .send()
            .await
    }

    pub async fn list_share_group_types(&self) -> Result<ApiResponse> {
        self.call(Operation::ListShareGroupTypes, Method::GET, "share-group-types")
            .send()
            .await
    }

    pub async fn get_share_group_type(&self, type_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShareGroupType, Method::GET, path(&["share-group-types", type_id]))
            .send()
            .await
    }

    pub async fn delete_share_group_type(&self, type_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteShareGroupType,
            Method::DELETE,
            path(&["share-group-types", type_id]),
        )
        .send()
        .await
    }
}
