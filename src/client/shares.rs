//! Shares, share actions, export locations and share metadata

use std::collections::BTreeMap;

use async_stream::try_stream;
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{action, path, ApiResponse, Operation, ResourceStream, SharesClient};
use crate::error::Result;
use crate::policy::{Capability, Variant};

/// Body of a create-share request
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewShare {
    pub share_proto: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl NewShare {
    pub fn new(share_proto: impl Into<String>, size: u64) -> Self {
        Self {
            share_proto: share_proto.into(),
            size,
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn of_type(mut self, share_type: impl Into<String>) -> Self {
        self.share_type = Some(share_type.into());
        self
    }

    pub fn on_network(mut self, share_network_id: impl Into<String>) -> Self {
        self.share_network_id = Some(share_network_id.into());
        self
    }

    pub fn from_snapshot(mut self, snapshot_id: impl Into<String>) -> Self {
        self.snapshot_id = Some(snapshot_id.into());
        self
    }
}

/// Body of a manage-share request
#[derive(Debug, Clone, Default, Serialize)]
pub struct ManageShareRequest {
    pub protocol: String,
    pub export_path: String,
    pub service_host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_server_id: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub driver_options: BTreeMap<String, String>,
}

impl SharesClient {
    pub async fn create_share(&self, share: &NewShare) -> Result<ApiResponse> {
        self.call(Operation::CreateShare, Method::POST, "shares")
            .body(json!({ "share": share }))
            .send()
            .await
    }

    pub async fn list_shares(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListShares, Method::GET, "shares")
            .filters(filters)
            .send()
            .await
    }

    pub async fn list_shares_detail(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListSharesDetail, Method::GET, "shares/detail")
            .filters(filters)
            .send()
            .await
    }

    /// Every share matching `filters`, fetched `page_size` at a time with
    /// `limit`/`offset`. A short page ends the listing.
    pub fn share_pages(&self, page_size: usize, filters: Vec<(String, String)>) -> ResourceStream {
        let client = self.clone();
        let page_size = page_size.max(1);

        Box::pin(try_stream! {
            let mut offset = 0usize;
            loop {
                let mut call = client
                    .call(Operation::ListSharesDetail, Method::GET, "shares/detail")
                    .query("limit", page_size)
                    .query("offset", offset);
                for (name, value) in &filters {
                    call = call.query(name, value);
                }
                let page = call.send().await?.resources("shares")?;
                let count = page.len();
                debug!(offset, count, "Fetched share page");

                for share in page {
                    yield share;
                }

                if count < page_size {
                    break;
                }
                offset += count;
            }
        })
    }

    pub async fn get_share(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShare, Method::GET, path(&["shares", share_id]))
            .send()
            .await
    }

    /// Update display fields (`display_name`, `display_description`, `is_public`)
    pub async fn update_share(&self, share_id: &str, fields: Value) -> Result<ApiResponse> {
        self.call(Operation::UpdateShare, Method::PUT, path(&["shares", share_id]))
            .body(json!({ "share": fields }))
            .send()
            .await
    }

    pub async fn delete_share(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteShare, Method::DELETE, path(&["shares", share_id]))
            .send()
            .await
    }

    fn share_action(&self, operation: Operation, share_id: &str, body: Value) -> super::Call<'_> {
        self.call(operation, Method::POST, path(&["shares", share_id, "action"]))
            .body(body)
    }

    pub async fn extend_share(&self, share_id: &str, new_size: u64) -> Result<ApiResponse> {
        let name = Variant::ExtendAction.select(self.version);
        let body = action(name, json!({ "new_size": new_size }));
        self.share_action(Operation::ExtendShare, share_id, body)
            .send()
            .await
    }

    pub async fn shrink_share(&self, share_id: &str, new_size: u64) -> Result<ApiResponse> {
        let name = Variant::ShrinkAction.select(self.version);
        let body = action(name, json!({ "new_size": new_size }));
        self.share_action(Operation::ShrinkShare, share_id, body)
            .send()
            .await
    }

    /// Administrative status override
    pub async fn reset_share_status(&self, share_id: &str, status: &str) -> Result<ApiResponse> {
        let name = Variant::ResetStatusAction.select(self.version);
        let body = action(name, json!({ "status": status }));
        self.share_action(Operation::ResetShareStatus, share_id, body)
            .send()
            .await
    }

    pub async fn force_delete_share(&self, share_id: &str) -> Result<ApiResponse> {
        let name = Variant::ForceDeleteAction.select(self.version);
        self.share_action(Operation::ForceDeleteShare, share_id, action(name, Value::Null))
            .send()
            .await
    }

    pub async fn manage_share(&self, request: &ManageShareRequest) -> Result<ApiResponse> {
        let collection = Variant::ShareManagePath.select(self.version);
        self.call(Operation::ManageShare, Method::POST, collection)
            .body(json!({ "share": request }))
            .send()
            .await
    }

    /// Below 2.7 unmanage has its own endpoint; from 2.7 it is a share action.
    pub async fn unmanage_share(&self, share_id: &str) -> Result<ApiResponse> {
        if Capability::UnprefixedActions.supported_at(self.version) {
            self.share_action(Operation::UnmanageShare, share_id, action("unmanage", Value::Null))
                .send()
                .await
        } else {
            self.call(
                Operation::UnmanageShare,
                Method::POST,
                path(&["os-share-unmanage", share_id, "unmanage"]),
            )
            .send()
            .await
        }
    }

    pub async fn revert_to_snapshot(
        &self,
        share_id: &str,
        snapshot_id: &str,
    ) -> Result<ApiResponse> {
        self.share_action(
            Operation::RevertShare,
            share_id,
            action("revert", json!({ "snapshot_id": snapshot_id })),
        )
        .send()
        .await
    }

    pub async fn list_export_locations(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::ListExportLocations,
            Method::GET,
            path(&["shares", share_id, "export_locations"]),
        )
        .send()
        .await
    }

    pub async fn get_export_location(
        &self,
        share_id: &str,
        location_id: &str,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::GetExportLocation,
            Method::GET,
            path(&["shares", share_id, "export_locations", location_id]),
        )
        .send()
        .await
    }

    pub async fn get_share_metadata(&self, share_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShareMetadata, Method::GET, path(&["shares", share_id, "metadata"]))
            .send()
            .await
    }

    /// Add or overwrite the given keys, keeping the rest
    pub async fn set_share_metadata(
        &self,
        share_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<ApiResponse> {
        let metadata_path = path(&["shares", share_id, "metadata"]);
        self.call(Operation::SetShareMetadata, Method::POST, metadata_path)
            .body(json!({ "metadata": metadata }))
            .send()
            .await
    }

    /// Replace the whole metadata map
    pub async fn update_all_share_metadata(
        &self,
        share_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<ApiResponse> {
        let metadata_path = path(&["shares", share_id, "metadata"]);
        self.call(Operation::UpdateShareMetadata, Method::PUT, metadata_path)
            .body(json!({ "metadata": metadata }))
            .send()
            .await
    }

    pub async fn delete_share_metadata(&self, share_id: &str, key: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteShareMetadataItem,
            Method::DELETE,
            path(&["shares", share_id, "metadata", key]),
        )
        .send()
        .await
    }
}
