//! Share access rules
//!
//! Listing has three shapes across versions: the `os-access_list` action,
//! the `access_list` action from 2.7 and the `share-access-rules` collection
//! from 2.45. Every shape answers with an `access_list` key.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;
use crate::policy::{Capability, Variant};

/// Arguments of an allow-access action
#[derive(Debug, Clone, Serialize)]
pub struct AccessRequest {
    pub access_type: String,
    pub access_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl AccessRequest {
    pub fn new(access_type: impl Into<String>, access_to: impl Into<String>) -> Self {
        Self {
            access_type: access_type.into(),
            access_to: access_to.into(),
            access_level: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn ip(access_to: impl Into<String>) -> Self {
        Self::new("ip", access_to)
    }

    pub fn level(mut self, access_level: impl Into<String>) -> Self {
        self.access_level = Some(access_level.into());
        self
    }
}

impl SharesClient {
    pub async fn allow_access(
        &self,
        share_id: &str,
        request: &AccessRequest,
    ) -> Result<ApiResponse> {
        let name = Variant::AllowAccessAction.select(self.version);
        self.call(Operation::AllowAccess, Method::POST, path(&["shares", share_id, "action"]))
            .body(action(name, json!(request)))
            .send()
            .await
    }

    pub async fn deny_access(&self, share_id: &str, access_id: &str) -> Result<ApiResponse> {
        let name = Variant::DenyAccessAction.select(self.version);
        self.call(Operation::DenyAccess, Method::POST, path(&["shares", share_id, "action"]))
            .body(action(name, json!({ "access_id": access_id })))
            .send()
            .await
    }

    pub async fn list_access_rules(&self, share_id: &str) -> Result<ApiResponse> {
        if Capability::AccessRulesApi.supported_at(self.version) {
            self.call(Operation::ListAccessRules, Method::GET, "share-access-rules")
                .query("share_id", share_id)
                .send()
                .await
        } else {
            let name = Variant::AccessListAction.select(self.version);
            let action_path = path(&["shares", share_id, "action"]);
            self.call(Operation::ListAccessRules, Method::POST, action_path)
                .body(action(name, Value::Null))
                .send()
                .await
        }
    }

    pub async fn get_access_rule(&self, access_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetAccessRule, Method::GET, path(&["share-access-rules", access_id]))
            .send()
            .await
    }

    pub async fn update_access_metadata(
        &self,
        access_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::UpdateAccessMetadata,
            Method::PUT,
            path(&["share-access-rules", access_id, "metadata"]),
        )
        .body(json!({ "metadata": metadata }))
        .send()
        .await
    }

    pub async fn delete_access_metadata(&self, access_id: &str, key: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteAccessMetadata,
            Method::DELETE,
            path(&["share-access-rules", access_id, "metadata", key]),
        )
        .send()
        .await
    }
}
