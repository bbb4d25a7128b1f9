//! Share types, extra specs and type access

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{json, Map, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;
use crate::policy::Variant;

/// Body of a create-share-type request
#[derive(Debug, Clone)]
pub struct NewShareType {
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub extra_specs: BTreeMap<String, String>,
}

impl NewShareType {
    /// A public type with `driver_handles_share_servers` set
    pub fn new(name: impl Into<String>, driver_handles_share_servers: bool) -> Self {
        let mut extra_specs = BTreeMap::new();
        extra_specs.insert(
            "driver_handles_share_servers".to_string(),
            driver_handles_share_servers.to_string(),
        );
        Self {
            name: name.into(),
            description: None,
            is_public: true,
            extra_specs,
        }
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn spec(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_specs.insert(key.into(), value.into());
        self
    }

    /// The `is_public` key is spelled differently before 2.7
    fn to_body(&self, is_public_key: &str) -> Value {
        let mut share_type = Map::new();
        share_type.insert("name".to_string(), json!(self.name));
        if let Some(description) = &self.description {
            share_type.insert("description".to_string(), json!(description));
        }
        share_type.insert(is_public_key.to_string(), json!(self.is_public));
        share_type.insert("extra_specs".to_string(), json!(self.extra_specs));
        json!({ "share_type": share_type })
    }
}

impl SharesClient {
    pub async fn create_share_type(&self, share_type: &NewShareType) -> Result<ApiResponse> {
        let key = Variant::TypeIsPublicKey.select(self.version);
        self.call(Operation::CreateShareType, Method::POST, "types")
            .body(share_type.to_body(key))
            .send()
            .await
    }

    pub async fn list_share_types(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListShareTypes, Method::GET, "types")
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_share_type(&self, type_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShareType, Method::GET, path(&["types", type_id]))
            .send()
            .await
    }

    pub async fn delete_share_type(&self, type_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteShareType, Method::DELETE, path(&["types", type_id]))
            .send()
            .await
    }

    pub async fn get_extra_specs(&self, type_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetExtraSpecs, Method::GET, path(&["types", type_id, "extra_specs"]))
            .send()
            .await
    }

    pub async fn set_extra_specs(
        &self,
        type_id: &str,
        specs: &BTreeMap<String, String>,
    ) -> Result<ApiResponse> {
        self.call(Operation::SetExtraSpecs, Method::POST, path(&["types", type_id, "extra_specs"]))
            .body(json!({ "extra_specs": specs }))
            .send()
            .await
    }

    pub async fn delete_extra_spec(&self, type_id: &str, key: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteExtraSpec,
            Method::DELETE,
            path(&["types", type_id, "extra_specs", key]),
        )
        .send()
        .await
    }

    pub async fn list_type_access(&self, type_id: &str) -> Result<ApiResponse> {
        let segment = Variant::TypeAccessPath.select(self.version);
        self.call(Operation::ListTypeAccess, Method::GET, path(&["types", type_id, segment]))
            .send()
            .await
    }

    pub async fn add_type_access(&self, type_id: &str, project_id: &str) -> Result<ApiResponse> {
        self.call(Operation::AddTypeAccess, Method::POST, path(&["types", type_id, "action"]))
            .body(action("addProjectAccess", json!({ "project": project_id })))
            .send()
            .await
    }

    pub async fn remove_type_access(&self, type_id: &str, project_id: &str) -> Result<ApiResponse> {
        self.call(Operation::RemoveTypeAccess, Method::POST, path(&["types", type_id, "action"]))
            .body(action("removeProjectAccess", json!({ "project": project_id })))
            .send()
            .await
    }
}
