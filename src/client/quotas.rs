//! Quota sets
//!
//! The collection is `os-quota-sets` before 2.7 and `quota-sets` after.
//! Quotas are scoped to a project, optionally narrowed to a user or (2.39+)
//! a share type.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{json, Map, Value};

use super::{path, ApiResponse, Call, Operation, SharesClient};
use crate::error::Result;
use crate::policy::{Capability, Variant};
use crate::version::ApiVersion;

/// Which quota set an operation addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaScope {
    pub project_id: String,
    pub user_id: Option<String>,
    pub share_type: Option<String>,
}

impl QuotaScope {
    pub fn project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            user_id: None,
            share_type: None,
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn for_share_type(mut self, share_type: impl Into<String>) -> Self {
        self.share_type = Some(share_type.into());
        self
    }
}

/// Quota keys a project-level quota set reports at `version`
pub fn quota_keys_at(version: ApiVersion) -> Vec<&'static str> {
    let mut keys = vec!["shares", "gigabytes", "snapshots", "snapshot_gigabytes", "share_networks"];
    if Capability::ShareGroupQuotas.supported_at(version) {
        keys.extend(["share_groups", "share_group_snapshots"]);
    }
    if Capability::ReplicaQuotas.supported_at(version) {
        keys.extend(["share_replicas", "replica_gigabytes"]);
    }
    if Capability::PerShareGigabytesQuota.supported_at(version) {
        keys.push("per_share_gigabytes");
    }
    keys
}

impl SharesClient {
    fn quota_call(
        &self,
        operation: Operation,
        method: Method,
        scope: &QuotaScope,
        suffix: Option<&str>,
    ) -> Call<'_> {
        let collection = Variant::QuotaSetsPath.select(self.version);
        let mut segments = vec![collection, scope.project_id.as_str()];
        segments.extend(suffix);
        self.call(operation, method, path(&segments))
            .query_opt("user_id", scope.user_id.as_deref())
            .query_opt("share_type", scope.share_type.as_deref())
    }

    pub async fn get_quotas(&self, scope: &QuotaScope) -> Result<ApiResponse> {
        self.quota_call(Operation::GetQuotas, Method::GET, scope, None)
            .send()
            .await
    }

    pub async fn get_default_quotas(&self, project_id: &str) -> Result<ApiResponse> {
        self.quota_call(
            Operation::GetDefaultQuotas,
            Method::GET,
            &QuotaScope::project(project_id),
            Some("defaults"),
        )
        .send()
        .await
    }

    /// Limits with `in_use` and `reserved` counts (2.25+)
    pub async fn get_quota_detail(&self, scope: &QuotaScope) -> Result<ApiResponse> {
        self.quota_call(Operation::GetQuotaDetail, Method::GET, scope, Some("detail"))
            .send()
            .await
    }

    /// Set the given limits. `force` allows a limit below current usage.
    pub async fn update_quotas(
        &self,
        scope: &QuotaScope,
        limits: &BTreeMap<String, i64>,
        force: bool,
    ) -> Result<ApiResponse> {
        let mut quota_set: Map<String, Value> =
            limits.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        if force {
            quota_set.insert("force".to_string(), json!(true));
        }
        self.quota_call(Operation::UpdateQuotas, Method::PUT, scope, None)
            .body(json!({ "quota_set": quota_set }))
            .send()
            .await
    }

    /// Drop overrides so the scope falls back to defaults
    pub async fn reset_quotas(&self, scope: &QuotaScope) -> Result<ApiResponse> {
        self.quota_call(Operation::ResetQuotas, Method::DELETE, scope, None)
            .send()
            .await
    }
}
