//! Share replicas (experimental before 2.56)

use reqwest::Method;
use serde_json::{json, Map, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;

impl SharesClient {
    pub async fn create_replica(
        &self,
        share_id: &str,
        availability_zone: Option<&str>,
        share_network_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut replica = Map::new();
        replica.insert("share_id".to_string(), json!(share_id));
        if let Some(zone) = availability_zone {
            replica.insert("availability_zone".to_string(), json!(zone));
        }
        if let Some(network) = share_network_id {
            replica.insert("share_network_id".to_string(), json!(network));
        }
        self.call(Operation::CreateReplica, Method::POST, "share-replicas")
            .body(json!({ "share_replica": replica }))
            .send()
            .await
    }

    pub async fn list_replicas(&self, share_id: Option<&str>) -> Result<ApiResponse> {
        self.call(Operation::ListReplicas, Method::GET, "share-replicas/detail")
            .query_opt("share_id", share_id)
            .send()
            .await
    }

    pub async fn get_replica(&self, replica_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetReplica, Method::GET, path(&["share-replicas", replica_id]))
            .send()
            .await
    }

    pub async fn delete_replica(&self, replica_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteReplica, Method::DELETE, path(&["share-replicas", replica_id]))
            .send()
            .await
    }

    async fn replica_action(
        &self,
        operation: Operation,
        replica_id: &str,
        body: Value,
    ) -> Result<ApiResponse> {
        self.call(operation, Method::POST, path(&["share-replicas", replica_id, "action"]))
            .body(body)
            .send()
            .await
    }

    /// Make a replica the active one
    pub async fn promote_replica(&self, replica_id: &str) -> Result<ApiResponse> {
        self.replica_action(Operation::PromoteReplica, replica_id, action("promote", Value::Null))
            .await
    }

    pub async fn resync_replica(&self, replica_id: &str) -> Result<ApiResponse> {
        self.replica_action(Operation::ResyncReplica, replica_id, action("resync", Value::Null))
            .await
    }

    pub async fn reset_replica_status(
        &self,
        replica_id: &str,
        status: &str,
    ) -> Result<ApiResponse> {
        self.replica_action(
            Operation::ResetReplicaStatus,
            replica_id,
            action("reset_status", json!({ "status": status })),
        )
        .await
    }

    /// Override `replica_state` (`active`, `in_sync`, `out_of_sync`, `error`)
    pub async fn reset_replica_state(
        &self,
        replica_id: &str,
        replica_state: &str,
    ) -> Result<ApiResponse> {
        self.replica_action(
            Operation::ResetReplicaState,
            replica_id,
            action("reset_replica_state", json!({ "replica_state": replica_state })),
        )
        .await
    }

    pub async fn force_delete_replica(&self, replica_id: &str) -> Result<ApiResponse> {
        let body = action("force_delete", Value::Null);
        self.replica_action(Operation::ForceDeleteReplica, replica_id, body)
            .await
    }

    /// 2.47+
    pub async fn list_replica_export_locations(&self, replica_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::ListReplicaExportLocations,
            Method::GET,
            path(&["share-replicas", replica_id, "export-locations"]),
        )
        .send()
        .await
    }
}
