//! Share servers

use reqwest::Method;
use serde_json::{json, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;

impl SharesClient {
    pub async fn list_share_servers(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListShareServers, Method::GET, "share-servers")
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_share_server(&self, server_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShareServer, Method::GET, path(&["share-servers", server_id]))
            .send()
            .await
    }

    pub async fn delete_share_server(&self, server_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteShareServer, Method::DELETE, path(&["share-servers", server_id]))
            .send()
            .await
    }

    pub async fn reset_share_server_status(
        &self,
        server_id: &str,
        status: &str,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::ResetShareServerStatus,
            Method::POST,
            path(&["share-servers", server_id, "action"]),
        )
        .body(action("reset_status", json!({ "status": status })))
        .send()
        .await
    }

    /// Adopt an existing backend server (2.49+). From 2.51 the network is
    /// named by `share_network_subnet_id` inside `fields`.
    pub async fn manage_share_server(
        &self,
        host: &str,
        share_network_id: &str,
        identifier: &str,
        fields: Value,
    ) -> Result<ApiResponse> {
        let mut server = json!({
            "host": host,
            "share_network_id": share_network_id,
            "identifier": identifier,
        });
        if let (Some(target), Value::Object(extra)) = (server.as_object_mut(), fields) {
            target.extend(extra);
        }
        self.call(Operation::ManageShareServer, Method::POST, "share-servers/manage")
            .body(json!({ "share_server": server }))
            .send()
            .await
    }

    pub async fn unmanage_share_server(&self, server_id: &str, force: bool) -> Result<ApiResponse> {
        self.call(
            Operation::UnmanageShareServer,
            Method::POST,
            path(&["share-servers", server_id, "action"]),
        )
        .body(action("unmanage", json!({ "force": force })))
        .send()
        .await
    }
}
