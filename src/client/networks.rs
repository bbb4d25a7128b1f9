//! Share networks, share network subnets and security services

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use super::{action, path, ApiResponse, Operation, SharesClient};
use crate::error::Result;

/// Body of a create-share-network request
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewShareNetwork {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutron_net_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutron_subnet_id: Option<String>,
    /// Availability zone of the default subnet (2.51+)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

/// Body of a create-security-service request
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewSecurityService {
    /// `ldap`, `kerberos` or `active_directory`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ou: Option<String>,
}

impl SharesClient {
    pub async fn create_share_network(&self, network: &NewShareNetwork) -> Result<ApiResponse> {
        self.call(Operation::CreateShareNetwork, Method::POST, "share-networks")
            .body(json!({ "share_network": network }))
            .send()
            .await
    }

    pub async fn list_share_networks(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListShareNetworks, Method::GET, "share-networks/detail")
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_share_network(&self, network_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetShareNetwork, Method::GET, path(&["share-networks", network_id]))
            .send()
            .await
    }

    pub async fn update_share_network(
        &self,
        network_id: &str,
        fields: Value,
    ) -> Result<ApiResponse> {
        self.call(Operation::UpdateShareNetwork, Method::PUT, path(&["share-networks", network_id]))
            .body(json!({ "share_network": fields }))
            .send()
            .await
    }

    pub async fn delete_share_network(&self, network_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteShareNetwork,
            Method::DELETE,
            path(&["share-networks", network_id]),
        )
        .send()
        .await
    }

    pub async fn add_security_service(
        &self,
        network_id: &str,
        security_service_id: &str,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::AddSecurityService,
            Method::POST,
            path(&["share-networks", network_id, "action"]),
        )
        .body(action(
            "add_security_service",
            json!({ "security_service_id": security_service_id }),
        ))
        .send()
        .await
    }

    pub async fn remove_security_service(
        &self,
        network_id: &str,
        security_service_id: &str,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::RemoveSecurityService,
            Method::POST,
            path(&["share-networks", network_id, "action"]),
        )
        .body(action(
            "remove_security_service",
            json!({ "security_service_id": security_service_id }),
        ))
        .send()
        .await
    }

    /// Add a subnet to a share network. `fields` carries `neutron_net_id`,
    /// `neutron_subnet_id` and `availability_zone`.
    pub async fn create_subnet(&self, network_id: &str, fields: Value) -> Result<ApiResponse> {
        self.call(
            Operation::CreateSubnet,
            Method::POST,
            path(&["share-networks", network_id, "subnets"]),
        )
        .body(json!({ "share-network-subnet": fields }))
        .send()
        .await
    }

    pub async fn get_subnet(&self, network_id: &str, subnet_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::GetSubnet,
            Method::GET,
            path(&["share-networks", network_id, "subnets", subnet_id]),
        )
        .send()
        .await
    }

    pub async fn delete_subnet(&self, network_id: &str, subnet_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteSubnet,
            Method::DELETE,
            path(&["share-networks", network_id, "subnets", subnet_id]),
        )
        .send()
        .await
    }

    /// Ask whether a subnet could be added to an in-use share network.
    ///
    /// The check runs asynchronously; repeat the call (with `reset` false)
    /// until the answer carries `compatible`.
    pub async fn subnet_create_check(
        &self,
        network_id: &str,
        availability_zone: Option<&str>,
        reset: bool,
    ) -> Result<ApiResponse> {
        let mut args = json!({ "reset_operation": reset });
        if let Some(zone) = availability_zone {
            args["availability_zone"] = json!(zone);
        }
        self.call(
            Operation::SubnetCreateCheck,
            Method::POST,
            path(&["share-networks", network_id, "action"]),
        )
        .body(action("share_network_subnet_create_check", args))
        .send()
        .await
    }

    pub async fn create_security_service(
        &self,
        service: &NewSecurityService,
    ) -> Result<ApiResponse> {
        self.call(Operation::CreateSecurityService, Method::POST, "security-services")
            .body(json!({ "security_service": service }))
            .send()
            .await
    }

    pub async fn list_security_services(&self, detailed: bool) -> Result<ApiResponse> {
        let collection = if detailed {
            "security-services/detail"
        } else {
            "security-services"
        };
        self.call(Operation::ListSecurityServices, Method::GET, collection)
            .send()
            .await
    }

    pub async fn get_security_service(&self, service_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::GetSecurityService,
            Method::GET,
            path(&["security-services", service_id]),
        )
        .send()
        .await
    }

    pub async fn update_security_service(
        &self,
        service_id: &str,
        fields: Value,
    ) -> Result<ApiResponse> {
        self.call(
            Operation::UpdateSecurityService,
            Method::PUT,
            path(&["security-services", service_id]),
        )
        .body(json!({ "security_service": fields }))
        .send()
        .await
    }

    pub async fn delete_security_service(&self, service_id: &str) -> Result<ApiResponse> {
        self.call(
            Operation::DeleteSecurityService,
            Method::DELETE,
            path(&["security-services", service_id]),
        )
        .send()
        .await
    }
}
