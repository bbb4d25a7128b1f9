//! Services, availability zones, pools, limits, user messages and the API
//! version document

use reqwest::Method;
use serde_json::Value;

use super::{path, ApiResponse, Operation, SharesClient};
use crate::error::{ClientError, Result};
use crate::policy::Variant;
use crate::version::{ApiVersion, VersionRange};

impl SharesClient {
    pub async fn list_services(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        let collection = Variant::ServicesPath.select(self.version);
        self.call(Operation::ListServices, Method::GET, collection)
            .filters(filters)
            .send()
            .await
    }

    pub async fn list_availability_zones(&self) -> Result<ApiResponse> {
        let collection = Variant::AvailabilityZonesPath.select(self.version);
        self.call(Operation::ListAvailabilityZones, Method::GET, collection)
            .send()
            .await
    }

    pub async fn list_pools(&self, detail: bool, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        let collection = if detail {
            "scheduler-stats/pools/detail"
        } else {
            "scheduler-stats/pools"
        };
        self.call(Operation::ListPools, Method::GET, collection)
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_limits(&self) -> Result<ApiResponse> {
        self.call(Operation::GetLimits, Method::GET, "limits").send().await
    }

    pub async fn list_messages(&self, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        self.call(Operation::ListMessages, Method::GET, "messages")
            .filters(filters)
            .send()
            .await
    }

    pub async fn get_message(&self, message_id: &str) -> Result<ApiResponse> {
        self.call(Operation::GetMessage, Method::GET, path(&["messages", message_id]))
            .send()
            .await
    }

    pub async fn delete_message(&self, message_id: &str) -> Result<ApiResponse> {
        self.call(Operation::DeleteMessage, Method::DELETE, path(&["messages", message_id]))
            .send()
            .await
    }

    /// The version document served at the endpoint itself
    pub async fn get_api_version(&self) -> Result<ApiResponse> {
        self.call(Operation::GetApiVersion, Method::GET, "").send().await
    }

    /// Microversion range the service advertises
    pub async fn supported_versions(&self) -> Result<VersionRange> {
        let response = self.get_api_version().await?;
        parse_version_document(&response.body)
    }
}

/// Read `min_version`/`version` from a version document. The service answers
/// with either `{"version": {...}}` or `{"versions": [{...}]}`.
fn parse_version_document(body: &Value) -> Result<VersionRange> {
    let entry = body
        .get("version")
        .or_else(|| body.get("versions").and_then(|list| list.get(0)))
        .ok_or_else(|| ClientError::MissingField("version".to_string()))?;

    let field = |name: &str| -> Result<ApiVersion> {
        let raw = entry
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::MissingField(name.to_string()))?;
        Ok(raw.parse()?)
    };
    let min = field("min_version")?;
    let max = field("version")?;

    VersionRange::new(min, max).ok_or_else(|| {
        ClientError::InvalidRequest(format!(
            "Service advertises an empty range {}..{}",
            min, max
        ))
    })
}
