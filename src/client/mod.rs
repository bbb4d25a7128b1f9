//! Versioned REST client for the shared file system API
//!
//! One [`SharesClient`] serves every resource area. Each operation method
//! shapes a request for the client's bound microversion, sends it through the
//! [`Transport`], checks the status against the operation's documented one,
//! asserts the response carries a request id and decodes the JSON body.
//!
//! Per-request versions are expressed by rebinding: `client.at(v).get_share(id)`.

mod access;
mod admin;
mod groups;
mod migration;
mod networks;
mod operation;
mod quotas;
mod replicas;
mod servers;
mod share_types;
mod shares;
mod snapshots;

use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::policy::{EXPERIMENTAL_HEADER, REQUEST_ID_HEADER, VERSION_HEADER};
use crate::transport::{Headers, Request, Transport};
use crate::version::ApiVersion;

pub use access::AccessRequest;
pub use migration::MigrationRequest;
pub use networks::{NewSecurityService, NewShareNetwork};
pub use operation::Operation;
pub use quotas::{quota_keys_at, QuotaScope};
pub use share_types::NewShareType;
pub use shares::{ManageShareRequest, NewShare};
pub use snapshots::NewSnapshot;

/// Stream of resources from a paginated listing
pub type ResourceStream = Pin<Box<dyn Stream<Item = Result<Resource>> + Send>>;

/// Caller-supplied header overrides
#[derive(Debug, Clone)]
struct HeaderOverride {
    headers: Headers,
    /// Merge over the version headers instead of replacing them
    extra: bool,
}

/// Microversion-aware client bound to one version and one set of credentials
#[derive(Clone)]
pub struct SharesClient {
    transport: Arc<dyn Transport>,
    version: ApiVersion,
    overrides: Option<HeaderOverride>,
}

impl SharesClient {
    pub fn new(transport: Arc<dyn Transport>, version: ApiVersion) -> Self {
        Self {
            transport,
            version,
            overrides: None,
        }
    }

    /// The version requests are sent with
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// A copy of this client bound to another version
    pub fn at(&self, version: ApiVersion) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    /// A copy of this client sending caller-supplied headers.
    ///
    /// With `extra_headers` set the headers are merged over the version
    /// headers and win on conflict. Without it they replace the version
    /// headers entirely, which negative tests use to send a bad or missing
    /// version.
    pub fn with_headers(&self, headers: Headers, extra_headers: bool) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            overrides: Some(HeaderOverride {
                headers,
                extra: extra_headers,
            }),
            ..self.clone()
        }
    }

    /// Headers sent with `operation` at the bound version
    pub fn headers_for(&self, operation: Operation) -> Headers {
        let mut headers = Headers::new();
        headers.insert(VERSION_HEADER.to_string(), self.version.to_string());
        if let Some(area) = operation.area() {
            if area.is_experimental_at(self.version) {
                headers.insert(EXPERIMENTAL_HEADER.to_string(), "True".to_string());
            }
        }

        match &self.overrides {
            None => headers,
            Some(HeaderOverride { headers: custom, extra: true }) => {
                headers.extend(custom.clone());
                headers
            }
            Some(HeaderOverride { headers: custom, extra: false }) => custom.clone(),
        }
    }

    /// Start building a request for `operation`
    pub(crate) fn call(
        &self,
        operation: Operation,
        method: Method,
        path: impl Into<String>,
    ) -> Call<'_> {
        Call {
            client: self,
            operation,
            request: Request::new(method, path),
        }
    }

    async fn execute(&self, operation: Operation, mut request: Request) -> Result<ApiResponse> {
        request.headers = self.headers_for(operation);
        debug!(
            operation = %operation,
            method = %request.method,
            path = %request.path,
            version = %self.version,
            "Sending request"
        );

        let raw = self.transport.send(request).await?;

        let expected = operation.expected_status();
        if raw.status != expected {
            debug!(operation = %operation, status = raw.status, expected, "Unexpected status");
            return Err(ClientError::UnexpectedStatus {
                operation,
                expected,
                status: raw.status,
                body: raw.body_text(),
            });
        }

        // Only validated responses are checked; a miss is a service contract violation
        let request_id = match raw.header(REQUEST_ID_HEADER) {
            Some(id) => id.to_string(),
            None => panic!(
                "{} response ({}) is missing the {} header",
                operation, raw.status, REQUEST_ID_HEADER
            ),
        };

        let body = if raw.body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&raw.body)
                .map_err(|source| ClientError::Decode { operation, source })?
        };

        Ok(ApiResponse {
            status: raw.status,
            request_id,
            headers: raw.headers,
            body,
        })
    }
}

/// A request under construction
pub(crate) struct Call<'a> {
    client: &'a SharesClient,
    operation: Operation,
    request: Request,
}

impl Call<'_> {
    pub(crate) fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.request.query.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn query_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Append filter pairs as query parameters
    pub(crate) fn filters(mut self, filters: &[(&str, &str)]) -> Self {
        for (name, value) in filters {
            self.request.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub(crate) fn body(mut self, body: Value) -> Self {
        self.request.body = Some(body);
        self
    }

    pub(crate) async fn send(self) -> Result<ApiResponse> {
        self.client.execute(self.operation, self.request).await
    }
}

/// A validated response: status matched, request id present, body decoded
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub request_id: String,
    pub headers: Headers,
    pub body: Value,
}

impl ApiResponse {
    /// The object under `key`, e.g. `"share"`
    pub fn resource(&self, key: &str) -> Result<Resource> {
        let value = self
            .body
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::MissingField(key.to_string()))?;
        Resource::from_value(value)
    }

    /// The array of objects under `key`, e.g. `"shares"`
    pub fn resources(&self, key: &str) -> Result<Vec<Resource>> {
        match self.body.get(key) {
            Some(Value::Array(items)) => items.iter().cloned().map(Resource::from_value).collect(),
            Some(_) => Err(ClientError::MissingField(format!("{} (not a list)", key))),
            None => Err(ClientError::MissingField(key.to_string())),
        }
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// One decoded resource object
#[derive(Debug, Clone, PartialEq)]
pub struct Resource(Map<String, Value>);

impl Resource {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ClientError::MissingField(format!("expected an object, got {}", other))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of `field`; `None` if absent, null or not a string
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn id(&self) -> Result<&str> {
        self.str_field("id")
            .ok_or_else(|| ClientError::MissingField("id".to_string()))
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Join path segments
pub(crate) fn path(segments: &[&str]) -> String {
    segments.join("/")
}

/// Wrap `args` in a single-key action body
pub(crate) fn action(name: &str, args: Value) -> Value {
    let mut body = Map::new();
    body.insert(name.to_string(), args);
    Value::Object(body)
}
