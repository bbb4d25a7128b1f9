//! HTTP transport seam
//!
//! The client shapes a [`Request`] and hands it to a [`Transport`]; the
//! transport performs exactly one round trip and returns the [`RawResponse`]
//! untouched. Status validation and decoding happen in the client.

pub mod http;
pub mod scripted;

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;

pub use http::HttpTransport;
pub use scripted::ScriptedTransport;

/// Header name → value, names stored lowercase
pub type Headers = BTreeMap<String, String>;

/// One outgoing request, as shaped by the client
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path relative to the service endpoint, without a leading slash.
    /// An empty path addresses the endpoint itself.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Headers,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// First top-level key of an object body; the action name for action
    /// requests
    pub fn body_key(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|map| map.keys().next())
            .map(String::as_str)
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One response, before status validation
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Body as lossy UTF-8, for error messages
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs HTTP round trips for the client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. Must not retry and must not interpret the status.
    async fn send(&self, request: Request) -> Result<RawResponse>;
}
