//! reqwest-backed transport
//!
//! Resolves request paths against the configured service endpoint, attaches
//! the caller's token and sends one request. No retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use tracing::debug;

use super::{Headers, RawResponse, Request, Transport};
use crate::auth::TokenProvider;
use crate::error::{ClientError, Result};

const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Build the shared reqwest client used by every transport and token provider
pub fn build_client(request_timeout: Duration, insecure: bool) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .danger_accept_invalid_certs(insecure)
        .build()?;
    Ok(client)
}

/// Transport that talks to a live service over HTTP(S)
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpTransport {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            base: parse_base(endpoint)?,
            tokens,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        if path.is_empty() {
            return Ok(self.base.clone());
        }
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidRequest(format!("Bad request path {:?}: {}", path, e)))
    }
}

/// Parse an endpoint so relative joins append to it rather than replace its
/// last segment
fn parse_base(endpoint: &str) -> Result<Url> {
    let normalized = format!("{}/", endpoint.trim_end_matches('/'));
    Url::parse(&normalized)
        .map_err(|e| {
            ClientError::InvalidRequest(format!("Bad service endpoint {:?}: {}", endpoint, e))
        })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<RawResponse> {
        let url = self.url_for(&request.path)?;
        let token = self.tokens.token().await?;

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, "application/json")
            .header(AUTH_TOKEN_HEADER, token);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }
        let body = response.bytes().await?;

        debug!(method = %request.method, url = %url, status, bytes = body.len(), "HTTP round trip");

        Ok(RawResponse { status, headers, body })
    }
}
