//! Scripted transport for offline tests
//!
//! Replays queued responses in order, then a fallback response if one is set,
//! and records every request it receives.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Headers, RawResponse, Request, Transport};
use crate::error::{ClientError, Result};
use crate::policy::REQUEST_ID_HEADER;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl RawResponse {
    /// Empty-bodied response carrying a fresh request id
    pub fn new(status: u16) -> Self {
        let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let mut headers = Headers::new();
        headers.insert(REQUEST_ID_HEADER.to_string(), format!("req-{:012}", id));
        Self {
            status,
            headers,
            body: Bytes::new(),
        }
    }

    /// JSON-bodied response carrying a fresh request id
    pub fn json(status: u16, body: Value) -> Self {
        let mut response = Self::new(status);
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        response.body = Bytes::from(body.to_string());
        response
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn without_request_id(mut self) -> Self {
        self.headers.remove(REQUEST_ID_HEADER);
        self
    }
}

/// Transport that answers from a script instead of the network
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse>>>,
    fallback: Mutex<Option<RawResponse>>,
    recorded: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push(&self, response: RawResponse) -> &Self {
        self.script.lock().push_back(Ok(response));
        self
    }

    /// Queue a JSON response
    pub fn push_json(&self, status: u16, body: Value) -> &Self {
        self.push(RawResponse::json(status, body))
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: ClientError) -> &Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Response returned once the queue is empty
    pub fn repeat(&self, response: RawResponse) -> &Self {
        *self.fallback.lock() = Some(response);
        self
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<Request> {
        self.recorded.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().len()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.recorded.lock().last().cloned()
    }

    /// Number of queued responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<RawResponse> {
        let description = format!("{} /{}", request.method, request.path);
        self.recorded.lock().push(request);

        if let Some(next) = self.script.lock().pop_front() {
            return next;
        }
        match self.fallback.lock().as_ref() {
            Some(response) => {
                let mut response = response.clone();
                let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
                if response.headers.contains_key(REQUEST_ID_HEADER) {
                    response
                        .headers
                        .insert(REQUEST_ID_HEADER.to_string(), format!("req-{:012}", id));
                }
                Ok(response)
            }
            None => Err(ClientError::Transport(format!(
                "Script exhausted at {}",
                description
            ))),
        }
    }
}
