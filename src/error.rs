use thiserror::Error;

use crate::client::Operation;
use crate::version::VersionError;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with a status other than the one the operation
    /// documents. Negative tests match on this to tell an expected rejection
    /// apart from a broken client.
    #[error("{operation} returned HTTP {status}, expected {expected}: {body}")]
    UnexpectedStatus {
        operation: Operation,
        expected: u16,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Malformed response body for {operation}: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response is missing field: {0}")]
    MissingField(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

impl ClientError {
    /// HTTP status of an unexpected-status error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_status(&self, code: u16) -> bool {
        self.status() == Some(code)
    }

    pub fn is_not_found(&self) -> bool {
        self.is_status(404)
    }

    pub fn is_forbidden(&self) -> bool {
        self.is_status(403)
    }

    pub fn is_bad_request(&self) -> bool {
        self.is_status(400)
    }

    pub fn is_conflict(&self) -> bool {
        self.is_status(409)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
