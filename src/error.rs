//! Error types for the Pi-hole client.
//!
//! API-level 4xx responses and unparsable bodies are never errors: they are
//! normalized into [`crate::model::responses::ApiResponse`] so callers can
//! branch on them as data. `ClientError` covers what this layer cannot
//! recover from: exhausted authentication, transport failures, and
//! unexpected server statuses.

use reqwest::StatusCode;
use std::fmt;

/// Main error type for the library
#[derive(Debug)]
pub enum ClientError {
    /// Authentication exhausted all attempts; carries the last captured cause
    Authentication(String),
    /// Connection-level failure after retry exhaustion
    Connection(String),
    /// The request timed out after retry exhaustion
    Timeout(String),
    /// A non-2xx/3xx/4xx status survived the retry policy
    Unexpected(StatusCode),
    /// HTTP plumbing failure from the transport
    Http(reqwest::Error),
    /// JSON serialization failure
    Json(serde_json::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Authentication(msg) => write!(f, "authentication failed: {msg}"),
            ClientError::Connection(msg) => write!(f, "connection error: {msg}"),
            ClientError::Timeout(msg) => write!(f, "request timed out: {msg}"),
            ClientError::Unexpected(status) => write!(f, "unexpected status: {status}"),
            ClientError::Http(e) => write!(f, "http error: {e}"),
            ClientError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Json(e)
    }
}

impl ClientError {
    /// Classifies a transport error into timeout, connection, or plain HTTP
    #[must_use]
    pub fn classify(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else {
            ClientError::Http(e)
        }
    }
}
