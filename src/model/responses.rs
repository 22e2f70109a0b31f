use reqwest::StatusCode;
use serde_json::Value;

/// Normalized result of any API call.
///
/// Every response body collapses into one of these four shapes; callers
/// never see a parse failure as an error. API-level 4xx responses arrive as
/// [`ApiResponse::Structured`] so validation errors can be inspected without
/// error handling.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Parsed JSON body
    Structured(Value),
    /// Raw bytes, for binary exports
    Binary(Vec<u8>),
    /// Raw text fallback when the body is neither JSON nor binary
    Text(String),
    /// Blank or whitespace-only body
    Empty,
}

impl ApiResponse {
    /// Returns the parsed JSON body, if this is a structured response
    #[must_use]
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ApiResponse::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw bytes, if this is a binary response
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ApiResponse::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the raw text, if this is a text response
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiResponse::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this is the empty response shape
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiResponse::Empty)
    }

    /// Consumes the response and returns the JSON body, if structured
    #[must_use]
    pub fn into_structured(self) -> Option<Value> {
        match self {
            ApiResponse::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// Builds the single-entry error mapping used when a 4xx body cannot be
    /// parsed, or when a logout failure is folded into a response.
    #[must_use]
    pub fn error_mapping(message: &str) -> Self {
        ApiResponse::Structured(serde_json::json!({ "error": message }))
    }

    /// Builds the error mapping synthesized from an HTTP status line
    #[must_use]
    pub fn status_error_mapping(status: StatusCode) -> Self {
        Self::error_mapping(&format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ))
    }
}
