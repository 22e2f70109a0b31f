use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Login payload for `POST auth`
#[derive(DebugPretty, DisplaySimple, Serialize, Clone)]
pub struct AuthRequest {
    /// Password or application password
    pub password: String,
}

/// Body of an authentication response from the appliance
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Session descriptor; absent on malformed responses
    pub session: Option<SessionDescriptor>,
    /// Server-side processing time in seconds
    #[serde(default)]
    pub took: Option<f64>,
}

/// Session descriptor as issued by the appliance
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDescriptor {
    /// Whether the session is usable
    pub valid: bool,
    /// Whether a TOTP code is required for this account
    #[serde(default)]
    pub totp: bool,
    /// Opaque session id, absent when authentication failed
    pub sid: Option<String>,
    /// Anti-forgery token, absent when authentication failed
    pub csrf: Option<String>,
    /// Remaining validity in seconds; -1 when the session is invalid
    #[serde(default)]
    pub validity: i64,
    /// Server-provided diagnostic message, if any
    pub message: Option<String>,
}
