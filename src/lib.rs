//! Async client for the Pi-hole v6 management API.
//!
//! This crate wraps the appliance's REST API behind a single session-aware
//! client that handles:
//! - Login and session lifecycle (`X-FTL-SID` / `X-FTL-CSRF` headers)
//! - Transparent re-authentication when the session expires
//! - Exponential-backoff retry for transient transport failures
//! - Normalization of JSON, binary, text, and empty response bodies
//!
//! # Example
//! ```ignore
//! use pihole_client::prelude::*;
//!
//! let config = ClientConfig::new("http://pi.hole", "my-app-password");
//! let client = PiHoleClient::new(config).await?;
//!
//! let summary = client.get("stats/summary", None).await?;
//! if let Some(body) = summary.as_structured() {
//!     println!("{body}");
//! }
//!
//! client.close().await;
//! ```

/// Session lifecycle and authentication handling
pub mod auth;
/// The session-aware HTTP client
pub mod client;
/// Client configuration and base-URL normalization
pub mod config;
/// Global constants and protocol defaults
pub mod constants;
/// Error types for the library
pub mod error;
/// Wire types and normalized response shapes
pub mod model;
/// Convenient re-exports of the most commonly used types
pub mod prelude;
/// Environment and logging utilities
pub mod utils;

/// Library version, taken from the crate manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version string
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
