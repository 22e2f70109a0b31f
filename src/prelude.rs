//! # Pi-hole Client Prelude
//!
//! This module provides a convenient way to import the most commonly used
//! types and traits from the library.
//!
//! ## Usage
//!
//! ```ignore
//! use pihole_client::prelude::*;
//!
//! let config = ClientConfig::new("http://pi.hole", "my-app-password");
//! let client = PiHoleClient::new(config).await?;
//! // ... etc
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the Pi-hole API client
pub use crate::config::{ClientConfig, normalize_base_url};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::ClientError;

// ============================================================================
// AUTHENTICATION AND SESSION MANAGEMENT
// ============================================================================

/// Authentication manager and session types
pub use crate::auth::{Auth, Authenticator, Session};

// ============================================================================
// CLIENT
// ============================================================================

/// The session-aware API client
pub use crate::client::PiHoleClient;

// ============================================================================
// MODELS
// ============================================================================

/// Authentication wire types
pub use crate::model::auth::{AuthRequest, AuthResponse, SessionDescriptor};

/// File attachments for multipart requests
pub use crate::model::requests::FilePart;

/// Normalized response shapes
pub use crate::model::responses::ApiResponse;

/// Transport retry policy
pub use crate::model::retry::RetryPolicy;

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Environment parsing utilities
pub use crate::utils::config::{get_env_or_default, get_env_or_none};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};

/// Re-export reqwest types needed at call sites
pub use reqwest::{Method, StatusCode};
