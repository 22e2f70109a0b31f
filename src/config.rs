use crate::constants::{
    API_ROOT_SEGMENT, DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY_SECS,
};
use crate::utils::config::get_env_or_default;
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the Pi-hole API client, immutable after construction
pub struct ClientConfig {
    /// Normalized base URL, always ending with exactly one `api/` segment
    pub base_url: String,
    /// Password or application password used for authentication
    pub password: String,
    /// Maximum number of attempts for authentication and transport retries
    pub max_retries: u32,
    /// Base delay in seconds between retries (exponential backoff)
    pub retry_delay_secs: u64,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// If true, collapse the connection pool to a single connection to
    /// prevent connection-reuse issues with picky servers
    pub disable_connection_pooling: bool,
    /// Whether to validate TLS certificates. The appliance commonly serves
    /// a self-signed certificate, so this defaults to false.
    pub verify_tls: bool,
}

impl ClientConfig {
    /// Creates a configuration with the given base URL and credential.
    ///
    /// The base URL is normalized so that `"http://pi.hole"`,
    /// `"http://pi.hole/"` and `"http://pi.hole/api/"` all address the same
    /// API root.
    ///
    /// # Arguments
    /// * `base_url` - Address of the Pi-hole instance, with or without the API root
    /// * `password` - Password or application password
    pub fn new(base_url: &str, password: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            password: password.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            connection_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS,
            disable_connection_pooling: false,
            verify_tls: false,
        }
    }

    /// Loads configuration from `PIHOLE_*` environment variables, reading a
    /// `.env` file first when present.
    pub fn from_env() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let base_url = get_env_or_default("PIHOLE_BASE_URL", String::from("http://pi.hole"));
        let password = get_env_or_default("PIHOLE_PASSWORD", String::new());

        if password.is_empty() {
            error!("PIHOLE_PASSWORD not found in environment variables or .env file");
        }

        Self {
            base_url: normalize_base_url(&base_url),
            password,
            max_retries: get_env_or_default("PIHOLE_MAX_RETRIES", DEFAULT_MAX_RETRIES),
            retry_delay_secs: get_env_or_default(
                "PIHOLE_RETRY_DELAY_SECS",
                DEFAULT_RETRY_DELAY_SECS,
            ),
            connection_timeout_secs: get_env_or_default(
                "PIHOLE_CONNECTION_TIMEOUT_SECS",
                DEFAULT_CONNECTION_TIMEOUT_SECS,
            ),
            disable_connection_pooling: get_env_or_default("PIHOLE_DISABLE_POOLING", false),
            verify_tls: get_env_or_default("PIHOLE_VERIFY_TLS", false),
        }
    }

    /// Sets the maximum number of retry attempts
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base retry delay in seconds
    #[must_use]
    pub fn with_retry_delay_secs(mut self, retry_delay_secs: u64) -> Self {
        self.retry_delay_secs = retry_delay_secs;
        self
    }

    /// Sets the connection timeout in seconds
    #[must_use]
    pub fn with_connection_timeout_secs(mut self, connection_timeout_secs: u64) -> Self {
        self.connection_timeout_secs = connection_timeout_secs;
        self
    }

    /// Collapses the connection pool to a single connection
    #[must_use]
    pub fn without_connection_pooling(mut self) -> Self {
        self.disable_connection_pooling = true;
        self
    }

    /// Enables or disables TLS certificate validation for this client
    #[must_use]
    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Normalizes a base URL so it carries exactly one trailing API root segment.
///
/// Trailing slashes are stripped, an already-present `api` segment is
/// stripped, then `api/` is appended.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let mut base = raw.trim_end_matches('/');
    if let Some(stripped) = base.strip_suffix(API_ROOT_SEGMENT) {
        if let Some(stripped) = stripped.strip_suffix('/') {
            base = stripped;
        }
    }
    format!("{}/{}/", base.trim_end_matches('/'), API_ROOT_SEGMENT)
}
